//! Test doubles for the broker seams and a log capture

mod logs;
mod resources;

pub use logs::capture_logs;
pub use resources::{MockConnection, MockPool, RecordingHandler};

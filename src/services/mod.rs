//! Runnable services built from the libraries

pub mod forwarder;

mod options;
pub use options::SharedOptions;

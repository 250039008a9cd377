//! Forwards Redis pattern-subscription messages as typed notifications.
//!
//! The crate is split into the low-level [`libraries`], which contain the broker plumbing and the
//! process lifecycle, and the [`services`] that wire them together into a runnable forwarder.

pub mod libraries;
pub mod services;

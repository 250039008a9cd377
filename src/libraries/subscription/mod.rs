//! Broker subscription callbacks
//!
//! A subscription connection receives push frames from the broker. These are decoded into
//! [`SubscriptionEvent`]s and routed to a [`SubscriptionHandler`] by [`dispatch`], which also
//! keeps track of whether the connection is still subscribed to anything.

mod event;
mod handler;

pub use event::SubscriptionEvent;
pub use handler::{dispatch, SubscriptionHandler, SubscriptionState};

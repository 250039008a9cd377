//! Broker connections
//!
//! Subscriptions run on dedicated connections handed out by a [`ConnectionPool`].
//! The connection type implements [`PatternSubscriber`] which drives the blocking subscription loop.

mod redis;
mod traits;

pub use self::redis::{
    keyspace_notifications_enabled, requires_keyspace_notifications, RedisConnection, RedisPool,
};
pub use traits::{ConnectionPool, PatternSubscriber, PoolError, SubscriptionError};

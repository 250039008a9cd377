use crate::libraries::subscription::SubscriptionHandler;
use redis::RedisError;
use thiserror::Error;

/// Connection acquisition errors
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("invalid redis connection info")]
    InvalidUrl(#[source] RedisError),
}

/// Errors terminating a running subscription
#[derive(Error, Debug)]
pub enum SubscriptionError {
    #[error("connection to redis failed")]
    Redis(#[from] RedisError),
}

/// Source of exclusively owned broker connections
pub trait ConnectionPool {
    type Connection: PatternSubscriber;

    /// Hands out a connection that is not used by anyone else
    fn acquire(&self) -> Result<Self::Connection, PoolError>;

    /// Returns a connection that was previously handed out by [`acquire`](Self::acquire)
    fn release(&self, connection: Self::Connection);
}

/// Connection which is able to run a pattern subscription
pub trait PatternSubscriber {
    /// Subscribes to the given pattern and feeds every event into the handler
    ///
    /// Blocks for as long as the connection holds at least one subscription. Returns `Ok(())`
    /// once the broker reports that nothing is subscribed anymore and an error when the
    /// connection breaks.
    fn psubscribe(
        &mut self,
        handler: &mut dyn SubscriptionHandler,
        pattern: &str,
    ) -> Result<(), SubscriptionError>;
}

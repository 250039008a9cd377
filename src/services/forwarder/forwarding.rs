use super::notification::{Notification, NotificationSender};
use crate::libraries::resources::{
    ConnectionPool, PatternSubscriber, PoolError, SubscriptionError,
};
use crate::libraries::subscription::SubscriptionHandler;
use log::{debug, error, info, warn};
use std::fmt;

/// Strips the channel prefix once from the front, channels without it are passed through
pub fn domain_identifier<'a>(channel: &'a str, prefix: &str) -> &'a str {
    channel.strip_prefix(prefix).unwrap_or(channel)
}

/// Turns pattern messages into notifications for the downstream consumer
pub struct NotificationHandler {
    prefix: String,
    sender: NotificationSender,
}

impl NotificationHandler {
    pub fn new(prefix: String, sender: NotificationSender) -> Self {
        Self { prefix, sender }
    }
}

impl SubscriptionHandler for NotificationHandler {
    fn on_pattern_message(&mut self, pattern: &str, channel: &str, message: &str) {
        info!(
            "Message from: pattern: {}, channel: {}, message: {}",
            pattern, channel, message
        );

        let identifier = domain_identifier(channel, &self.prefix);
        let notification = Notification::new(identifier.to_owned());

        match self.sender.unbounded_send(notification) {
            Ok(()) => debug!("Forwarded state change of {}", identifier),
            Err(e) => warn!(
                "Dropping state change of {}, consumer is gone ({})",
                identifier, e
            ),
        }
    }
}

/// Reason why a subscription stopped
#[derive(Debug)]
pub enum Termination {
    /// The broker reported that nothing is subscribed anymore
    Unsubscribed,
    ConnectionLost(SubscriptionError),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Unsubscribed => write!(f, "unsubscribed by broker"),
            Termination::ConnectionLost(e) => write!(f, "connection lost ({})", e),
        }
    }
}

/// Holds a dedicated broker connection and runs a pattern subscription on it
pub struct SubscriptionForwarder<P: ConnectionPool, H: SubscriptionHandler> {
    pool: P,
    connection: P::Connection,
    wildcard: String,
    handler: H,
}

impl<P: ConnectionPool, H: SubscriptionHandler> SubscriptionForwarder<P, H> {
    /// Acquires the connection the subscription will run on
    pub fn new(pool: P, wildcard: String, handler: H) -> Result<Self, PoolError> {
        let connection = pool.acquire()?;

        Ok(Self {
            pool,
            connection,
            wildcard,
            handler,
        })
    }

    /// Subscribes to the wildcard pattern and blocks for as long as the subscription lives
    ///
    /// Only returns when the subscription has been terminated, which never happens while
    /// everything is healthy. The connection is handed back to the pool before returning.
    pub fn start(self) -> Termination {
        let Self {
            pool,
            mut connection,
            wildcard,
            mut handler,
        } = self;

        info!("Subscribing to {}", wildcard);

        let termination = match connection.psubscribe(&mut handler, &wildcard) {
            Ok(()) => Termination::Unsubscribed,
            Err(e) => Termination::ConnectionLost(e),
        };

        pool.release(connection);

        error!(
            "Subscriber for {} is about to close, this should never happen! Reason: {}",
            wildcard, termination
        );

        termination
    }
}

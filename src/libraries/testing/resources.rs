use crate::libraries::resources::{
    ConnectionPool, PatternSubscriber, PoolError, SubscriptionError,
};
use crate::libraries::subscription::{
    dispatch, SubscriptionEvent, SubscriptionHandler, SubscriptionState,
};
use redis::{ErrorKind, RedisError};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// Pool handing out scripted connections and counting their lifecycle
#[derive(Clone, Default)]
pub struct MockPool {
    events: Vec<SubscriptionEvent>,
    drop_connection: bool,
    acquired: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl MockPool {
    /// Connections replay the events and are then unsubscribed by the broker
    pub fn unsubscribing(events: Vec<SubscriptionEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    /// Connections replay the events and then lose the connection
    pub fn dropping(events: Vec<SubscriptionEvent>) -> Self {
        Self {
            events,
            drop_connection: true,
            ..Default::default()
        }
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl ConnectionPool for MockPool {
    type Connection = MockConnection;

    fn acquire(&self) -> Result<Self::Connection, PoolError> {
        self.acquired.fetch_add(1, Ordering::SeqCst);

        Ok(MockConnection {
            events: self.events.clone(),
            drop_connection: self.drop_connection,
        })
    }

    fn release(&self, _connection: Self::Connection) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockConnection {
    events: Vec<SubscriptionEvent>,
    drop_connection: bool,
}

impl PatternSubscriber for MockConnection {
    fn psubscribe(
        &mut self,
        handler: &mut dyn SubscriptionHandler,
        pattern: &str,
    ) -> Result<(), SubscriptionError> {
        let confirmation = SubscriptionEvent::PatternSubscribe {
            pattern: pattern.to_owned(),
            count: 1,
        };

        for event in std::iter::once(confirmation).chain(self.events.drain(..)) {
            if dispatch(handler, event) == SubscriptionState::Closed {
                return Ok(());
            }
        }

        if self.drop_connection {
            let reset = RedisError::from((ErrorKind::IoError, "connection reset by peer"));
            return Err(reset.into());
        }

        dispatch(
            handler,
            SubscriptionEvent::PatternUnsubscribe {
                pattern: pattern.to_owned(),
                count: 0,
            },
        );

        Ok(())
    }
}

/// Handler that records every callback in a compact textual form
#[derive(Default)]
pub struct RecordingHandler {
    pub calls: Vec<String>,
}

impl SubscriptionHandler for RecordingHandler {
    fn on_pattern_message(&mut self, pattern: &str, channel: &str, message: &str) {
        self.calls
            .push(format!("pmessage {} {} {}", pattern, channel, message));
    }

    fn on_message(&mut self, channel: &str, message: &str) {
        self.calls.push(format!("message {} {}", channel, message));
    }

    fn on_subscribe(&mut self, channel: &str, subscribed_channels: usize) {
        self.calls
            .push(format!("subscribe {} {}", channel, subscribed_channels));
    }

    fn on_unsubscribe(&mut self, channel: &str, subscribed_channels: usize) {
        self.calls
            .push(format!("unsubscribe {} {}", channel, subscribed_channels));
    }

    fn on_pattern_subscribe(&mut self, pattern: &str, subscribed_channels: usize) {
        self.calls
            .push(format!("psubscribe {} {}", pattern, subscribed_channels));
    }

    fn on_pattern_unsubscribe(&mut self, pattern: &str, subscribed_channels: usize) {
        self.calls
            .push(format!("punsubscribe {} {}", pattern, subscribed_channels));
    }
}

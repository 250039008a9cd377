use super::SubscriptionEvent;
use log::info;

/// Callbacks invoked for every event on a subscribed connection
///
/// All callbacks run on the thread driving the subscription, one at a time and in the order
/// the broker delivers them. Implementations must not block on anything but a hand-off to
/// another task. The default implementations only log the event.
pub trait SubscriptionHandler {
    /// Message on a channel that matched a subscribed pattern
    fn on_pattern_message(&mut self, pattern: &str, channel: &str, message: &str) {
        info!(
            "Message from: pattern: {}, channel: {}, message: {}",
            pattern, channel, message
        );
    }

    fn on_message(&mut self, channel: &str, message: &str) {
        info!("Message: channel: {}, message: {}", channel, message);
    }

    fn on_subscribe(&mut self, channel: &str, subscribed_channels: usize) {
        info!(
            "Subscription: channel: {}, subscribed channels: {}",
            channel, subscribed_channels
        );
    }

    fn on_unsubscribe(&mut self, channel: &str, subscribed_channels: usize) {
        info!(
            "Unsubscribe: channel: {}, subscribed channels: {}",
            channel, subscribed_channels
        );
    }

    fn on_pattern_subscribe(&mut self, pattern: &str, subscribed_channels: usize) {
        info!(
            "Pattern subscription: pattern: {}, subscribed channels: {}",
            pattern, subscribed_channels
        );
    }

    fn on_pattern_unsubscribe(&mut self, pattern: &str, subscribed_channels: usize) {
        info!(
            "Pattern unsubscribe: pattern: {}, subscribed channels: {}",
            pattern, subscribed_channels
        );
    }
}

/// Whether a connection still holds at least one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Active,
    Closed,
}

impl SubscriptionState {
    fn from_count(count: usize) -> Self {
        if count > 0 {
            SubscriptionState::Active
        } else {
            SubscriptionState::Closed
        }
    }
}

/// Routes an event to the matching handler callback
///
/// Subscription confirmations carry the number of subscriptions remaining on the connection,
/// once that reaches zero the broker no longer delivers anything and the subscription is closed.
pub fn dispatch(
    handler: &mut dyn SubscriptionHandler,
    event: SubscriptionEvent,
) -> SubscriptionState {
    match event {
        SubscriptionEvent::PatternMessage {
            pattern,
            channel,
            payload,
        } => {
            handler.on_pattern_message(&pattern, &channel, &payload);
            SubscriptionState::Active
        }
        SubscriptionEvent::Message { channel, payload } => {
            handler.on_message(&channel, &payload);
            SubscriptionState::Active
        }
        SubscriptionEvent::Subscribe { channel, count } => {
            handler.on_subscribe(&channel, count);
            SubscriptionState::from_count(count)
        }
        SubscriptionEvent::Unsubscribe { channel, count } => {
            handler.on_unsubscribe(&channel, count);
            SubscriptionState::from_count(count)
        }
        SubscriptionEvent::PatternSubscribe { pattern, count } => {
            handler.on_pattern_subscribe(&pattern, count);
            SubscriptionState::from_count(count)
        }
        SubscriptionEvent::PatternUnsubscribe { pattern, count } => {
            handler.on_pattern_unsubscribe(&pattern, count);
            SubscriptionState::from_count(count)
        }
    }
}

use redis::{from_redis_value, Value};

/// Push frame received on a subscribed connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionEvent {
    /// Message on a channel subscribed to by name
    Message { channel: String, payload: String },
    /// Message on a channel matching a subscribed pattern
    PatternMessage {
        pattern: String,
        channel: String,
        payload: String,
    },
    Subscribe { channel: String, count: usize },
    Unsubscribe { channel: String, count: usize },
    PatternSubscribe { pattern: String, count: usize },
    PatternUnsubscribe { pattern: String, count: usize },
}

impl SubscriptionEvent {
    /// Decodes a raw RESP frame, returns `None` for anything that is not a subscription frame
    pub fn from_value(value: &Value) -> Option<Self> {
        let items = match value {
            Value::Bulk(items) => items,
            _ => return None,
        };

        let kind = text(items.first()?)?;

        let event = match (kind.as_str(), items.len()) {
            ("message", 3) => SubscriptionEvent::Message {
                channel: text(&items[1])?,
                payload: text(&items[2])?,
            },
            ("pmessage", 4) => SubscriptionEvent::PatternMessage {
                pattern: text(&items[1])?,
                channel: text(&items[2])?,
                payload: text(&items[3])?,
            },
            ("subscribe", 3) => SubscriptionEvent::Subscribe {
                channel: text(&items[1])?,
                count: count(&items[2])?,
            },
            ("unsubscribe", 3) => SubscriptionEvent::Unsubscribe {
                channel: text(&items[1])?,
                count: count(&items[2])?,
            },
            ("psubscribe", 3) => SubscriptionEvent::PatternSubscribe {
                pattern: text(&items[1])?,
                count: count(&items[2])?,
            },
            ("punsubscribe", 3) => SubscriptionEvent::PatternUnsubscribe {
                pattern: text(&items[1])?,
                count: count(&items[2])?,
            },
            _ => return None,
        };

        Some(event)
    }
}

// Payloads are arbitrary bytes, only the identifier derivation needs them to be text
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Data(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::Status(status) => Some(status.clone()),
        _ => None,
    }
}

fn count(value: &Value) -> Option<usize> {
    from_redis_value(value).ok()
}

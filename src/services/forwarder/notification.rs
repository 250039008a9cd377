use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender};
use serde::Serialize;

/// Sending half of the downstream notification channel
pub type NotificationSender = UnboundedSender<Notification>;
/// Receiving half of the downstream notification channel
pub type NotificationReceiver = UnboundedReceiver<Notification>;

/// Announces that the state of the entity behind `identifier` has changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    identifier: String,
}

impl Notification {
    pub fn new(identifier: String) -> Self {
        Self { identifier }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

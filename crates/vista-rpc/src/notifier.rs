//! Channel-backed notifier for running a session next to an I/O task.

use crate::protocol::Message;
use serde_json::Value;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{trace, warn};
use vista_types::{Notification, Notifier};

/// Queues every handler call as an outbound `notify` message.
///
/// Sending never blocks. Once the receiving side is gone further calls are
/// dropped; the first drop is logged.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<Message>,
    closed: bool,
}

impl ChannelNotifier {
    #[must_use]
    pub fn new(tx: UnboundedSender<Message>) -> Self {
        Self { tx, closed: false }
    }

    /// Notifier plus the receiving end the writer task drains.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&mut self, handler: &str, args: Vec<Value>) {
        trace!(handler, "Queueing notify");
        let message = Message::from(Notification::new(handler, args));
        if self.tx.send(message).is_err() && !self.closed {
            self.closed = true;
            warn!(handler, "Notification channel closed, dropping handler calls");
        }
    }
}

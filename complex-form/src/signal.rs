//! Fan-out signal channel.
//!
//! Every subscriber gets its own unbounded receiver. Emitting never blocks;
//! senders whose receiver was dropped are pruned on the next emit.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Receiver half handed to a subscriber.
pub type SignalReceiver<T> = mpsc::UnboundedReceiver<T>;

/// A cloneable signal source. Clones share the same subscriber list.
#[derive(Debug)]
pub struct Signal<T> {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<T>>>>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Registers a new subscriber.
    pub fn subscribe(&self) -> SignalReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut guard) = self.subscribers.lock() {
            guard.push(tx);
        }
        rx
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|guard| guard.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

impl<T: Clone> Signal<T> {
    /// Sends `value` to every live subscriber.
    pub fn emit(&self, value: T) {
        if let Ok(mut guard) = self.subscribers.lock() {
            guard.retain(|tx| tx.send(value.clone()).is_ok());
        }
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let signal = Signal::new();
        let mut a = signal.subscribe();
        let mut b = signal.clone().subscribe();

        signal.emit(7);

        assert_eq!(a.try_recv().ok(), Some(7));
        assert_eq!(b.try_recv().ok(), Some(7));
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let signal = Signal::new();
        let rx = signal.subscribe();
        let _keep = signal.subscribe();
        assert_eq!(signal.subscriber_count(), 2);

        drop(rx);
        signal.emit(());

        assert_eq!(signal.subscriber_count(), 1);
    }
}

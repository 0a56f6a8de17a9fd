//! # Event bus for run events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]. A run publishes
//! to it only when one is attached to the [`RunConfig`](crate::RunConfig);
//! the same bus may be shared by several runs.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks, so a slow or absent
//!   listener cannot stall a run or its teardown.
//! - **Bounded capacity**: receivers that fall behind observe
//!   `RecvError::Lagged(n)` and skip the `n` oldest events.
//! - **No persistence**: events sent while nobody subscribes are dropped.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for run events.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus; capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers (dropped if there are none).
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver observing events sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[test]
    fn publish_without_receivers_is_a_no_op() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::RunStarting));
    }

    #[test]
    fn receivers_see_events_in_order() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::RunStarting));
        bus.publish(Event::new(EventKind::ActionStarting).with_action("fetch"));

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.kind, EventKind::RunStarting);
        assert_eq!(second.kind, EventKind::ActionStarting);
        assert!(first.seq < second.seq);
    }
}

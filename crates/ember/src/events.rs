//! # Effect Events
//!
//! Notifications published by the spawner and the frame driver.
//!
//! ```text
//! Spawner ──┐
//!           ├──> [bounded channel] ──> network replication, audio, UI
//! FxLoop  ──┘
//! ```
//!
//! Sending never blocks the tick: when the channel is full the event is
//! dropped and a warning is logged.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use ember_fx::EffectKind;
use ember_world::ObjectId;
use glam::Vec3;

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Events emitted by the effects subsystem.
#[derive(Clone, Debug, PartialEq)]
pub enum FxEvent {
    /// A particle effect object was registered.
    EffectSpawned {
        /// The new object.
        id: ObjectId,
        /// Effect kind.
        kind: EffectKind,
        /// `<tag>|<config>`, enough to rebuild the effect remotely.
        identity: String,
        /// Spawn location.
        position: Vec3,
    },

    /// A sound emitter object was registered.
    SoundSpawned {
        /// The new object.
        id: ObjectId,
        /// Audio resource path.
        resource_path: String,
        /// Spawn location.
        position: Vec3,
    },

    /// An object was destroyed by the removal scheduler.
    ObjectRemoved {
        /// The destroyed object.
        id: ObjectId,
    },

    /// A hit took an object from positive health to zero or below.
    ObjectKilled {
        /// The killed object.
        victim: ObjectId,
        /// Who dealt the hit; [`ObjectId::NULL`] if nobody.
        dealer: ObjectId,
        /// Where the killing hit landed.
        hitpoint: Vec3,
    },
}

/// Bounded channel pair for [`FxEvent`]s.
pub struct EventBus {
    sender: Sender<FxEvent>,
    receiver: Receiver<FxEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Handle for publishing events.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: Sender<FxEvent>,
}

impl EventSender {
    /// Publishes an event without blocking.
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: FxEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!("Event channel full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for consuming events.
#[derive(Clone, Debug)]
pub struct EventReceiver {
    receiver: Receiver<FxEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    #[inline]
    pub fn drain(&self) -> Vec<FxEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one pending event, if any.
    #[inline]
    pub fn try_recv(&self) -> Option<FxEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removed(index: u32) -> FxEvent {
        FxEvent::ObjectRemoved {
            id: ObjectId::new(index, 1),
        }
    }

    #[test]
    fn test_send_receive() {
        let (tx, rx) = EventBus::create_pair(16);
        assert!(tx.send(removed(1)));
        assert!(tx.send(removed(2)));
        assert_eq!(rx.pending_count(), 2);
        assert_eq!(rx.drain(), vec![removed(1), removed(2)]);
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn test_full_channel_drops() {
        let (tx, rx) = EventBus::create_pair(1);
        assert!(tx.send(removed(1)));
        assert!(!tx.send(removed(2)));
        assert_eq!(rx.drain(), vec![removed(1)]);
    }

    #[test]
    fn test_disconnected_drops() {
        let tx = EventBus::new(4).sender();
        assert!(!tx.send(removed(1)));
    }
}

// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A thread-safe, unbounded event channel.
///
/// The bus owns both ends. Producers get a cloned [`flume::Sender`] through
/// [`sender`](EventBus::sender); the owner drains what was published with
/// [`drain`](EventBus::drain) once per frame.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a bus backed by an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        log::debug!("Accessibility EventBus initialized.");
        Self { sender, receiver }
    }

    /// Publishes an event. Never blocks.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing an accessibility event.");
        // The bus holds its own receiver, so sending cannot observe a disconnect.
        let _ = self.sender.send(event);
    }

    /// Returns a clone of the sender end, for producers.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns the receiver end, for the owner.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Takes every event published so far, oldest first.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of events waiting to be drained.
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::AccessibilityEvent;
    use crate::text::TextBackplateBehavior;
    use crate::{Classification, EntityId};
    use std::thread;

    fn registered(index: u32) -> AccessibilityEvent {
        AccessibilityEvent::ObjectRegistered {
            object: EntityId::new(index, 0),
            classification: Classification::THINGS,
        }
    }

    #[test]
    fn test_new_bus_is_empty() {
        let bus = EventBus::<AccessibilityEvent>::new();
        assert_eq!(bus.pending(), 0);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_drain_preserves_publish_order() {
        let bus = EventBus::new();
        bus.publish(registered(1));
        bus.publish(AccessibilityEvent::InvertTextColorChanged(true));
        bus.publish(AccessibilityEvent::TextBackplateBehaviorChanged(
            TextBackplateBehavior::Constant,
        ));

        assert_eq!(bus.pending(), 3);
        assert_eq!(
            bus.drain(),
            vec![
                registered(1),
                AccessibilityEvent::InvertTextColorChanged(true),
                AccessibilityEvent::TextBackplateBehaviorChanged(TextBackplateBehavior::Constant),
            ]
        );
        assert_eq!(bus.pending(), 0);
    }

    #[test]
    fn test_send_from_thread() {
        let bus = EventBus::new();
        let sender = bus.sender();

        let handle = thread::spawn(move || {
            sender.send(registered(9)).expect("Send from thread failed");
        });
        handle.join().expect("Thread join failed");

        assert_eq!(bus.drain(), vec![registered(9)]);
    }

    #[test]
    fn test_sender_fails_after_bus_drop() {
        let bus = EventBus::new();
        let sender = bus.sender();
        drop(bus);

        assert!(sender.send(registered(2)).is_err());
    }
}

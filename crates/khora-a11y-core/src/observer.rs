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

//! Synchronous, ordered change notification.
//!
//! [`Observers`] is the in-thread counterpart of the [`EventBus`](crate::EventBus):
//! callbacks run immediately on the caller's thread, in the order they
//! subscribed. Subscribers hold a [`SubscriptionId`] and must unsubscribe
//! explicitly; nothing is captured weakly.

use std::fmt;

/// A boxed change callback receiving the new value.
pub type Callback<T> = Box<dyn FnMut(T) + Send>;

/// Handle returned by [`Observers::subscribe`].
///
/// Ids are never reused within one observer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// An ordered list of change callbacks.
pub struct Observers<T> {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T: Clone> Observers<T> {
    /// Creates an empty observer list.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Appends a callback and returns the id to unsubscribe it with.
    pub fn subscribe(&mut self, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Removes a callback. Returns `false` if `id` is not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                // `remove`, not `swap_remove`: notification order must survive.
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Calls every callback with `value`, in subscription order.
    pub fn notify(&mut self, value: T) {
        for (_, callback) in &mut self.entries {
            callback(value.clone());
        }
    }

    /// Returns the number of subscribed callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

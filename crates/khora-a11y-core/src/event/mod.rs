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

//! Engine-facing accessibility events.
//!
//! Change callbacks ([`Observers`](crate::Observers)) run synchronously on the
//! thread that changed a preference. Systems living elsewhere (an editor
//! panel, a telemetry sink) instead drain [`AccessibilityEvent`]s from an
//! [`EventBus`], a generic MPSC channel.

mod bus;

pub use self::bus::EventBus;

use crate::classification::Classification;
use crate::entity::EntityId;
use crate::text::TextBackplateBehavior;

/// Something observable happened inside the accessibility subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessibilityEvent {
    /// An object was registered.
    ObjectRegistered {
        /// The registered object.
        object: EntityId,
        /// The classification it was registered under.
        classification: Classification,
    },
    /// An object was unregistered, explicitly or by a validity sweep.
    ObjectUnregistered {
        /// The object that left the registry.
        object: EntityId,
        /// The classification it held.
        classification: Classification,
    },
    /// The global text backplate behavior changed.
    TextBackplateBehaviorChanged(TextBackplateBehavior),
    /// The global text color inversion preference changed.
    InvertTextColorChanged(bool),
}

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

//! Scene object identity as seen by the accessibility subsystem.
//!
//! The subsystem never owns scene objects. It stores [`EntityId`]s and asks
//! the host, through [`SceneQuery`], whether an id still refers to a live
//! object.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a scene object.
///
/// It combines an index with a generation count. When the host destroys an
/// object its index may be recycled, but the generation is incremented, so a
/// stale `EntityId` held by the registry never aliases the new object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    /// The slot index of the object in the host's object table.
    pub index: u32,
    /// A generation counter that is incremented each time the index is recycled.
    pub generation: u32,
}

impl EntityId {
    /// Creates an id from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Host-side liveness oracle for scene objects.
///
/// Registration rejects ids that are not alive, and the explicit validity
/// sweep drops registrations whose objects have since been destroyed.
pub trait SceneQuery {
    /// Returns `true` if `object` refers to an object that currently exists.
    fn is_alive(&self, object: EntityId) -> bool;
}

/// A plain set of live ids, for hosts that track liveness themselves.
impl SceneQuery for HashSet<EntityId> {
    fn is_alive(&self, object: EntityId) -> bool {
        self.contains(&object)
    }
}

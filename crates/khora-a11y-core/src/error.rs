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

//! Error type shared by every accessibility operation that can be rejected.

use crate::classification::Classification;
use crate::entity::EntityId;

/// Why a registry operation was rejected.
///
/// None of these are fatal. A rejected operation leaves the registry exactly
/// as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessibilityError {
    /// The subsystem has not been started, or has been stopped.
    #[error("accessibility subsystem is not running")]
    NotRunning,
    /// The object does not refer to a live scene object.
    #[error("object {0} is not a live scene object")]
    InvalidObject(EntityId),
    /// A classification key was empty.
    #[error("classification key must not be empty")]
    InvalidClassification,
    /// The classification is not part of the provider's table.
    #[error("classification '{0}' is not defined")]
    UnknownClassification(Classification),
    /// The object already belongs to a classification.
    #[error("object {object} is already registered as '{existing}'")]
    AlreadyRegistered {
        /// The object that was being registered.
        object: EntityId,
        /// The classification it currently holds.
        existing: Classification,
    },
    /// No registration exists for this exact object and classification.
    #[error("object {object} is not registered as '{classification}'")]
    NotRegistered {
        /// The object that was being unregistered.
        object: EntityId,
        /// The classification that was supplied.
        classification: Classification,
    },
}

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

//! # Khora Accessibility Core
//!
//! Contract crate for the accessibility subsystem: the types, traits and
//! primitives shared by every provider implementation and by the host engine.
//!
//! It knows nothing about how registrations are stored or how a provider
//! decides anything. It only fixes the vocabulary:
//! - [`Classification`] and [`ClassificationTable`] for accessible objects.
//! - [`TextBackplateBehavior`], [`PresentationMode`] and the text-rendering
//!   collaborator traits [`TextRenderer`] and [`TextMaterial`].
//! - The [`Accessibility`] interface implemented by providers and subsystems.
//! - [`Observers`] for synchronous change notification and [`EventBus`] for
//!   cross-thread event delivery.

#![warn(missing_docs)]

pub mod classification;
pub mod entity;
pub mod error;
pub mod event;
pub mod interface;
pub mod observer;
pub mod text;

pub use classification::{Classification, ClassificationTable};
pub use entity::{EntityId, SceneQuery};
pub use error::AccessibilityError;
pub use event::{AccessibilityEvent, EventBus};
pub use interface::Accessibility;
pub use observer::{Callback, Observers, SubscriptionId};
pub use text::{
    ApplyOutcome, ApplyReport, PresentationMode, TextBackplateBehavior, TextMaterial,
    TextMesh, TextMeshMaterial, TextRenderer,
};

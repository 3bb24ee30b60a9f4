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

//! # Khora Accessibility
//!
//! The accessibility subsystem of the engine.
//!
//! - [`AccessibilityProvider`] owns the state: the accessible object registry
//!   and the text preferences with their observers.
//! - [`AccessibilitySubsystem`] wraps a provider, adds a start/stop lifecycle
//!   and forwards every change to an optional engine event channel.
//! - [`AccessibilitySettings`] is the RON-loadable configuration both are
//!   built from.
//! - [`apply_text_preferences`] pushes the current preferences to a batch of
//!   live text renderers.

#![warn(missing_docs)]

pub mod provider;
pub mod settings;
pub mod subsystem;
pub mod text;

pub use provider::AccessibilityProvider;
pub use settings::{AccessibilitySettings, SettingsError};
pub use subsystem::AccessibilitySubsystem;
pub use text::apply_text_preferences;

pub use khora_a11y_core::{
    Accessibility, AccessibilityError, AccessibilityEvent, ApplyOutcome, ApplyReport, Callback,
    Classification, ClassificationTable, EntityId, EventBus, PresentationMode, SceneQuery,
    SubscriptionId, TextBackplateBehavior, TextMaterial, TextMesh, TextMeshMaterial, TextRenderer,
};

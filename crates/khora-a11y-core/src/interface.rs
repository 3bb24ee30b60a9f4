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

//! The accessibility interface shared by providers and subsystems.

use crate::classification::Classification;
use crate::entity::{EntityId, SceneQuery};
use crate::error::AccessibilityError;
use crate::observer::{Callback, SubscriptionId};
use crate::text::{ApplyOutcome, PresentationMode, TextBackplateBehavior, TextMaterial, TextRenderer};

/// Portable set of capabilities of an accessibility subsystem.
///
/// Both the subsystem and the provider it wraps implement this trait; the
/// subsystem forwards to its provider and adds lifecycle on top.
///
/// Preferences (`text_backplate_behavior`, `invert_text_color`) are global
/// state. Their setters notify subscribers synchronously, after the state has
/// been updated, and only when the value actually changes. The `apply_*`
/// operations push an effect to a single target and never touch the
/// preferences.
pub trait Accessibility {
    // --- Accessible object management ---

    /// Replaces the content of `classifications` with every classification
    /// that currently has at least one registered object, in the order they
    /// were first registered.
    ///
    /// An empty result is a success.
    fn query_classifications(
        &self,
        classifications: &mut Vec<Classification>,
    ) -> Result<(), AccessibilityError>;

    /// Registers `object` under `classification`.
    ///
    /// An object belongs to at most one classification; registering an
    /// object that is already registered fails, whatever the classification.
    fn register_object(
        &mut self,
        scene: &dyn SceneQuery,
        object: EntityId,
        classification: &Classification,
    ) -> Result<(), AccessibilityError>;

    /// Removes the registration of `object` under exactly `classification`.
    fn unregister_object(
        &mut self,
        object: EntityId,
        classification: &Classification,
    ) -> Result<(), AccessibilityError>;

    /// Returns the classification `object` is registered under, if any.
    fn registered_classification(&self, object: EntityId) -> Option<&Classification>;

    /// Returns the number of registered objects.
    fn registration_count(&self) -> usize;

    /// Drops every registration whose object is no longer alive in `scene`.
    ///
    /// Registrations are never removed implicitly when the host destroys an
    /// object; hosts call this (or unregister first) to reclaim them.
    /// Returns the removed registrations, ordered by object id.
    fn sweep_destroyed(&mut self, scene: &dyn SceneQuery) -> Vec<(EntityId, Classification)>;

    // --- Text backplate behavior ---

    /// The global text backplate behavior.
    fn text_backplate_behavior(&self) -> TextBackplateBehavior;

    /// Sets the global text backplate behavior, notifying subscribers if it
    /// changed.
    fn set_text_backplate_behavior(&mut self, behavior: TextBackplateBehavior);

    /// Subscribes to backplate behavior changes.
    fn subscribe_text_backplate_behavior(
        &mut self,
        callback: Callback<TextBackplateBehavior>,
    ) -> SubscriptionId;

    /// Unsubscribes from backplate behavior changes.
    fn unsubscribe_text_backplate_behavior(&mut self, id: SubscriptionId) -> bool;

    /// Pushes `behavior` to one text renderer's backplate.
    fn apply_text_backplate_behavior(
        &self,
        target: &mut dyn TextRenderer,
        behavior: TextBackplateBehavior,
    ) -> ApplyOutcome;

    // --- Text color inversion ---

    /// The global text color inversion preference.
    fn invert_text_color(&self) -> bool;

    /// Sets the global text color inversion preference, notifying subscribers
    /// if it changed.
    fn set_invert_text_color(&mut self, invert: bool);

    /// Subscribes to inversion preference changes.
    fn subscribe_invert_text_color(&mut self, callback: Callback<bool>) -> SubscriptionId;

    /// Unsubscribes from inversion preference changes.
    fn unsubscribe_invert_text_color(&mut self, id: SubscriptionId) -> bool;

    /// Enables or disables color inversion on one material.
    fn apply_text_color_inversion(
        &self,
        material: &mut dyn TextMaterial,
        enable: bool,
    ) -> ApplyOutcome;

    // --- Environment ---

    /// How the application is currently presented; resolves
    /// [`TextBackplateBehavior::Automatic`].
    fn presentation_mode(&self) -> PresentationMode;

    /// Updates the presentation mode.
    fn set_presentation_mode(&mut self, mode: PresentationMode);
}

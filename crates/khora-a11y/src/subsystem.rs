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

//! The accessibility subsystem facade.
//!
//! The subsystem is what the engine talks to. It wraps a provider
//! implementing [`Accessibility`], gates the registry behind a start/stop
//! lifecycle, and mirrors every effective change onto an optional engine
//! event channel so that systems on other threads can react.

use khora_a11y_core::{
    Accessibility, AccessibilityError, AccessibilityEvent, ApplyOutcome, Callback, Classification,
    EntityId, PresentationMode, SceneQuery, SubscriptionId, TextBackplateBehavior, TextMaterial,
    TextRenderer,
};

use crate::provider::AccessibilityProvider;
use crate::settings::AccessibilitySettings;

/// Lifecycle wrapper around an accessibility provider.
///
/// While stopped, the registry operations (`query_classifications`,
/// `register_object`, `unregister_object`, `sweep_destroyed`) are rejected
/// with [`AccessibilityError::NotRunning`]. Preferences and `apply_*`
/// operations stay available.
#[derive(Debug)]
pub struct AccessibilitySubsystem<P: Accessibility = AccessibilityProvider> {
    provider: P,
    running: bool,
    events: Option<flume::Sender<AccessibilityEvent>>,
}

impl AccessibilitySubsystem<AccessibilityProvider> {
    /// Builds a subsystem with the default provider configured by `settings`.
    ///
    /// The subsystem is started right away if `settings.start_on_create` is set.
    pub fn from_settings(settings: &AccessibilitySettings) -> Self {
        let mut subsystem = Self::new(AccessibilityProvider::from_settings(settings));
        if settings.start_on_create {
            subsystem.start();
        }
        subsystem
    }
}

impl<P: Accessibility> AccessibilitySubsystem<P> {
    /// Wraps `provider`. The subsystem starts stopped.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            running: false,
            events: None,
        }
    }

    /// Starts the subsystem. Does nothing if it is already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            log::info!("Accessibility subsystem started.");
        }
    }

    /// Stops the subsystem. Registrations are kept and become reachable
    /// again after the next [`start`](Self::start).
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Accessibility subsystem stopped.");
        }
    }

    /// Returns `true` between [`start`](Self::start) and [`stop`](Self::stop).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Forwards every subsequent change to `sender`, replacing any previous
    /// channel.
    pub fn attach_event_sender(&mut self, sender: flume::Sender<AccessibilityEvent>) {
        self.events = Some(sender);
    }

    /// Stops forwarding changes to the event channel.
    pub fn detach_event_sender(&mut self) {
        self.events = None;
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The wrapped provider, mutably. Changes made directly on the provider
    /// bypass the lifecycle gate and are not published as events.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    fn ensure_running(&self) -> Result<(), AccessibilityError> {
        if self.running {
            Ok(())
        } else {
            Err(AccessibilityError::NotRunning)
        }
    }

    fn publish(&self, event: AccessibilityEvent) {
        let Some(sender) = &self.events else {
            return;
        };
        log::trace!("Publishing {event:?}.");
        if let Err(e) = sender.send(event) {
            log::error!("Failed to send accessibility event: {e}. Receiver likely disconnected.");
        }
    }
}

impl<P: Accessibility> Accessibility for AccessibilitySubsystem<P> {
    fn query_classifications(
        &self,
        classifications: &mut Vec<Classification>,
    ) -> Result<(), AccessibilityError> {
        self.ensure_running()?;
        self.provider.query_classifications(classifications)
    }

    fn register_object(
        &mut self,
        scene: &dyn SceneQuery,
        object: EntityId,
        classification: &Classification,
    ) -> Result<(), AccessibilityError> {
        self.ensure_running()?;
        self.provider.register_object(scene, object, classification)?;
        self.publish(AccessibilityEvent::ObjectRegistered {
            object,
            classification: classification.clone(),
        });
        Ok(())
    }

    fn unregister_object(
        &mut self,
        object: EntityId,
        classification: &Classification,
    ) -> Result<(), AccessibilityError> {
        self.ensure_running()?;
        self.provider.unregister_object(object, classification)?;
        self.publish(AccessibilityEvent::ObjectUnregistered {
            object,
            classification: classification.clone(),
        });
        Ok(())
    }

    fn registered_classification(&self, object: EntityId) -> Option<&Classification> {
        self.provider.registered_classification(object)
    }

    fn registration_count(&self) -> usize {
        self.provider.registration_count()
    }

    fn sweep_destroyed(&mut self, scene: &dyn SceneQuery) -> Vec<(EntityId, Classification)> {
        if !self.running {
            log::warn!("Validity sweep requested while the accessibility subsystem is stopped.");
            return Vec::new();
        }
        let removed = self.provider.sweep_destroyed(scene);
        for (object, classification) in &removed {
            self.publish(AccessibilityEvent::ObjectUnregistered {
                object: *object,
                classification: classification.clone(),
            });
        }
        removed
    }

    fn text_backplate_behavior(&self) -> TextBackplateBehavior {
        self.provider.text_backplate_behavior()
    }

    fn set_text_backplate_behavior(&mut self, behavior: TextBackplateBehavior) {
        let previous = self.provider.text_backplate_behavior();
        self.provider.set_text_backplate_behavior(behavior);
        if previous != self.provider.text_backplate_behavior() {
            self.publish(AccessibilityEvent::TextBackplateBehaviorChanged(behavior));
        }
    }

    fn subscribe_text_backplate_behavior(
        &mut self,
        callback: Callback<TextBackplateBehavior>,
    ) -> SubscriptionId {
        self.provider.subscribe_text_backplate_behavior(callback)
    }

    fn unsubscribe_text_backplate_behavior(&mut self, id: SubscriptionId) -> bool {
        self.provider.unsubscribe_text_backplate_behavior(id)
    }

    fn apply_text_backplate_behavior(
        &self,
        target: &mut dyn TextRenderer,
        behavior: TextBackplateBehavior,
    ) -> ApplyOutcome {
        self.provider.apply_text_backplate_behavior(target, behavior)
    }

    fn invert_text_color(&self) -> bool {
        self.provider.invert_text_color()
    }

    fn set_invert_text_color(&mut self, invert: bool) {
        let previous = self.provider.invert_text_color();
        self.provider.set_invert_text_color(invert);
        if previous != self.provider.invert_text_color() {
            self.publish(AccessibilityEvent::InvertTextColorChanged(invert));
        }
    }

    fn subscribe_invert_text_color(&mut self, callback: Callback<bool>) -> SubscriptionId {
        self.provider.subscribe_invert_text_color(callback)
    }

    fn unsubscribe_invert_text_color(&mut self, id: SubscriptionId) -> bool {
        self.provider.unsubscribe_invert_text_color(id)
    }

    fn apply_text_color_inversion(
        &self,
        material: &mut dyn TextMaterial,
        enable: bool,
    ) -> ApplyOutcome {
        self.provider.apply_text_color_inversion(material, enable)
    }

    fn presentation_mode(&self) -> PresentationMode {
        self.provider.presentation_mode()
    }

    fn set_presentation_mode(&mut self, mode: PresentationMode) {
        self.provider.set_presentation_mode(mode);
    }
}

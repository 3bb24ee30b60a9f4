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

//! The default accessibility provider.

use std::collections::HashMap;

use khora_a11y_core::{
    Accessibility, AccessibilityError, ApplyOutcome, Callback, Classification,
    ClassificationTable, EntityId, Observers, PresentationMode, SceneQuery, SubscriptionId,
    TextBackplateBehavior, TextMaterial, TextRenderer,
};

use crate::settings::AccessibilitySettings;
use crate::text;

/// A classification with at least one registered object.
#[derive(Debug)]
struct ClassificationGroup {
    classification: Classification,
    members: usize,
}

/// Owns the accessible object registry and the text preferences.
///
/// Classifications reported by
/// [`query_classifications`](Accessibility::query_classifications) are a view
/// derived from live registrations: a classification appears when its first
/// object registers and disappears with its last one.
#[derive(Debug)]
pub struct AccessibilityProvider {
    table: ClassificationTable,
    registrations: HashMap<EntityId, Classification>,
    // Discovery order of the classifications currently in use.
    groups: Vec<ClassificationGroup>,
    text_shader: String,
    presentation_mode: PresentationMode,
    text_backplate_behavior: TextBackplateBehavior,
    backplate_observers: Observers<TextBackplateBehavior>,
    invert_text_color: bool,
    invert_observers: Observers<bool>,
}

impl AccessibilityProvider {
    /// Creates a provider with default settings.
    pub fn new() -> Self {
        Self::from_settings(&AccessibilitySettings::default())
    }

    /// Creates a provider initialised from `settings`.
    pub fn from_settings(settings: &AccessibilitySettings) -> Self {
        Self {
            table: settings.classification_table(),
            registrations: HashMap::new(),
            groups: Vec::new(),
            text_shader: settings.text_shader.clone(),
            presentation_mode: settings.presentation_mode,
            text_backplate_behavior: settings.text_backplate_behavior,
            backplate_observers: Observers::new(),
            invert_text_color: settings.invert_text_color,
            invert_observers: Observers::new(),
        }
    }

    /// The classifications this provider accepts.
    pub fn classification_table(&self) -> &ClassificationTable {
        &self.table
    }

    /// Accepts a new classification. Returns `false` if it was already defined.
    pub fn define_classification(&mut self, classification: Classification) -> bool {
        self.table.define(classification)
    }

    /// The shader a text material must use to receive affordances.
    pub fn text_shader(&self) -> &str {
        &self.text_shader
    }

    fn remove_entry(&mut self, object: EntityId) -> Option<Classification> {
        let classification = self.registrations.remove(&object)?;
        if let Some(index) = self
            .groups
            .iter()
            .position(|group| group.classification == classification)
        {
            self.groups[index].members -= 1;
            if self.groups[index].members == 0 {
                self.groups.remove(index);
            }
        }
        Some(classification)
    }
}

impl Default for AccessibilityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Accessibility for AccessibilityProvider {
    fn query_classifications(
        &self,
        classifications: &mut Vec<Classification>,
    ) -> Result<(), AccessibilityError> {
        classifications.clear();
        classifications.extend(self.groups.iter().map(|group| group.classification.clone()));
        Ok(())
    }

    fn register_object(
        &mut self,
        scene: &dyn SceneQuery,
        object: EntityId,
        classification: &Classification,
    ) -> Result<(), AccessibilityError> {
        if !scene.is_alive(object) {
            return Err(AccessibilityError::InvalidObject(object));
        }
        if !self.table.contains(classification) {
            return Err(AccessibilityError::UnknownClassification(
                classification.clone(),
            ));
        }
        if let Some(existing) = self.registrations.get(&object) {
            return Err(AccessibilityError::AlreadyRegistered {
                object,
                existing: existing.clone(),
            });
        }

        self.registrations.insert(object, classification.clone());
        match self
            .groups
            .iter_mut()
            .find(|group| &group.classification == classification)
        {
            Some(group) => group.members += 1,
            None => self.groups.push(ClassificationGroup {
                classification: classification.clone(),
                members: 1,
            }),
        }
        log::debug!("Registered accessible object {object} as '{classification}'.");
        Ok(())
    }

    fn unregister_object(
        &mut self,
        object: EntityId,
        classification: &Classification,
    ) -> Result<(), AccessibilityError> {
        if self.registrations.get(&object) != Some(classification) {
            return Err(AccessibilityError::NotRegistered {
                object,
                classification: classification.clone(),
            });
        }
        self.remove_entry(object);
        log::debug!("Unregistered accessible object {object} from '{classification}'.");
        Ok(())
    }

    fn registered_classification(&self, object: EntityId) -> Option<&Classification> {
        self.registrations.get(&object)
    }

    fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    fn sweep_destroyed(&mut self, scene: &dyn SceneQuery) -> Vec<(EntityId, Classification)> {
        let mut dead: Vec<EntityId> = self
            .registrations
            .keys()
            .copied()
            .filter(|object| !scene.is_alive(*object))
            .collect();
        dead.sort();

        let removed: Vec<_> = dead
            .into_iter()
            .filter_map(|object| self.remove_entry(object).map(|c| (object, c)))
            .collect();
        if !removed.is_empty() {
            log::debug!("Swept {} destroyed accessible objects.", removed.len());
        }
        removed
    }

    fn text_backplate_behavior(&self) -> TextBackplateBehavior {
        self.text_backplate_behavior
    }

    fn set_text_backplate_behavior(&mut self, behavior: TextBackplateBehavior) {
        if self.text_backplate_behavior == behavior {
            return;
        }
        self.text_backplate_behavior = behavior;
        log::debug!("Text backplate behavior changed to {behavior:?}.");
        self.backplate_observers.notify(behavior);
    }

    fn subscribe_text_backplate_behavior(
        &mut self,
        callback: Callback<TextBackplateBehavior>,
    ) -> SubscriptionId {
        self.backplate_observers.subscribe(callback)
    }

    fn unsubscribe_text_backplate_behavior(&mut self, id: SubscriptionId) -> bool {
        self.backplate_observers.unsubscribe(id)
    }

    fn apply_text_backplate_behavior(
        &self,
        target: &mut dyn TextRenderer,
        behavior: TextBackplateBehavior,
    ) -> ApplyOutcome {
        text::apply_backplate(target, behavior, self.presentation_mode, &self.text_shader)
    }

    fn invert_text_color(&self) -> bool {
        self.invert_text_color
    }

    fn set_invert_text_color(&mut self, invert: bool) {
        if self.invert_text_color == invert {
            return;
        }
        self.invert_text_color = invert;
        log::debug!("Text color inversion changed to {invert}.");
        self.invert_observers.notify(invert);
    }

    fn subscribe_invert_text_color(&mut self, callback: Callback<bool>) -> SubscriptionId {
        self.invert_observers.subscribe(callback)
    }

    fn unsubscribe_invert_text_color(&mut self, id: SubscriptionId) -> bool {
        self.invert_observers.unsubscribe(id)
    }

    fn apply_text_color_inversion(
        &self,
        material: &mut dyn TextMaterial,
        enable: bool,
    ) -> ApplyOutcome {
        text::apply_inversion(material, enable, &self.text_shader)
    }

    fn presentation_mode(&self) -> PresentationMode {
        self.presentation_mode
    }

    fn set_presentation_mode(&mut self, mode: PresentationMode) {
        if self.presentation_mode != mode {
            log::info!("Presentation mode changed to {mode:?}.");
            self.presentation_mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scene(ids: &[EntityId]) -> HashSet<EntityId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_query_replaces_previous_content() {
        let o1 = EntityId::new(1, 0);
        let live = scene(&[o1]);
        let mut provider = AccessibilityProvider::new();
        provider
            .register_object(&live, o1, &Classification::PLACES)
            .unwrap();

        let mut out = vec![Classification::PEOPLE, Classification::THINGS];
        provider.query_classifications(&mut out).unwrap();
        assert_eq!(out, vec![Classification::PLACES]);
    }

    #[test]
    fn test_groups_follow_discovery_order() {
        let ids: Vec<_> = (0..4).map(|i| EntityId::new(i, 0)).collect();
        let live = scene(&ids);
        let mut provider = AccessibilityProvider::new();
        provider.register_object(&live, ids[0], &Classification::THINGS).unwrap();
        provider.register_object(&live, ids[1], &Classification::PEOPLE).unwrap();
        provider.register_object(&live, ids[2], &Classification::THINGS).unwrap();

        let mut out = Vec::new();
        provider.query_classifications(&mut out).unwrap();
        assert_eq!(out, vec![Classification::THINGS, Classification::PEOPLE]);

        // THINGS keeps its place while it still has a member.
        provider.unregister_object(ids[0], &Classification::THINGS).unwrap();
        provider.query_classifications(&mut out).unwrap();
        assert_eq!(out, vec![Classification::THINGS, Classification::PEOPLE]);
    }

    #[test]
    fn test_unknown_classification_until_defined() {
        let o1 = EntityId::new(1, 0);
        let live = scene(&[o1]);
        let vehicles = Classification::new("vehicles").unwrap();
        let mut provider = AccessibilityProvider::new();

        assert_eq!(
            provider.register_object(&live, o1, &vehicles),
            Err(AccessibilityError::UnknownClassification(vehicles.clone()))
        );
        assert!(provider.define_classification(vehicles.clone()));
        assert!(provider.register_object(&live, o1, &vehicles).is_ok());
        assert_eq!(provider.registered_classification(o1), Some(&vehicles));
    }

    #[test]
    fn test_settings_seed_preferences() {
        let settings = AccessibilitySettings {
            text_backplate_behavior: TextBackplateBehavior::Constant,
            invert_text_color: true,
            presentation_mode: PresentationMode::Immersive,
            text_shader: "Custom/Text".to_owned(),
            ..Default::default()
        };
        let provider = AccessibilityProvider::from_settings(&settings);
        assert_eq!(provider.text_backplate_behavior(), TextBackplateBehavior::Constant);
        assert!(provider.invert_text_color());
        assert_eq!(provider.presentation_mode(), PresentationMode::Immersive);
        assert_eq!(provider.text_shader(), "Custom/Text");
    }

    #[test]
    fn test_sweep_only_removes_dead_objects() {
        let alive = EntityId::new(1, 0);
        let doomed = EntityId::new(2, 0);
        let mut live = scene(&[alive, doomed]);
        let mut provider = AccessibilityProvider::new();
        provider.register_object(&live, alive, &Classification::PEOPLE).unwrap();
        provider.register_object(&live, doomed, &Classification::PLACES).unwrap();

        live.remove(&doomed);
        assert_eq!(
            provider.sweep_destroyed(&live),
            vec![(doomed, Classification::PLACES)]
        );
        assert!(provider.sweep_destroyed(&live).is_empty());

        let mut out = Vec::new();
        provider.query_classifications(&mut out).unwrap();
        assert_eq!(out, vec![Classification::PEOPLE]);
        assert_eq!(provider.registration_count(), 1);
    }
}

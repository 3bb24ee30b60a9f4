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

use std::sync::{Arc, Mutex};

use khora_a11y::text::apply_text_preferences;
use khora_a11y::{
    Accessibility, AccessibilityEvent, AccessibilityProvider, AccessibilitySettings,
    AccessibilitySubsystem, ApplyOutcome, ApplyReport, EventBus, PresentationMode,
    TextBackplateBehavior, TextMaterial, TextMesh, TextMeshMaterial, TextRenderer,
};
use khora_a11y_core::text::{
    BACKPLATE_KEYWORD, BACKPLATE_MODE_PROPERTY, INVERT_COLOR_PROPERTY, INVERT_TEXT_COLOR_KEYWORD,
};

const SHADER: &str = khora_a11y::settings::DEFAULT_TEXT_SHADER;

/// Collects every value a callback receives.
fn recorder<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, Box<dyn FnMut(T) + Send>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    (received, Box::new(move |value: T| sink.lock().unwrap().push(value)))
}

fn caption(text: &str) -> TextMesh {
    TextMesh::new(text, TextMeshMaterial::new(SHADER))
}

#[test]
fn test_backplate_event_scenario() {
    let mut subsystem = AccessibilitySubsystem::from_settings(&AccessibilitySettings::default());
    let (received, callback) = recorder();
    subsystem.subscribe_text_backplate_behavior(callback);
    assert_eq!(subsystem.text_backplate_behavior(), TextBackplateBehavior::None);

    subsystem.set_text_backplate_behavior(TextBackplateBehavior::Automatic);
    assert_eq!(*received.lock().unwrap(), vec![TextBackplateBehavior::Automatic]);
    assert_eq!(subsystem.text_backplate_behavior(), TextBackplateBehavior::Automatic);

    subsystem.set_text_backplate_behavior(TextBackplateBehavior::Automatic);
    assert_eq!(received.lock().unwrap().len(), 1);
    assert_eq!(subsystem.text_backplate_behavior(), TextBackplateBehavior::Automatic);
}

#[test]
fn test_setting_current_value_fires_nothing() {
    let mut provider = AccessibilityProvider::new();
    let (backplates, on_backplate) = recorder();
    let (inversions, on_invert) = recorder();
    provider.subscribe_text_backplate_behavior(on_backplate);
    provider.subscribe_invert_text_color(on_invert);

    provider.set_text_backplate_behavior(TextBackplateBehavior::None);
    provider.set_invert_text_color(false);

    assert!(backplates.lock().unwrap().is_empty());
    assert!(inversions.lock().unwrap().is_empty());
}

#[test]
fn test_invert_color_fires_exactly_once_per_change() {
    let mut provider = AccessibilityProvider::new();
    let (received, callback) = recorder();
    provider.subscribe_invert_text_color(callback);

    provider.set_invert_text_color(true);
    provider.set_invert_text_color(true);
    assert_eq!(*received.lock().unwrap(), vec![true]);
    assert!(provider.invert_text_color());

    provider.set_invert_text_color(false);
    assert_eq!(*received.lock().unwrap(), vec![true, false]);
    assert!(!provider.invert_text_color());
}

#[test]
fn test_subscribers_observe_updated_state_in_order() {
    let mut provider = AccessibilityProvider::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["first", "second"] {
        let order = Arc::clone(&order);
        provider.subscribe_text_backplate_behavior(Box::new(move |behavior: TextBackplateBehavior| {
            order.lock().unwrap().push((name, behavior));
        }));
    }

    provider.set_text_backplate_behavior(TextBackplateBehavior::Constant);

    assert_eq!(
        *order.lock().unwrap(),
        vec![
            ("first", TextBackplateBehavior::Constant),
            ("second", TextBackplateBehavior::Constant),
        ]
    );
}

#[test]
fn test_unsubscribed_callback_is_silent() {
    let mut subsystem = AccessibilitySubsystem::new(AccessibilityProvider::new());
    let (received, callback) = recorder();
    let id = subsystem.subscribe_invert_text_color(callback);

    assert!(subsystem.unsubscribe_invert_text_color(id));
    assert!(!subsystem.unsubscribe_invert_text_color(id));
    subsystem.set_invert_text_color(true);

    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn test_apply_backplate_does_not_touch_the_preference() {
    let mut subsystem = AccessibilitySubsystem::new(AccessibilityProvider::new());
    let (received, callback) = recorder();
    subsystem.subscribe_text_backplate_behavior(callback);
    let mut mesh = caption("Welcome");

    let outcome =
        subsystem.apply_text_backplate_behavior(&mut mesh, TextBackplateBehavior::Constant);

    assert_eq!(outcome, ApplyOutcome::Applied);
    assert_eq!(subsystem.text_backplate_behavior(), TextBackplateBehavior::None);
    assert!(received.lock().unwrap().is_empty());
    let material = mesh.material().unwrap();
    assert!(material.keyword_enabled(BACKPLATE_KEYWORD));
    assert_eq!(material.float(BACKPLATE_MODE_PROPERTY), Some(2.0));
}

#[test]
fn test_automatic_backplate_follows_presentation_mode() {
    let mut subsystem = AccessibilitySubsystem::new(AccessibilityProvider::new());
    let mut mesh = caption("Exit");

    subsystem.apply_text_backplate_behavior(&mut mesh, TextBackplateBehavior::Automatic);
    assert!(mesh.material().unwrap().keyword_enabled(BACKPLATE_KEYWORD));

    subsystem.set_presentation_mode(PresentationMode::Immersive);
    subsystem.apply_text_backplate_behavior(&mut mesh, TextBackplateBehavior::Automatic);
    assert!(!mesh.material().unwrap().keyword_enabled(BACKPLATE_KEYWORD));
}

#[test]
fn test_apply_inversion_outcomes() {
    let provider = AccessibilityProvider::new();

    let mut compatible = TextMeshMaterial::new(SHADER);
    assert_eq!(
        provider.apply_text_color_inversion(&mut compatible, true),
        ApplyOutcome::Applied
    );
    assert!(compatible.keyword_enabled(INVERT_TEXT_COLOR_KEYWORD));
    assert_eq!(compatible.float(INVERT_COLOR_PROPERTY), Some(1.0));
    assert!(!provider.invert_text_color());

    let mut foreign = TextMeshMaterial::new("Legacy/Unlit");
    assert_eq!(
        provider.apply_text_color_inversion(&mut foreign, true),
        ApplyOutcome::Unsupported
    );
    assert!(!foreign.keyword_enabled(INVERT_TEXT_COLOR_KEYWORD));

    let mut released = TextMeshMaterial::new(SHADER);
    released.destroy();
    assert_eq!(
        provider.apply_text_color_inversion(&mut released, true),
        ApplyOutcome::InvalidTarget
    );
}

#[test]
fn test_custom_text_shader_from_settings() {
    let settings = AccessibilitySettings::from_ron_str(r#"(text_shader: "Studio/Caption")"#).unwrap();
    let provider = AccessibilityProvider::from_settings(&settings);

    let mut default_shader = TextMeshMaterial::new(SHADER);
    let mut studio_shader = TextMeshMaterial::new("Studio/Caption");
    assert_eq!(
        provider.apply_text_color_inversion(&mut default_shader, true),
        ApplyOutcome::Unsupported
    );
    assert_eq!(
        provider.apply_text_color_inversion(&mut studio_shader, true),
        ApplyOutcome::Applied
    );
}

#[test]
fn test_batch_apply_reports_each_renderer() {
    let mut subsystem = AccessibilitySubsystem::new(AccessibilityProvider::new());
    subsystem.set_text_backplate_behavior(TextBackplateBehavior::Constant);
    subsystem.set_invert_text_color(true);

    let mut title = caption("Title");
    let mut subtitle = caption("Subtitle");
    let mut legacy = TextMesh::new("Legacy", TextMeshMaterial::new("Legacy/Unlit"));
    let mut bare = TextMesh::without_material("Bare");
    let mut gone = caption("Gone");
    gone.destroy();

    let report = {
        let mut targets: Vec<&mut dyn TextRenderer> =
            vec![&mut title, &mut subtitle, &mut legacy, &mut bare, &mut gone];
        apply_text_preferences(&subsystem, &mut targets)
    };

    assert_eq!(
        report,
        ApplyReport {
            applied: 2,
            unsupported: 2,
            invalid: 1,
        }
    );
    for mesh in [&title, &subtitle] {
        let material = mesh.material().unwrap();
        assert!(material.keyword_enabled(BACKPLATE_KEYWORD));
        assert!(material.keyword_enabled(INVERT_TEXT_COLOR_KEYWORD));
    }
    assert!(!legacy.material().unwrap().keyword_enabled(INVERT_TEXT_COLOR_KEYWORD));
}

#[test]
fn test_preference_changes_reach_the_event_bus() {
    let bus = EventBus::new();
    let mut subsystem = AccessibilitySubsystem::new(AccessibilityProvider::new());
    subsystem.attach_event_sender(bus.sender());

    subsystem.set_text_backplate_behavior(TextBackplateBehavior::Automatic);
    subsystem.set_text_backplate_behavior(TextBackplateBehavior::Automatic);
    subsystem.set_invert_text_color(true);
    subsystem.detach_event_sender();
    subsystem.set_invert_text_color(false);

    assert_eq!(
        bus.drain(),
        vec![
            AccessibilityEvent::TextBackplateBehaviorChanged(TextBackplateBehavior::Automatic),
            AccessibilityEvent::InvertTextColorChanged(true),
        ]
    );
}

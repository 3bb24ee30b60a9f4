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

// Khora Accessibility Sandbox
// Drives the accessibility subsystem against a small in-memory scene.
//
// Usage: sandbox [settings.ron]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use khora_a11y::{
    apply_text_preferences, Accessibility, AccessibilitySettings, AccessibilitySubsystem,
    Classification, EntityId, EventBus, PresentationMode, TextBackplateBehavior, TextMesh,
    TextMeshMaterial, TextRenderer,
};

/// A toy scene: a few live objects and the captions attached to them.
struct Scene {
    live: HashSet<EntityId>,
    captions: Vec<TextMesh>,
}

impl Scene {
    fn new(shader: &str) -> Self {
        let live = (0..4).map(|i| EntityId::new(i, 0)).collect();
        let captions = ["Guide", "Museum entrance", "Exhibit 12"]
            .into_iter()
            .map(|text| TextMesh::new(text, TextMeshMaterial::new(shader)))
            .chain(std::iter::once(TextMesh::new(
                "Legacy sign",
                TextMeshMaterial::new("Legacy/Unlit"),
            )))
            .collect();
        Self { live, captions }
    }

    fn destroy(&mut self, object: EntityId) {
        self.live.remove(&object);
    }

    fn refresh_captions(&mut self, accessibility: &impl Accessibility) {
        let mut targets: Vec<&mut dyn TextRenderer> = self
            .captions
            .iter_mut()
            .map(|caption| caption as &mut dyn TextRenderer)
            .collect();
        let report = apply_text_preferences(accessibility, &mut targets);
        log::info!(
            "Refreshed {} captions: {} applied, {} unsupported, {} invalid.",
            report.total(),
            report.applied,
            report.unsupported,
            report.invalid
        );
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => AccessibilitySettings::load(&path)
            .with_context(|| format!("loading accessibility settings from '{path}'"))?,
        None => AccessibilitySettings::default(),
    };

    let bus = EventBus::new();
    let mut accessibility = AccessibilitySubsystem::from_settings(&settings);
    accessibility.start();
    accessibility.attach_event_sender(bus.sender());

    // Captions re-apply lazily: the callback only records that a refresh is due.
    let refresh_due = Arc::new(Mutex::new(false));
    {
        let flag = Arc::clone(&refresh_due);
        accessibility.subscribe_text_backplate_behavior(Box::new(move |_: TextBackplateBehavior| {
            if let Ok(mut due) = flag.lock() {
                *due = true;
            }
        }));
        let flag = Arc::clone(&refresh_due);
        accessibility.subscribe_invert_text_color(Box::new(move |_: bool| {
            if let Ok(mut due) = flag.lock() {
                *due = true;
            }
        }));
    }

    let mut scene = Scene::new(&settings.text_shader);
    let guide = EntityId::new(0, 0);
    let entrance = EntityId::new(1, 0);
    let exhibit = EntityId::new(2, 0);
    let bench = EntityId::new(3, 0);

    accessibility.register_object(&scene.live, guide, &Classification::PEOPLE)?;
    accessibility.register_object(&scene.live, entrance, &Classification::PLACES)?;
    accessibility.register_object(&scene.live, exhibit, &Classification::THINGS)?;
    accessibility.register_object(&scene.live, bench, &Classification::THINGS)?;
    if let Err(e) = accessibility.register_object(&scene.live, bench, &Classification::PLACES) {
        log::warn!("Second registration rejected as expected: {e}");
    }

    let mut classifications = Vec::new();
    accessibility.query_classifications(&mut classifications)?;
    log::info!("Classifications in use: {classifications:?}");

    scene.refresh_captions(&accessibility);

    accessibility.set_text_backplate_behavior(TextBackplateBehavior::Automatic);
    accessibility.set_invert_text_color(true);
    let due = refresh_due
        .lock()
        .map(|mut due| std::mem::take(&mut *due))
        .unwrap_or(false);
    if due {
        scene.refresh_captions(&accessibility);
    }

    accessibility.set_presentation_mode(PresentationMode::Immersive);
    scene.refresh_captions(&accessibility);

    scene.destroy(entrance);
    let swept = accessibility.sweep_destroyed(&scene.live);
    log::info!("Swept {} destroyed objects.", swept.len());
    accessibility.query_classifications(&mut classifications)?;
    log::info!("Classifications in use: {classifications:?}");

    for event in bus.drain() {
        log::info!("Event: {event:?}");
    }

    accessibility.stop();
    Ok(())
}

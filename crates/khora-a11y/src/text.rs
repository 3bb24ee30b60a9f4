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

//! Pushing text affordances to materials.

use khora_a11y_core::text::{
    BACKPLATE_KEYWORD, BACKPLATE_MODE_PROPERTY, INVERT_COLOR_PROPERTY, INVERT_TEXT_COLOR_KEYWORD,
};
use khora_a11y_core::{
    Accessibility, ApplyOutcome, ApplyReport, PresentationMode, TextBackplateBehavior,
    TextMaterial, TextRenderer,
};

/// Checks that `material` is alive and bound to `shader`.
fn check_material(material: &dyn TextMaterial, shader: &str) -> ApplyOutcome {
    if material.is_destroyed() {
        return ApplyOutcome::InvalidTarget;
    }
    if material.shader_name() != shader {
        log::warn!(
            "Text material uses shader '{}', expected '{shader}'; accessibility affordance skipped.",
            material.shader_name()
        );
        return ApplyOutcome::Unsupported;
    }
    ApplyOutcome::Applied
}

/// Shows or hides a renderer's backplate according to `behavior` and `mode`.
pub(crate) fn apply_backplate(
    target: &mut dyn TextRenderer,
    behavior: TextBackplateBehavior,
    mode: PresentationMode,
    shader: &str,
) -> ApplyOutcome {
    if target.is_destroyed() {
        return ApplyOutcome::InvalidTarget;
    }
    let Some(material) = target.material_mut() else {
        log::warn!("Text renderer has no material; backplate behavior skipped.");
        return ApplyOutcome::Unsupported;
    };
    let outcome = check_material(&*material, shader);
    if outcome != ApplyOutcome::Applied {
        return outcome;
    }

    let visible = behavior.is_backplate_visible(mode);
    material.set_keyword(BACKPLATE_KEYWORD, visible);
    material.set_float(BACKPLATE_MODE_PROPERTY, f32::from(behavior as u8));
    log::trace!("Applied backplate behavior {behavior:?} (visible: {visible}).");
    ApplyOutcome::Applied
}

/// Enables or disables color inversion on one material.
pub(crate) fn apply_inversion(
    material: &mut dyn TextMaterial,
    enable: bool,
    shader: &str,
) -> ApplyOutcome {
    let outcome = check_material(&*material, shader);
    if outcome != ApplyOutcome::Applied {
        return outcome;
    }

    material.set_keyword(INVERT_TEXT_COLOR_KEYWORD, enable);
    material.set_float(INVERT_COLOR_PROPERTY, if enable { 1.0 } else { 0.0 });
    log::trace!("Applied text color inversion (enabled: {enable}).");
    ApplyOutcome::Applied
}

/// Pushes the current global preferences to every renderer in `targets`.
///
/// Each renderer receives the global backplate behavior; when that succeeds
/// its material also receives the global inversion preference. The report
/// counts one outcome per renderer.
///
/// Typically called from a preference-change callback, or once when a batch
/// of captions is spawned.
pub fn apply_text_preferences<A: Accessibility + ?Sized>(
    accessibility: &A,
    targets: &mut [&mut dyn TextRenderer],
) -> ApplyReport {
    let behavior = accessibility.text_backplate_behavior();
    let invert = accessibility.invert_text_color();
    let mut report = ApplyReport::default();

    for target in targets.iter_mut() {
        let mut outcome = accessibility.apply_text_backplate_behavior(&mut **target, behavior);
        if outcome == ApplyOutcome::Applied {
            if let Some(material) = target.material_mut() {
                outcome = accessibility.apply_text_color_inversion(material, invert);
            }
        }
        report.record(outcome);
    }

    log::debug!(
        "Applied text preferences to {} renderers ({} applied, {} unsupported, {} invalid).",
        report.total(),
        report.applied,
        report.unsupported,
        report.invalid
    );
    report
}

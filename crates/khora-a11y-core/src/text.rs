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

//! Text accessibility affordances and the text-rendering collaborators they
//! are pushed to.
//!
//! The host engine owns text renderers and their materials. The subsystem only
//! sees them through [`TextRenderer`] and [`TextMaterial`], and only mutates
//! shader keywords and float properties on materials that use the text
//! shader it was configured with.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Shader keyword toggling the caption backplate.
pub const BACKPLATE_KEYWORD: &str = "_BACKPLATE";
/// Float property carrying the [`TextBackplateBehavior`] discriminant.
pub const BACKPLATE_MODE_PROPERTY: &str = "_BackplateMode";
/// Shader keyword toggling text color inversion.
pub const INVERT_TEXT_COLOR_KEYWORD: &str = "_INVERT_TEXT_COLOR";
/// Float property mirroring the inversion keyword (`1.0` or `0.0`).
pub const INVERT_COLOR_PROPERTY: &str = "_InvertColor";

/// How caption backgrounds are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TextBackplateBehavior {
    /// Text is displayed without a backplate.
    #[default]
    None = 0,
    /// Text gets a backplate in augmented presentation and none when
    /// fully immersive.
    Automatic = 1,
    /// Text is always displayed with a backplate.
    Constant = 2,
}

impl TextBackplateBehavior {
    /// Resolves whether a backplate is shown under the given presentation.
    pub fn is_backplate_visible(self, mode: PresentationMode) -> bool {
        match self {
            Self::None => false,
            Self::Automatic => mode == PresentationMode::Augmented,
            Self::Constant => true,
        }
    }
}

/// Whether the application is shown over the real world or fully virtual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Content is composited over the user's surroundings (AR / passthrough).
    #[default]
    Augmented,
    /// Content replaces the user's surroundings (VR).
    Immersive,
}

/// Result of pushing an affordance to one rendering target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplyOutcome {
    /// The target was updated.
    Applied,
    /// The target exists but does not use the text shader, or has no material.
    Unsupported,
    /// The target has been destroyed.
    InvalidTarget,
}

/// Tally of outcomes when applying preferences to many targets at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
    /// Targets that were updated.
    pub applied: usize,
    /// Targets skipped because their material is not compatible.
    pub unsupported: usize,
    /// Targets skipped because they were destroyed.
    pub invalid: usize,
}

impl ApplyReport {
    /// Counts one outcome.
    pub fn record(&mut self, outcome: ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied => self.applied += 1,
            ApplyOutcome::Unsupported => self.unsupported += 1,
            ApplyOutcome::InvalidTarget => self.invalid += 1,
        }
    }

    /// Total number of targets visited.
    pub fn total(&self) -> usize {
        self.applied + self.unsupported + self.invalid
    }
}

/// A material used to draw text.
pub trait TextMaterial {
    /// Name of the shader this material is bound to.
    fn shader_name(&self) -> &str;

    /// Returns `true` once the host has released the material.
    fn is_destroyed(&self) -> bool {
        false
    }

    /// Enables or disables a shader keyword.
    fn set_keyword(&mut self, keyword: &str, enabled: bool);

    /// Returns `true` if a shader keyword is enabled.
    fn keyword_enabled(&self, keyword: &str) -> bool;

    /// Sets a float shader property.
    fn set_float(&mut self, property: &str, value: f32);

    /// Reads a float shader property, if it has been set.
    fn float(&self, property: &str) -> Option<f32>;
}

/// A component that renders text and can display a backplate.
pub trait TextRenderer {
    /// Returns `true` once the host has destroyed the renderer.
    fn is_destroyed(&self) -> bool {
        false
    }

    /// The material used to draw the text, if any.
    fn material_mut(&mut self) -> Option<&mut dyn TextMaterial>;
}

/// An in-memory [`TextMaterial`].
///
/// Hosts without their own material system can use it directly; it is also
/// what the tests drive.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextMeshMaterial {
    shader: String,
    keywords: BTreeSet<String>,
    floats: HashMap<String, f32>,
    destroyed: bool,
}

impl TextMeshMaterial {
    /// Creates a material bound to `shader`.
    pub fn new(shader: impl Into<String>) -> Self {
        Self {
            shader: shader.into(),
            ..Default::default()
        }
    }

    /// Marks the material as released by the host.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

impl TextMaterial for TextMeshMaterial {
    fn shader_name(&self) -> &str {
        &self.shader
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn set_keyword(&mut self, keyword: &str, enabled: bool) {
        if enabled {
            self.keywords.insert(keyword.to_owned());
        } else {
            self.keywords.remove(keyword);
        }
    }

    fn keyword_enabled(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    fn set_float(&mut self, property: &str, value: f32) {
        self.floats.insert(property.to_owned(), value);
    }

    fn float(&self, property: &str) -> Option<f32> {
        self.floats.get(property).copied()
    }
}

/// An in-memory [`TextRenderer`]: a caption and its optional material.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextMesh {
    /// The displayed text.
    pub text: String,
    material: Option<TextMeshMaterial>,
    destroyed: bool,
}

impl TextMesh {
    /// Creates a caption drawn with `material`.
    pub fn new(text: impl Into<String>, material: TextMeshMaterial) -> Self {
        Self {
            text: text.into(),
            material: Some(material),
            destroyed: false,
        }
    }

    /// Creates a caption with no material assigned yet.
    pub fn without_material(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            material: None,
            destroyed: false,
        }
    }

    /// The caption's material, if any.
    pub fn material(&self) -> Option<&TextMeshMaterial> {
        self.material.as_ref()
    }

    /// Marks the caption as destroyed by the host.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

impl TextRenderer for TextMesh {
    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn material_mut(&mut self) -> Option<&mut dyn TextMaterial> {
        self.material
            .as_mut()
            .map(|material| material as &mut dyn TextMaterial)
    }
}

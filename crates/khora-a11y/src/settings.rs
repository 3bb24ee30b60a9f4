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

//! Configuration of the accessibility subsystem.
//!
//! Settings are plain data with sensible defaults and can be written by hand
//! in RON:
//!
//! ```ron
//! (
//!     text_backplate_behavior: Automatic,
//!     invert_text_color: false,
//!     presentation_mode: Immersive,
//!     classifications: ["people", "places", "things", "vehicles"],
//! )
//! ```
//!
//! Any field left out keeps its default value.

use std::path::{Path, PathBuf};

use khora_a11y_core::{Classification, ClassificationTable, PresentationMode, TextBackplateBehavior};
use serde::{Deserialize, Serialize};

/// Name of the shader text materials must use to receive accessibility
/// affordances, unless configured otherwise.
pub const DEFAULT_TEXT_SHADER: &str = "Khora/Text";

/// Errors raised while loading or saving [`AccessibilitySettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("failed to access settings file '{path}': {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The settings text is not valid RON for this structure.
    #[error("failed to parse accessibility settings: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// The settings could not be serialized.
    #[error("failed to serialize accessibility settings: {0}")]
    Serialize(#[from] ron::Error),
    /// The settings parsed but are not usable.
    #[error("invalid accessibility settings: {0}")]
    Invalid(String),
}

/// Global settings of the accessibility subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilitySettings {
    /// Initial text backplate behavior.
    pub text_backplate_behavior: TextBackplateBehavior,
    /// Initial text color inversion preference.
    pub invert_text_color: bool,
    /// Initial presentation mode, used to resolve automatic backplates.
    pub presentation_mode: PresentationMode,
    /// Classifications accepted when registering objects.
    pub classifications: Vec<Classification>,
    /// Shader a text material must use for affordances to be applied.
    pub text_shader: String,
    /// If `true`, the subsystem is started as soon as it is built.
    pub start_on_create: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            text_backplate_behavior: TextBackplateBehavior::None,
            invert_text_color: false,
            presentation_mode: PresentationMode::Augmented,
            classifications: ClassificationTable::default().iter().cloned().collect(),
            text_shader: DEFAULT_TEXT_SHADER.to_owned(),
            start_on_create: true,
        }
    }
}

impl AccessibilitySettings {
    /// Parses and validates settings from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates a RON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_ron_str(&source)?;
        log::info!("Loaded accessibility settings from '{}'.", path.display());
        Ok(settings)
    }

    /// Serializes the settings as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Writes the settings to `path` as RON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let text = self.to_ron_string()?;
        std::fs::write(path, text).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.text_shader.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "text_shader must name a shader".to_owned(),
            ));
        }
        if self.classifications.is_empty() {
            return Err(SettingsError::Invalid(
                "at least one classification must be defined".to_owned(),
            ));
        }
        Ok(())
    }

    /// Builds the classification table described by these settings.
    pub fn classification_table(&self) -> ClassificationTable {
        ClassificationTable::from_classifications(self.classifications.iter().cloned())
    }
}

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

//! Categories used to group accessible objects for assistive queries.
//!
//! A [`Classification`] is an open key rather than a closed enum: projects can
//! add their own categories at runtime. To keep typos from silently creating
//! new categories, a provider only accepts keys that appear in its
//! [`ClassificationTable`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AccessibilityError;

/// The category an accessible object belongs to (people, places, things, ...).
///
/// Keys are normalised on construction: surrounding whitespace is trimmed and
/// the key is lower-cased, so `"People "` and `"people"` are the same
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Classification(Cow<'static, str>);

impl Classification {
    /// People present in the scene.
    pub const PEOPLE: Classification = Classification(Cow::Borrowed("people"));
    /// Places and landmarks.
    pub const PLACES: Classification = Classification(Cow::Borrowed("places"));
    /// Everything else worth describing.
    pub const THINGS: Classification = Classification(Cow::Borrowed("things"));

    /// Creates a classification from a user-supplied key.
    ///
    /// # Errors
    ///
    /// Returns [`AccessibilityError::InvalidClassification`] if the key is
    /// empty after trimming.
    pub fn new(key: impl AsRef<str>) -> Result<Self, AccessibilityError> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err(AccessibilityError::InvalidClassification);
        }
        Ok(Self(Cow::Owned(key.to_lowercase())))
    }

    /// Returns the normalised key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Classification {
    type Error = AccessibilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.0.into_owned()
    }
}

/// The set of classifications a provider accepts.
///
/// Keeps definition order, which is also the order reported by
/// [`iter`](ClassificationTable::iter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    entries: Vec<Classification>,
}

impl ClassificationTable {
    /// Creates a table with no classifications at all.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a table from a list of classifications, ignoring duplicates.
    pub fn from_classifications(classifications: impl IntoIterator<Item = Classification>) -> Self {
        let mut table = Self::empty();
        for classification in classifications {
            table.define(classification);
        }
        table
    }

    /// Adds a classification. Returns `false` if it was already defined.
    pub fn define(&mut self, classification: Classification) -> bool {
        if self.contains(&classification) {
            return false;
        }
        log::debug!("Defined accessible object classification '{classification}'.");
        self.entries.push(classification);
        true
    }

    /// Returns `true` if the classification is defined.
    pub fn contains(&self, classification: &Classification) -> bool {
        self.entries.contains(classification)
    }

    /// Iterates over the defined classifications in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Classification> {
        self.entries.iter()
    }

    /// Returns the number of defined classifications.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The built-in people / places / things table.
impl Default for ClassificationTable {
    fn default() -> Self {
        Self::from_classifications([
            Classification::PEOPLE,
            Classification::PLACES,
            Classification::THINGS,
        ])
    }
}

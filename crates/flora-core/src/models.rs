//! Catalog data models.
//!
//! [`PlantRecord`] is the raw, loosely-typed record owned by the storage
//! layer. [`PreparedPlant`] is its denormalized, canonicalized projection,
//! produced by the preparation pipeline and read by the filter engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::canonical::{canonicalize, CanonicalKey};
use crate::defaults::{LIVING_SPACE_BOTH, LIVING_SPACE_INDOOR, LIVING_SPACE_OUTDOOR};
use crate::raw::{lenient_bool, lenient_id, lenient_string, RawLabels};

// =============================================================================
// LIVING SPACE
// =============================================================================

/// Where a plant can be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivingSpace {
    Indoor,
    Outdoor,
    /// Suited to both; the only value matching a dual indoor+outdoor selection.
    Both,
}

impl LivingSpace {
    /// Parse a living-space db value (any spelling of `indoor`, `outdoor`, `both`).
    pub fn from_db(value: &str) -> Option<Self> {
        let key = canonicalize(value);
        if key == canonicalize(LIVING_SPACE_INDOOR) {
            Some(LivingSpace::Indoor)
        } else if key == canonicalize(LIVING_SPACE_OUTDOOR) {
            Some(LivingSpace::Outdoor)
        } else if key == canonicalize(LIVING_SPACE_BOTH) {
            Some(LivingSpace::Both)
        } else {
            None
        }
    }

    /// The db value.
    pub fn as_str(&self) -> &'static str {
        match self {
            LivingSpace::Indoor => LIVING_SPACE_INDOOR,
            LivingSpace::Outdoor => LIVING_SPACE_OUTDOOR,
            LivingSpace::Both => LIVING_SPACE_BOTH,
        }
    }
}

impl std::fmt::Display for LivingSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RAW RECORD
// =============================================================================

/// A catalog record as delivered by the storage layer.
///
/// Every field is optional and leniently typed: a wrongly-typed value is
/// read as missing rather than rejecting the record. Field names accept both
/// snake_case and the storage layer's camelCase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    #[serde(default, alias = "scientificName", deserialize_with = "lenient_string")]
    pub scientific_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,

    /// Symbolic meaning / folklore text, searched as free text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub meaning: Option<String>,

    /// Declared color names.
    #[serde(default)]
    pub colors: RawLabels,

    /// Usage / classification labels.
    #[serde(default, alias = "utility")]
    pub usage: RawLabels,

    #[serde(default)]
    pub habitat: RawLabels,

    #[serde(default)]
    pub seasons: RawLabels,

    #[serde(default, alias = "toxicityPets", deserialize_with = "lenient_string")]
    pub toxicity_pets: Option<String>,

    #[serde(default, alias = "toxicityHuman", deserialize_with = "lenient_string")]
    pub toxicity_human: Option<String>,

    #[serde(default, alias = "livingSpace", deserialize_with = "lenient_string")]
    pub living_space: Option<String>,

    #[serde(default, alias = "maintenanceLevel", deserialize_with = "lenient_string")]
    pub maintenance: Option<String>,

    #[serde(default, alias = "type", deserialize_with = "lenient_string")]
    pub plant_type: Option<String>,

    #[serde(default, alias = "seedsAvailable", deserialize_with = "lenient_bool")]
    pub seeds_available: bool,
}

impl PlantRecord {
    /// Create a record with an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_scientific_name(mut self, name: impl Into<String>) -> Self {
        self.scientific_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    pub fn with_colors(mut self, colors: impl Into<RawLabels>) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<RawLabels>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_habitat(mut self, habitat: impl Into<RawLabels>) -> Self {
        self.habitat = habitat.into();
        self
    }

    pub fn with_seasons(mut self, seasons: impl Into<RawLabels>) -> Self {
        self.seasons = seasons.into();
        self
    }

    pub fn with_toxicity(mut self, pets: impl Into<String>, human: impl Into<String>) -> Self {
        self.toxicity_pets = Some(pets.into());
        self.toxicity_human = Some(human.into());
        self
    }

    pub fn with_living_space(mut self, space: impl Into<String>) -> Self {
        self.living_space = Some(space.into());
        self
    }

    pub fn with_maintenance(mut self, level: impl Into<String>) -> Self {
        self.maintenance = Some(level.into());
        self
    }

    pub fn with_plant_type(mut self, plant_type: impl Into<String>) -> Self {
        self.plant_type = Some(plant_type.into());
        self
    }

    pub fn with_seeds_available(mut self, available: bool) -> Self {
        self.seeds_available = available;
        self
    }
}

// =============================================================================
// PREPARED PLANT
// =============================================================================

/// Query-ready projection of a [`PlantRecord`].
///
/// Every facet field is already reduced to canonical keys, so the filter
/// engine compares with plain set membership and equality. A prepared plant
/// is never patched: when its record or the vocabulary/taxonomy snapshot
/// changes, it is rebuilt from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedPlant {
    /// Record id; empty when the record had none.
    pub id: String,
    /// Display name; empty when the record had none.
    pub name: String,
    pub usage_labels: HashSet<CanonicalKey>,
    pub habitats: HashSet<CanonicalKey>,
    /// Own color names and translations; never parent or child colors.
    pub color_tokens: HashSet<CanonicalKey>,
    pub seasons: HashSet<CanonicalKey>,
    pub type_label: Option<CanonicalKey>,
    pub maintenance: Option<CanonicalKey>,
    pub living_space: Option<LivingSpace>,
    pub pet_safe: bool,
    pub human_safe: bool,
    /// Lowercased name, scientific name, description, meaning and color
    /// names, for substring search.
    pub search_string: String,
    pub seeds_available: bool,
}

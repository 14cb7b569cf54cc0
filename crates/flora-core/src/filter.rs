//! Faceted filter request types.
//!
//! A search request is split in two:
//!
//! - [`FilterCriteria`]: what the user selected in the filter UI, in raw
//!   vocabulary spellings (any alias or label is accepted).
//! - [`FilterOptions`]: data the caller supplies alongside the selection,
//!   namely the color selection already expanded through the taxonomy and
//!   the set of plant ids the user liked.
//!
//! Facet semantics:
//!
//! | Facet | Semantics |
//! |-------|-----------|
//! | `plant_type`, `maintenance` | exact canonical match |
//! | `season` | plant lists the season |
//! | `usage` | AND, every selected usage present |
//! | `habitat` | OR, any selected habitat present |
//! | color (`FilterOptions::expanded_colors`) | OR, any token shared |
//! | `living_spaces` | one selected: that space or both; two selected: both only |
//! | toggles | pet-safe, human-safe, seeds available, favorites |
//! | `query` | case-insensitive substring |
//!
//! Empty or blank values leave a facet unapplied.
//!
//! # Example
//!
//! ```
//! use flora_core::FilterCriteria;
//!
//! let criteria = FilterCriteria::new()
//!     .require_usage("edible")
//!     .require_usage("medicinal")
//!     .any_habitat("tropical")
//!     .in_living_space("indoor")
//!     .pet_safe_only();
//!
//! assert!(!criteria.is_empty());
//! assert_eq!(criteria.active_facet_count(), 4);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalKey;
use crate::models::LivingSpace;

// =============================================================================
// FILTER CRITERIA
// =============================================================================

/// The user's facet selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Plant type (exact match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<String>,

    /// Maintenance level (exact match).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<String>,

    /// Season the plant must list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// Usages (AND logic) - plants must have ALL of these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usage: Vec<String>,

    /// Habitats (OR logic) - plants must have ANY of these.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub habitat: Vec<String>,

    /// Selected color names or ids, as shown in the UI.
    ///
    /// Matching uses [`FilterOptions::expanded_colors`], which the caller
    /// derives from this selection through the color taxonomy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,

    /// Selected living spaces (`indoor`, `outdoor`, or both).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub living_spaces: Vec<String>,

    /// Only plants with seeds available.
    #[serde(default)]
    pub seeds_only: bool,

    /// Only plants in [`FilterOptions::liked_ids`].
    #[serde(default)]
    pub favorites_only: bool,

    /// Only plants non-toxic to pets.
    #[serde(default)]
    pub pet_safe: bool,

    /// Only plants non-toxic to humans.
    #[serde(default)]
    pub human_safe: bool,
}

impl FilterCriteria {
    /// Create an empty selection (matches every plant).
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    /// Set the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the plant type.
    pub fn with_plant_type(mut self, plant_type: impl Into<String>) -> Self {
        self.plant_type = Some(plant_type.into());
        self
    }

    /// Set the maintenance level.
    pub fn with_maintenance(mut self, level: impl Into<String>) -> Self {
        self.maintenance = Some(level.into());
        self
    }

    /// Set the season.
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    /// Require a usage (AND logic).
    pub fn require_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage.push(usage.into());
        self
    }

    /// Accept a habitat (OR logic).
    pub fn any_habitat(mut self, habitat: impl Into<String>) -> Self {
        self.habitat.push(habitat.into());
        self
    }

    /// Accept a color (OR logic).
    pub fn any_color(mut self, color: impl Into<String>) -> Self {
        self.colors.push(color.into());
        self
    }

    /// Select a living space.
    pub fn in_living_space(mut self, space: impl Into<String>) -> Self {
        self.living_spaces.push(space.into());
        self
    }

    /// Only plants with seeds available.
    pub fn seeds_only(mut self) -> Self {
        self.seeds_only = true;
        self
    }

    /// Only liked plants.
    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    /// Only plants safe for pets.
    pub fn pet_safe_only(mut self) -> Self {
        self.pet_safe = true;
        self
    }

    /// Only plants safe for humans.
    pub fn human_safe_only(mut self) -> Self {
        self.human_safe = true;
        self
    }

    // =========================================================================
    // CONSTRAINT CHECKS
    // =========================================================================

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.active_facet_count() == 0
    }

    /// Number of facets with a non-blank selection.
    pub fn active_facet_count(&self) -> usize {
        let scalars = [
            &self.query,
            &self.plant_type,
            &self.maintenance,
            &self.season,
        ]
        .into_iter()
        .filter(|value| is_present(value.as_deref()))
        .count();

        let lists = [
            &self.usage,
            &self.habitat,
            &self.colors,
            &self.living_spaces,
        ]
        .into_iter()
        .filter(|values| values.iter().any(|v| is_present(Some(v))))
        .count();

        let toggles = [
            self.seeds_only,
            self.favorites_only,
            self.pet_safe,
            self.human_safe,
        ]
        .into_iter()
        .filter(|&on| on)
        .count();

        scalars + lists + toggles
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

// =============================================================================
// FILTER OPTIONS
// =============================================================================

/// Caller-supplied data accompanying a [`FilterCriteria`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Color tokens to match, already expanded through the taxonomy
    /// (descendants and translations). Treated as an opaque token set.
    #[serde(default)]
    pub expanded_colors: HashSet<CanonicalKey>,

    /// Ids of plants the user liked, for the favorites toggle.
    #[serde(default)]
    pub liked_ids: HashSet<String>,
}

impl FilterOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expanded color token set.
    pub fn with_expanded_colors(mut self, tokens: HashSet<CanonicalKey>) -> Self {
        self.expanded_colors = tokens;
        self
    }

    /// Set the liked plant ids.
    pub fn with_liked_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.liked_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

// =============================================================================
// LIVING SPACE SELECTION
// =============================================================================

/// A living-space selection of zero, one or two of indoor/outdoor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivingSpaceSelection {
    pub indoor: bool,
    pub outdoor: bool,
}

impl LivingSpaceSelection {
    /// Build from selected spaces; selecting `Both` selects indoor and outdoor.
    pub fn from_spaces<I>(spaces: I) -> Self
    where
        I: IntoIterator<Item = LivingSpace>,
    {
        let mut selection = Self::default();
        for space in spaces {
            match space {
                LivingSpace::Indoor => selection.indoor = true,
                LivingSpace::Outdoor => selection.outdoor = true,
                LivingSpace::Both => {
                    selection.indoor = true;
                    selection.outdoor = true;
                }
            }
        }
        selection
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        !self.indoor && !self.outdoor
    }

    /// Whether a plant's living space satisfies the selection.
    ///
    /// Selecting both spaces matches only plants tagged `Both`; it is not
    /// the union of indoor and outdoor plants. Selecting one space matches
    /// that space or `Both`.
    pub fn matches(&self, plant: Option<LivingSpace>) -> bool {
        match (self.indoor, self.outdoor) {
            (false, false) => true,
            (true, true) => plant == Some(LivingSpace::Both),
            (true, false) => matches!(plant, Some(LivingSpace::Indoor | LivingSpace::Both)),
            (false, true) => matches!(plant, Some(LivingSpace::Outdoor | LivingSpace::Both)),
        }
    }
}

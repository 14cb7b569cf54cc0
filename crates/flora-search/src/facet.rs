//! Faceted filter engine.
//!
//! Filtering runs in two steps. [`NormalizedFilter::compile`] reduces a
//! [`FilterCriteria`] to canonical keys once per request, dropping blank and
//! unrecognized values. [`NormalizedFilter::matches`] then evaluates each
//! plant with plain set and equality checks, cheapest first:
//!
//! 1. toggles (pet-safe, human-safe, seeds, favorites)
//! 2. scalar equality (type, maintenance, season)
//! 3. living space
//! 4. set facets (usage AND, habitat OR, color OR)
//! 5. free-text substring
//!
//! The first failing check rejects the plant.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, instrument};

use flora_core::canonical::CanonicalKey;
use flora_core::{
    AliasRegistry, FilterCriteria, FilterOptions, LivingSpace, LivingSpaceSelection,
    PreparedPlant, VocabularyKind, VocabularySet,
};

// =============================================================================
// NORMALIZED FILTER
// =============================================================================

/// A filter request reduced to canonical keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFilter<'o> {
    pub pet_safe: bool,
    pub human_safe: bool,
    pub seeds_only: bool,
    /// Liked ids when the favorites toggle is on.
    pub favorites: Option<&'o HashSet<String>>,
    pub plant_type: Option<CanonicalKey>,
    pub maintenance: Option<CanonicalKey>,
    pub season: Option<CanonicalKey>,
    pub living_space: LivingSpaceSelection,
    pub usage: HashSet<CanonicalKey>,
    pub habitat: HashSet<CanonicalKey>,
    /// Pre-expanded color tokens; `None` when no color is selected.
    pub colors: Option<&'o HashSet<CanonicalKey>>,
    /// Lowercased, trimmed query.
    pub query: Option<String>,
}

impl<'o> NormalizedFilter<'o> {
    /// Canonicalize a selection against the vocabularies.
    ///
    /// Values go through the same registry lookups the preparation pipeline
    /// applies to plants, so both sides compare in the same key space.
    pub fn compile(
        vocab: &VocabularySet,
        criteria: &FilterCriteria,
        options: &'o FilterOptions,
    ) -> Self {
        let scalar = |kind: VocabularyKind, value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| vocab.registry(kind).canonical_or_raw(v))
        };
        let set = |kind: VocabularyKind, values: &[String]| -> HashSet<CanonicalKey> {
            let registry = vocab.registry(kind);
            values
                .iter()
                .filter_map(|v| registry.canonical_or_raw(v))
                .collect()
        };

        let living_space = LivingSpaceSelection::from_spaces(
            criteria
                .living_spaces
                .iter()
                .filter_map(|v| parse_living_space(vocab.registry(VocabularyKind::LivingSpace), v)),
        );

        let query = criteria
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        Self {
            pet_safe: criteria.pet_safe,
            human_safe: criteria.human_safe,
            seeds_only: criteria.seeds_only,
            favorites: criteria.favorites_only.then_some(&options.liked_ids),
            plant_type: scalar(VocabularyKind::PlantType, &criteria.plant_type),
            maintenance: scalar(VocabularyKind::Maintenance, &criteria.maintenance),
            season: scalar(VocabularyKind::Season, &criteria.season),
            living_space,
            usage: set(VocabularyKind::Usage, &criteria.usage),
            habitat: set(VocabularyKind::Habitat, &criteria.habitat),
            colors: Some(&options.expanded_colors).filter(|c| !c.is_empty()),
            query,
        }
    }

    /// Check if no facet is applied.
    pub fn is_vacuous(&self) -> bool {
        !self.pet_safe
            && !self.human_safe
            && !self.seeds_only
            && self.favorites.is_none()
            && self.plant_type.is_none()
            && self.maintenance.is_none()
            && self.season.is_none()
            && self.living_space.is_empty()
            && self.usage.is_empty()
            && self.habitat.is_empty()
            && self.colors.is_none()
            && self.query.is_none()
    }

    /// Whether a plant passes every applied facet.
    pub fn matches(&self, plant: &PreparedPlant) -> bool {
        self.matches_toggles(plant)
            && self.matches_scalars(plant)
            && self.living_space.matches(plant.living_space)
            && self.matches_sets(plant)
            && self.matches_query(plant)
    }

    fn matches_toggles(&self, plant: &PreparedPlant) -> bool {
        if self.pet_safe && !plant.pet_safe {
            return false;
        }
        if self.human_safe && !plant.human_safe {
            return false;
        }
        if self.seeds_only && !plant.seeds_available {
            return false;
        }
        match self.favorites {
            Some(liked) => liked.contains(&plant.id),
            None => true,
        }
    }

    fn matches_scalars(&self, plant: &PreparedPlant) -> bool {
        equals_if_set(&self.plant_type, &plant.type_label)
            && equals_if_set(&self.maintenance, &plant.maintenance)
            && self
                .season
                .as_ref()
                .map_or(true, |season| plant.seasons.contains(season))
    }

    fn matches_sets(&self, plant: &PreparedPlant) -> bool {
        // AND: a plant with fewer usages than selected cannot hold them all.
        if !self.usage.is_empty() {
            if plant.usage_labels.len() < self.usage.len() {
                return false;
            }
            if !self.usage.iter().all(|u| plant.usage_labels.contains(u)) {
                return false;
            }
        }

        if !self.habitat.is_empty() && !intersects(&self.habitat, &plant.habitats) {
            return false;
        }

        match self.colors {
            Some(colors) => intersects(colors, &plant.color_tokens),
            None => true,
        }
    }

    fn matches_query(&self, plant: &PreparedPlant) -> bool {
        match &self.query {
            Some(query) => plant.search_string.contains(query.as_str()),
            None => true,
        }
    }
}

fn equals_if_set(wanted: &Option<CanonicalKey>, actual: &Option<CanonicalKey>) -> bool {
    match wanted {
        Some(wanted) => actual.as_ref() == Some(wanted),
        None => true,
    }
}

/// Any shared element, iterating the smaller set.
fn intersects(a: &HashSet<CanonicalKey>, b: &HashSet<CanonicalKey>) -> bool {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().any(|key| large.contains(key))
}

fn parse_living_space(registry: &AliasRegistry, value: &str) -> Option<LivingSpace> {
    registry
        .to_db(value)
        .and_then(LivingSpace::from_db)
        .or_else(|| LivingSpace::from_db(value))
}

// =============================================================================
// ENGINE
// =============================================================================

/// Filters prepared plants by a facet selection.
#[derive(Debug, Clone, Copy)]
pub struct FacetFilterEngine<'a> {
    vocab: &'a VocabularySet,
}

impl<'a> FacetFilterEngine<'a> {
    pub fn new(vocab: &'a VocabularySet) -> Self {
        Self { vocab }
    }

    /// Plants matching the selection, in input order.
    ///
    /// Never fails: values that do not normalize leave their facet
    /// unapplied, and an empty selection returns every plant.
    #[instrument(skip_all, fields(
        subsystem = "search",
        component = "facet_filter",
        op = "filter_plants",
        plant_count = plants.len(),
    ))]
    pub fn filter_plants<'p>(
        &self,
        plants: &'p [PreparedPlant],
        criteria: &FilterCriteria,
        options: &FilterOptions,
    ) -> Vec<&'p PreparedPlant> {
        let start = Instant::now();
        let filter = NormalizedFilter::compile(self.vocab, criteria, options);

        if filter.is_vacuous() {
            debug!("No facets applied, returning all plants");
            return plants.iter().collect();
        }

        let results: Vec<&PreparedPlant> = plants.iter().filter(|p| filter.matches(p)).collect();

        debug!(
            facet_count = criteria.active_facet_count(),
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Facet filtering complete"
        );
        results
    }
}

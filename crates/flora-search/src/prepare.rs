//! Plant preparation pipeline.
//!
//! Turns loosely-typed [`PlantRecord`]s into [`PreparedPlant`]s whose facet
//! fields are canonical keys. This is the single normalization boundary of
//! the catalog: missing or malformed fields become empty sets, `None` or
//! `false` here, and nothing downstream re-validates.

use std::collections::HashSet;
use std::time::Instant;

use tracing::{debug, instrument, trace};

use flora_core::canonical::{canonicalize, canonicalize_non_empty, split_compound, CanonicalKey};
use flora_core::defaults::{NON_TOXIC_DB_VALUE, SEARCH_STRING_SEPARATOR};
use flora_core::{
    AliasRegistry, ColorTaxonomyIndex, LivingSpace, PlantRecord, PreparedPlant, RawLabels,
    VocabularyKind, VocabularySet,
};

/// Builds [`PreparedPlant`]s against one vocabulary and taxonomy snapshot.
///
/// Preparation is pure: the same record and snapshot always produce the
/// same prepared plant. When either changes, re-run [`prepare_catalog`]
/// over the whole catalog.
///
/// [`prepare_catalog`]: Preparer::prepare_catalog
#[derive(Debug, Clone, Copy)]
pub struct Preparer<'a> {
    vocab: &'a VocabularySet,
    colors: &'a ColorTaxonomyIndex,
}

impl<'a> Preparer<'a> {
    pub fn new(vocab: &'a VocabularySet, colors: &'a ColorTaxonomyIndex) -> Self {
        Self { vocab, colors }
    }

    /// Prepare one record.
    pub fn prepare(&self, record: &PlantRecord) -> PreparedPlant {
        let prepared = PreparedPlant {
            id: record.id.clone().unwrap_or_default(),
            name: record.name.clone().unwrap_or_default(),
            usage_labels: self.label_set(VocabularyKind::Usage, &record.usage),
            habitats: self.label_set(VocabularyKind::Habitat, &record.habitat),
            color_tokens: self.color_tokens(&record.colors),
            seasons: self.label_set(VocabularyKind::Season, &record.seasons),
            type_label: self.scalar(VocabularyKind::PlantType, record.plant_type.as_deref()),
            maintenance: self.scalar(VocabularyKind::Maintenance, record.maintenance.as_deref()),
            living_space: self.living_space(record.living_space.as_deref()),
            pet_safe: self.is_non_toxic(record.toxicity_pets.as_deref()),
            human_safe: self.is_non_toxic(record.toxicity_human.as_deref()),
            search_string: search_string(record),
            seeds_available: record.seeds_available,
        };

        trace!(
            plant_id = %prepared.id,
            usage = prepared.usage_labels.len(),
            habitats = prepared.habitats.len(),
            colors = prepared.color_tokens.len(),
            "Prepared plant"
        );
        prepared
    }

    /// Prepare a whole catalog, keeping input order.
    #[instrument(skip_all, fields(
        subsystem = "search",
        component = "preparer",
        op = "prepare_catalog",
        plant_count = records.len(),
    ))]
    pub fn prepare_catalog(&self, records: &[PlantRecord]) -> Vec<PreparedPlant> {
        let start = Instant::now();
        let prepared: Vec<PreparedPlant> = records.iter().map(|r| self.prepare(r)).collect();
        debug!(
            result_count = prepared.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Catalog preparation complete"
        );
        prepared
    }

    /// A plant's own color tokens.
    ///
    /// Resolved colors contribute their canonical name and translations.
    /// Unresolved names contribute their own canonical form plus each part
    /// of a compound name, so `"blue-green"` still yields `blue` and `green`.
    /// Parents and children are never added here.
    pub fn color_tokens(&self, colors: &RawLabels) -> HashSet<CanonicalKey> {
        let mut tokens = HashSet::new();
        for name in colors.tokens() {
            match self
                .colors
                .resolve_by_name(name)
                .and_then(|node| self.colors.aliases_of(node))
            {
                Some(aliases) => tokens.extend(aliases.iter().cloned()),
                None => {
                    trace!(color = name, "Unresolved color name, using raw tokens");
                    tokens.extend(canonicalize_non_empty(name));
                    tokens.extend(split_compound(name).filter_map(canonicalize_non_empty));
                }
            }
        }
        tokens
    }

    fn registry(&self, kind: VocabularyKind) -> &AliasRegistry {
        self.vocab.registry(kind)
    }

    fn label_set(&self, kind: VocabularyKind, labels: &RawLabels) -> HashSet<CanonicalKey> {
        let registry = self.registry(kind);
        labels
            .tokens()
            .into_iter()
            .filter_map(|token| registry.canonical_or_raw(token))
            .collect()
    }

    fn scalar(&self, kind: VocabularyKind, value: Option<&str>) -> Option<CanonicalKey> {
        value.and_then(|v| self.registry(kind).canonical_or_raw(v))
    }

    fn living_space(&self, value: Option<&str>) -> Option<LivingSpace> {
        let value = value?;
        self.registry(VocabularyKind::LivingSpace)
            .to_db(value)
            .and_then(LivingSpace::from_db)
            .or_else(|| LivingSpace::from_db(value))
    }

    fn is_non_toxic(&self, value: Option<&str>) -> bool {
        value
            .and_then(|v| self.registry(VocabularyKind::Toxicity).canonical_db(v))
            .map(|key| key == canonicalize(NON_TOXIC_DB_VALUE))
            .unwrap_or(false)
    }
}

/// Lowercased free text of a record, for substring search.
fn search_string(record: &PlantRecord) -> String {
    let text_fields = [
        record.name.as_deref(),
        record.scientific_name.as_deref(),
        record.description.as_deref(),
        record.meaning.as_deref(),
    ];

    text_fields
        .into_iter()
        .flatten()
        .chain(record.colors.tokens())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(SEARCH_STRING_SEPARATOR)
        .to_lowercase()
}

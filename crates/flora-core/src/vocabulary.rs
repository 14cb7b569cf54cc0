//! Alias registries for controlled vocabularies.
//!
//! A controlled vocabulary (usage, toxicity, habitat, ...) is an ordered list
//! of [`EnumEntry`] values. Each entry has a storage value (`db_value`), a
//! display label (`ui_value`) and free-text aliases: synonyms, old spellings,
//! translations. [`AliasRegistry`] indexes all of them by canonical key so
//! that any spelling resolves to the storage value and back to its label.
//!
//! # Collision policy
//!
//! Registration is order-sensitive. Entries are processed in list order and,
//! within an entry, `db_value` then `ui_value` then aliases in order. The
//! first registration of a canonical key wins; a later term reducing to the
//! same key is ignored and counted in [`AliasRegistry::collisions`].
//!
//! # Example
//!
//! ```
//! use flora_core::{AliasRegistry, EnumEntry};
//!
//! let usage = AliasRegistry::new(
//!     "usage",
//!     &[
//!         EnumEntry::new("edible", "Edible").with_alias("comestible"),
//!         EnumEntry::new("medicinal", "Medicinal"),
//!     ],
//! );
//!
//! assert_eq!(usage.to_db("Comestible"), Some("edible"));
//! assert_eq!(usage.to_ui("EDIBLE"), Some("Edible"));
//! assert_eq!(usage.to_db("###garbage###"), None);
//! assert_eq!(
//!     usage.to_db_array(&["Edible", "comestible", "EDIBLE"].into()),
//!     vec!["edible".to_string()]
//! );
//! ```

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, trace};

use crate::canonical::{canonicalize, canonicalize_non_empty, CanonicalKey};
use crate::raw::RawLabels;

/// One value of a controlled vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    /// Value persisted by the storage layer.
    #[serde(alias = "dbValue")]
    pub db_value: String,
    /// Human-readable label.
    #[serde(alias = "uiValue")]
    pub ui_value: String,
    /// Alternate spellings resolving to this entry.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl EnumEntry {
    /// Create an entry without aliases.
    pub fn new(db_value: impl Into<String>, ui_value: impl Into<String>) -> Self {
        Self {
            db_value: db_value.into(),
            ui_value: ui_value.into(),
            aliases: Vec::new(),
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Every term registered for this entry, in registration order.
    fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.db_value.as_str())
            .chain(std::iter::once(self.ui_value.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
    }
}

/// Bidirectional index between canonical spellings, storage values and
/// display labels for one vocabulary.
///
/// Built once and read-only afterwards; every lookup is total.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    name: String,
    db_values: Vec<String>,
    db_to_ui: HashMap<String, String>,
    canonical_to_db: HashMap<CanonicalKey, String>,
    collisions: usize,
}

impl AliasRegistry {
    /// Build a registry from entries, applying the first-wins collision policy.
    pub fn new(name: impl Into<String>, entries: &[EnumEntry]) -> Self {
        let name = name.into();
        let mut registry = Self {
            name,
            ..Self::default()
        };

        for entry in entries {
            if let Entry::Vacant(slot) = registry.db_to_ui.entry(entry.db_value.clone()) {
                slot.insert(entry.ui_value.clone());
                registry.db_values.push(entry.db_value.clone());
            }

            for term in entry.terms() {
                let Some(key) = canonicalize_non_empty(term) else {
                    continue;
                };
                match registry.canonical_to_db.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(entry.db_value.clone());
                    }
                    Entry::Occupied(existing) => {
                        if existing.get() != &entry.db_value {
                            registry.collisions += 1;
                            debug!(
                                vocabulary = %registry.name,
                                term = term,
                                kept = %existing.get(),
                                ignored = %entry.db_value,
                                "Alias collision, keeping first registration"
                            );
                        }
                    }
                }
            }
        }

        debug!(
            subsystem = "vocabulary",
            component = "alias_registry",
            vocabulary = %registry.name,
            entry_count = registry.db_values.len(),
            key_count = registry.canonical_to_db.len(),
            collisions = registry.collisions,
            "Alias registry built"
        );

        registry
    }

    /// Create an empty registry in which every lookup misses.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Vocabulary name this registry was built for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage values in registration order.
    pub fn db_values(&self) -> &[String] {
        &self.db_values
    }

    /// Number of distinct storage values.
    pub fn len(&self) -> usize {
        self.db_values.len()
    }

    /// Check if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.db_values.is_empty()
    }

    /// Number of terms ignored by the first-wins collision policy.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Check if a raw storage value belongs to this vocabulary.
    pub fn contains_db(&self, db_value: &str) -> bool {
        self.db_to_ui.contains_key(db_value)
    }

    // =========================================================================
    // SCALAR LOOKUPS
    // =========================================================================

    /// Resolve any spelling to its storage value.
    pub fn to_db(&self, value: &str) -> Option<&str> {
        let key = canonicalize(value);
        if key.is_empty() {
            return None;
        }
        self.canonical_to_db.get(&key).map(String::as_str)
    }

    /// Resolve any spelling to its display label.
    pub fn to_ui(&self, value: &str) -> Option<&str> {
        self.to_db(value)
            .and_then(|db| self.db_to_ui.get(db))
            .map(String::as_str)
    }

    /// [`to_db`](Self::to_db) for untyped input; non-strings resolve to `None`.
    pub fn to_db_value(&self, value: &JsonValue) -> Option<&str> {
        value.as_str().and_then(|s| self.to_db(s))
    }

    /// [`to_ui`](Self::to_ui) for untyped input; non-strings resolve to `None`.
    pub fn to_ui_value(&self, value: &JsonValue) -> Option<&str> {
        value.as_str().and_then(|s| self.to_ui(s))
    }

    /// Canonical key of the resolved storage value.
    ///
    /// This is the form stored on prepared plants and compared by the filter
    /// engine.
    pub fn canonical_db(&self, value: &str) -> Option<CanonicalKey> {
        self.to_db(value).map(canonicalize)
    }

    /// Canonical key of the resolved storage value, or of the raw value
    /// itself when it is not in the vocabulary.
    ///
    /// Used where an unknown term should still be searchable rather than
    /// dropped.
    pub fn canonical_or_raw(&self, value: &str) -> Option<CanonicalKey> {
        self.canonical_db(value)
            .or_else(|| canonicalize_non_empty(value))
    }

    // =========================================================================
    // ARRAY LOOKUPS
    // =========================================================================

    /// Resolve every token to its storage value.
    ///
    /// Unresolved tokens are dropped; duplicates are removed keeping
    /// first-seen order.
    pub fn to_db_array(&self, value: &RawLabels) -> Vec<String> {
        self.resolve_tokens(value, |db| Some(db))
    }

    /// Resolve every token to its display label, with the same dropping and
    /// dedupe rules as [`to_db_array`](Self::to_db_array).
    pub fn to_ui_array(&self, value: &RawLabels) -> Vec<String> {
        self.resolve_tokens(value, |db| self.db_to_ui.get(db).map(String::as_str))
    }

    /// [`to_db_array`](Self::to_db_array) for untyped input.
    pub fn to_db_array_value(&self, value: &JsonValue) -> Vec<String> {
        self.to_db_array(&RawLabels::from_json(value))
    }

    /// [`to_ui_array`](Self::to_ui_array) for untyped input.
    pub fn to_ui_array_value(&self, value: &JsonValue) -> Vec<String> {
        self.to_ui_array(&RawLabels::from_json(value))
    }

    fn resolve_tokens<'a, F>(&'a self, value: &RawLabels, project: F) -> Vec<String>
    where
        F: Fn(&'a str) -> Option<&'a str>,
    {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();
        for token in value.tokens() {
            let Some(out) = self.to_db(token).and_then(&project) else {
                trace!(vocabulary = %self.name, token = token, "Dropping unresolved token");
                continue;
            };
            if seen.insert(out) {
                resolved.push(out.to_string());
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn usage_registry() -> AliasRegistry {
        AliasRegistry::new(
            "usage",
            &[
                EnumEntry::new("edible", "Edible")
                    .with_alias("comestible")
                    .with_alias("culinary"),
                EnumEntry::new("medicinal", "Medicinal").with_alias("healing"),
                EnumEntry::new("non_toxic", "Non-toxic").with_alias("safe"),
            ],
        )
    }

    #[test]
    fn test_to_db_resolves_all_spellings() {
        let registry = usage_registry();
        assert_eq!(registry.to_db("edible"), Some("edible"));
        assert_eq!(registry.to_db("Edible"), Some("edible"));
        assert_eq!(registry.to_db("COMESTIBLE"), Some("edible"));
        assert_eq!(registry.to_db("Culinary!"), Some("edible"));
        assert_eq!(registry.to_db("non-toxic"), Some("non_toxic"));
        assert_eq!(registry.to_db("Non Toxic"), Some("non_toxic"));
    }

    #[test]
    fn test_to_db_unknown_is_none() {
        let registry = usage_registry();
        assert_eq!(registry.to_db("###garbage###"), None);
        assert_eq!(registry.to_db(""), None);
        assert_eq!(registry.to_db("---"), None);
    }

    #[test]
    fn test_to_ui_round_trip_for_every_alias() {
        let entries = vec![
            EnumEntry::new("edible", "Edible")
                .with_alias("comestible")
                .with_alias("culinary"),
            EnumEntry::new("medicinal", "Medicinal").with_alias("healing"),
        ];
        let registry = AliasRegistry::new("usage", &entries);

        for entry in &entries {
            for alias in &entry.aliases {
                let db = registry.to_db(alias).unwrap();
                assert_eq!(registry.to_ui(db), Some(entry.ui_value.as_str()));
            }
        }
    }

    #[test]
    fn test_untyped_lookups() {
        let registry = usage_registry();
        assert_eq!(registry.to_db_value(&json!("Healing")), Some("medicinal"));
        assert_eq!(registry.to_db_value(&json!(7)), None);
        assert_eq!(registry.to_db_value(&json!(null)), None);
        assert_eq!(registry.to_ui_value(&json!(["edible"])), None);
        assert_eq!(registry.to_ui_value(&json!("safe")), Some("Non-toxic"));
    }

    #[test]
    fn test_first_registration_wins() {
        let registry = AliasRegistry::new(
            "habitat",
            &[
                EnumEntry::new("arid", "Arid").with_alias("dry"),
                EnumEntry::new("dry_forest", "Dry").with_alias("scrub"),
            ],
        );

        // "Dry" (ui of the second entry) collides with the alias of the first.
        assert_eq!(registry.to_db("Dry"), Some("arid"));
        assert_eq!(registry.to_db("dry_forest"), Some("dry_forest"));
        assert_eq!(registry.to_db("scrub"), Some("dry_forest"));
        assert_eq!(registry.collisions(), 1);
    }

    #[test]
    fn test_duplicate_db_value_keeps_first_label() {
        let registry = AliasRegistry::new(
            "season",
            &[
                EnumEntry::new("autumn", "Autumn"),
                EnumEntry::new("autumn", "Fall").with_alias("harvest"),
            ],
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.to_ui("Fall"), Some("Autumn"));
        assert_eq!(registry.to_db("harvest"), Some("autumn"));
    }

    #[test]
    fn test_to_db_array_dedupes_in_first_seen_order() {
        let registry = usage_registry();
        assert_eq!(
            registry.to_db_array(&["Edible", "comestible", "EDIBLE"].into()),
            vec!["edible".to_string()]
        );
        assert_eq!(
            registry.to_db_array(&["healing", "bogus", "edible", "medicinal"].into()),
            vec!["medicinal".to_string(), "edible".to_string()]
        );
    }

    #[test]
    fn test_to_db_array_from_delimited_string() {
        let registry = usage_registry();
        assert_eq!(
            registry.to_db_array(&"culinary; healing / unknown, safe".into()),
            vec![
                "edible".to_string(),
                "medicinal".to_string(),
                "non_toxic".to_string()
            ]
        );
    }

    #[test]
    fn test_to_ui_array() {
        let registry = usage_registry();
        assert_eq!(
            registry.to_ui_array(&"comestible,healing,edible".into()),
            vec!["Edible".to_string(), "Medicinal".to_string()]
        );
    }

    #[test]
    fn test_array_lookups_untyped() {
        let registry = usage_registry();
        assert!(registry.to_db_array_value(&json!(12)).is_empty());
        assert!(registry.to_db_array_value(&json!(null)).is_empty());
        assert_eq!(
            registry.to_db_array_value(&json!(["safe", false, "Comestible"])),
            vec!["non_toxic".to_string(), "edible".to_string()]
        );
        assert_eq!(
            registry.to_ui_array_value(&json!("edible/medicinal")),
            vec!["Edible".to_string(), "Medicinal".to_string()]
        );
    }

    #[test]
    fn test_canonical_db_and_fallback() {
        let registry = usage_registry();
        assert_eq!(registry.canonical_db("safe"), Some("nontoxic".to_string()));
        assert_eq!(registry.canonical_db("Fiber"), None);
        assert_eq!(
            registry.canonical_or_raw("Fiber crop"),
            Some("fibercrop".to_string())
        );
        assert_eq!(registry.canonical_or_raw("  "), None);
    }

    #[test]
    fn test_empty_registry_misses_everything() {
        let registry = AliasRegistry::empty("climate");
        assert!(registry.is_empty());
        assert_eq!(registry.name(), "climate");
        assert_eq!(registry.to_db("tropical"), None);
        assert!(registry.to_db_array(&"tropical".into()).is_empty());
    }

    #[test]
    fn test_entry_deserializes_camel_case() {
        let entry: EnumEntry = serde_json::from_value(json!({
            "dbValue": "edible",
            "uiValue": "Edible",
            "aliases": ["comestible"]
        }))
        .unwrap();
        assert_eq!(entry, EnumEntry::new("edible", "Edible").with_alias("comestible"));

        let entry: EnumEntry =
            serde_json::from_value(json!({"db_value": "low", "ui_value": "Low"})).unwrap();
        assert!(entry.aliases.is_empty());
    }
}

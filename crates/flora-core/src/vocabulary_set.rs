//! The full set of controlled vocabularies used by the catalog.
//!
//! [`VocabularySet`] owns one [`AliasRegistry`] per [`VocabularyKind`]. It is
//! built explicitly at startup from a [`VocabularyConfig`] (bundled defaults
//! or a YAML/JSON file) and passed by reference to the preparation pipeline
//! and the filter engine.
//!
//! # Legacy vocabulary names
//!
//! Vocabularies have been renamed over time ("utility" became "usage",
//! "care_level" became "maintenance"). Old names are kept in
//! [`LEGACY_VOCABULARY_NAMES`], each with the release it was deprecated in
//! and its replacement, so configuration files and call sites using them keep
//! working while logging a deprecation warning.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::canonical::canonicalize;
use crate::defaults::DEFAULT_VOCABULARIES_YAML;
use crate::error::{Error, Result};
use crate::vocabulary::{AliasRegistry, EnumEntry};

// =============================================================================
// VOCABULARY KIND
// =============================================================================

/// A controlled vocabulary of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VocabularyKind {
    /// Plant usage / classification (edible, medicinal, ...).
    Usage,
    /// Toxicity level, shared by the pet and human toxicity fields.
    Toxicity,
    /// Natural habitat (tropical, arid, ...).
    Habitat,
    /// Seasons of interest (flowering, harvest).
    Season,
    /// Plant type (flower, tree, ...).
    PlantType,
    /// Care effort.
    Maintenance,
    /// Indoor, outdoor or both.
    LivingSpace,
    /// Climate zone.
    Climate,
}

impl VocabularyKind {
    /// Every vocabulary kind.
    pub const ALL: [VocabularyKind; 8] = [
        VocabularyKind::Usage,
        VocabularyKind::Toxicity,
        VocabularyKind::Habitat,
        VocabularyKind::Season,
        VocabularyKind::PlantType,
        VocabularyKind::Maintenance,
        VocabularyKind::LivingSpace,
        VocabularyKind::Climate,
    ];

    /// Current configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VocabularyKind::Usage => "usage",
            VocabularyKind::Toxicity => "toxicity",
            VocabularyKind::Habitat => "habitat",
            VocabularyKind::Season => "season",
            VocabularyKind::PlantType => "plant_type",
            VocabularyKind::Maintenance => "maintenance",
            VocabularyKind::LivingSpace => "living_space",
            VocabularyKind::Climate => "climate",
        }
    }

    /// Resolve a current or legacy vocabulary name.
    ///
    /// Matching is by canonical key, so `"plant_type"`, `"PlantType"` and
    /// `"plant type"` all resolve. Legacy hits also return their binding.
    pub fn resolve_name(name: &str) -> Option<(Self, Option<&'static LegacyBinding>)> {
        let key = canonicalize(name);
        if key.is_empty() {
            return None;
        }
        if let Some(kind) = Self::ALL
            .into_iter()
            .find(|kind| canonicalize(kind.as_str()) == key)
        {
            return Some((kind, None));
        }
        LEGACY_VOCABULARY_NAMES
            .iter()
            .find(|binding| canonicalize(binding.name) == key)
            .map(|binding| (binding.replacement, Some(binding)))
    }
}

impl std::fmt::Display for VocabularyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VocabularyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match Self::resolve_name(s) {
            Some((kind, Some(binding))) => {
                warn!(
                    vocabulary = binding.name,
                    replacement = %binding.replacement,
                    deprecated_since = binding.deprecated_since,
                    "Deprecated vocabulary name"
                );
                Ok(kind)
            }
            Some((kind, None)) => Ok(kind),
            None => Err(format!("Invalid vocabulary: {}", s)),
        }
    }
}

// =============================================================================
// LEGACY BINDINGS
// =============================================================================

/// A deprecated vocabulary name and what replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegacyBinding {
    /// The old name.
    pub name: &'static str,
    /// The vocabulary the old name now refers to.
    pub replacement: VocabularyKind,
    /// Release in which the old name was deprecated.
    pub deprecated_since: &'static str,
}

/// Versioned table of deprecated vocabulary names.
pub const LEGACY_VOCABULARY_NAMES: &[LegacyBinding] = &[
    LegacyBinding {
        name: "utility",
        replacement: VocabularyKind::Usage,
        deprecated_since: "2025.3.0",
    },
    LegacyBinding {
        name: "classification",
        replacement: VocabularyKind::Usage,
        deprecated_since: "2025.3.0",
    },
    LegacyBinding {
        name: "toxicity_level",
        replacement: VocabularyKind::Toxicity,
        deprecated_since: "2025.3.0",
    },
    LegacyBinding {
        name: "environment",
        replacement: VocabularyKind::Habitat,
        deprecated_since: "2025.6.0",
    },
    LegacyBinding {
        name: "seasonality",
        replacement: VocabularyKind::Season,
        deprecated_since: "2025.6.0",
    },
    LegacyBinding {
        name: "type",
        replacement: VocabularyKind::PlantType,
        deprecated_since: "2025.6.0",
    },
    LegacyBinding {
        name: "care_level",
        replacement: VocabularyKind::Maintenance,
        deprecated_since: "2025.9.0",
    },
    LegacyBinding {
        name: "space",
        replacement: VocabularyKind::LivingSpace,
        deprecated_since: "2025.9.0",
    },
    LegacyBinding {
        name: "climate_zone",
        replacement: VocabularyKind::Climate,
        deprecated_since: "2025.9.0",
    },
];

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Authored vocabulary data: vocabulary name to ordered entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyConfig {
    #[serde(default)]
    pub vocabularies: BTreeMap<String, Vec<EnumEntry>>,
}

impl VocabularyConfig {
    /// The vocabularies bundled with flora.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml(DEFAULT_VOCABULARIES_YAML)
    }

    /// Parse from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match data_format(path)? {
            DataFormat::Yaml => Self::from_yaml(&content),
            DataFormat::Json => Self::from_json(&content),
        }
    }

    /// Add or replace one vocabulary.
    pub fn with_vocabulary(mut self, kind: VocabularyKind, entries: Vec<EnumEntry>) -> Self {
        self.vocabularies.insert(kind.as_str().to_string(), entries);
        self
    }
}

/// Serialization format of an authored data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DataFormat {
    Yaml,
    Json,
}

/// Pick the format of a data file from its extension.
pub(crate) fn data_format(path: &Path) -> Result<DataFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
        Some("json") => Ok(DataFormat::Json),
        _ => Err(Error::InvalidInput(format!(
            "Unsupported data file extension: {}",
            path.display()
        ))),
    }
}

// =============================================================================
// VOCABULARY SET
// =============================================================================

/// One alias registry per vocabulary kind.
///
/// Every kind always has a registry; kinds absent from the configuration get
/// an empty one.
#[derive(Debug, Clone)]
pub struct VocabularySet {
    registries: HashMap<VocabularyKind, AliasRegistry>,
}

impl Default for VocabularySet {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularySet {
    /// Create a set where every vocabulary is empty.
    pub fn new() -> Self {
        let registries = VocabularyKind::ALL
            .into_iter()
            .map(|kind| (kind, AliasRegistry::empty(kind.as_str())))
            .collect();
        Self { registries }
    }

    /// Build from the bundled vocabularies.
    pub fn bundled() -> Result<Self> {
        Self::from_config(&VocabularyConfig::bundled()?)
    }

    /// Build all registries from configuration.
    ///
    /// Fails on unknown vocabulary names and on a vocabulary configured
    /// twice (under its current and a legacy name).
    pub fn from_config(config: &VocabularyConfig) -> Result<Self> {
        let mut set = Self::new();
        let mut configured: HashMap<VocabularyKind, &str> = HashMap::new();

        for (name, entries) in &config.vocabularies {
            let (kind, legacy) = VocabularyKind::resolve_name(name)
                .ok_or_else(|| Error::Config(format!("Unknown vocabulary '{}'", name)))?;

            if let Some(binding) = legacy {
                warn!(
                    vocabulary = %name,
                    replacement = %binding.replacement,
                    deprecated_since = binding.deprecated_since,
                    "Deprecated vocabulary name in configuration"
                );
            }

            if let Some(previous) = configured.insert(kind, name.as_str()) {
                return Err(Error::Config(format!(
                    "Vocabulary '{}' configured twice ('{}' and '{}')",
                    kind, previous, name
                )));
            }

            set.registries
                .insert(kind, AliasRegistry::new(kind.as_str(), entries));
        }

        debug!(
            subsystem = "vocabulary",
            component = "vocabulary_set",
            op = "build",
            entry_count = configured.len(),
            "Vocabulary set built"
        );

        Ok(set)
    }

    /// Replace one registry.
    pub fn with_registry(mut self, kind: VocabularyKind, registry: AliasRegistry) -> Self {
        self.registries.insert(kind, registry);
        self
    }

    /// Registry for a vocabulary kind.
    pub fn registry(&self, kind: VocabularyKind) -> &AliasRegistry {
        // Every kind is inserted by `new`; registries are only ever replaced.
        &self.registries[&kind]
    }
}

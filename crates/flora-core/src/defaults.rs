//! Centralized default constants for flora.
//!
//! **This module is the single source of truth** for shared default values:
//! delimiters, well-known vocabulary values, environment variable names, and
//! the bundled default vocabulary and color taxonomy.

use std::path::PathBuf;

// =============================================================================
// TOKENIZATION
// =============================================================================

/// Delimiters accepted when a multi-valued label field arrives as one string.
pub const LIST_DELIMITERS: [char; 3] = [',', ';', '/'];

/// Separators (besides whitespace) splitting compound color names such as
/// `"blue-green"` into searchable parts.
pub const COMPOUND_SEPARATORS: [char; 3] = ['-', '/', '_'];

/// Separator used when joining fields into a plant's search string.
pub const SEARCH_STRING_SEPARATOR: &str = " ";

// =============================================================================
// WELL-KNOWN VOCABULARY VALUES
// =============================================================================

/// Toxicity db value meaning "safe". `pet_safe`/`human_safe` are true only
/// when the toxicity field resolves to this value.
pub const NON_TOXIC_DB_VALUE: &str = "non_toxic";

/// Living-space db value for indoor plants.
pub const LIVING_SPACE_INDOOR: &str = "indoor";

/// Living-space db value for outdoor plants.
pub const LIVING_SPACE_OUTDOOR: &str = "outdoor";

/// Living-space db value for plants suited to both spaces.
pub const LIVING_SPACE_BOTH: &str = "both";

// =============================================================================
// BUNDLED DATA
// =============================================================================

/// Default controlled vocabularies (YAML), used when no vocabulary file is
/// configured.
pub const DEFAULT_VOCABULARIES_YAML: &str = include_str!("../data/vocabularies.yaml");

/// Default color taxonomy (YAML), used when no taxonomy file is configured.
pub const DEFAULT_COLOR_TAXONOMY_YAML: &str = include_str!("../data/colors.yaml");

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Path to a vocabulary file (YAML or JSON).
pub const ENV_VOCABULARY_PATH: &str = "FLORA_VOCABULARY_PATH";

/// Path to a color taxonomy file (YAML or JSON).
pub const ENV_COLOR_TAXONOMY_PATH: &str = "FLORA_COLOR_TAXONOMY_PATH";

/// Path to a catalog file (JSON array of plant records).
pub const ENV_CATALOG_PATH: &str = "FLORA_CATALOG_PATH";

// =============================================================================
// CATALOG CONFIGURATION
// =============================================================================

/// Where a process loads its vocabularies, color taxonomy and catalog from.
///
/// `None` paths fall back to the bundled defaults (vocabularies, colors) or
/// to "no catalog" (catalog).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Vocabulary file; `None` uses [`DEFAULT_VOCABULARIES_YAML`].
    pub vocabulary_path: Option<PathBuf>,
    /// Color taxonomy file; `None` uses [`DEFAULT_COLOR_TAXONOMY_YAML`].
    pub color_taxonomy_path: Option<PathBuf>,
    /// Catalog file with raw plant records.
    pub catalog_path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Load configuration from environment variables with fallback to defaults.
    pub fn from_env() -> Self {
        Self {
            vocabulary_path: path_from_env(ENV_VOCABULARY_PATH),
            color_taxonomy_path: path_from_env(ENV_COLOR_TAXONOMY_PATH),
            catalog_path: path_from_env(ENV_CATALOG_PATH),
        }
    }

    /// Override the vocabulary file.
    pub fn with_vocabulary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.vocabulary_path = Some(path.into());
        self
    }

    /// Override the color taxonomy file.
    pub fn with_color_taxonomy_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.color_taxonomy_path = Some(path.into());
        self
    }

    /// Override the catalog file.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

fn path_from_env(var: &str) -> Option<PathBuf> {
    let val = std::env::var(var).ok()?;
    let trimmed = val.trim();
    if trimmed.is_empty() {
        tracing::warn!(variable = var, "Empty path in environment, using default");
        return None;
    }
    Some(PathBuf::from(trimmed))
}

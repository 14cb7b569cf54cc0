//! # flora-core
//!
//! Core vocabulary, color taxonomy, and catalog types for flora.
//!
//! This crate provides text canonicalization, the alias registries that map
//! free-form labels onto controlled vocabularies, the color taxonomy index,
//! and the record and filter types shared by the search crate.

pub mod canonical;
pub mod color;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod logging;
pub mod models;
pub mod raw;
pub mod vocabulary;
pub mod vocabulary_set;

// Re-export commonly used types at crate root
pub use canonical::{canonicalize, canonicalize_non_empty, CanonicalKey};
pub use color::{ColorNode, ColorTaxonomyConfig, ColorTaxonomyIndex};
pub use defaults::CatalogConfig;
pub use error::{Error, Result};
pub use filter::{FilterCriteria, FilterOptions, LivingSpaceSelection};
pub use models::{LivingSpace, PlantRecord, PreparedPlant};
pub use raw::RawLabels;
pub use vocabulary::{AliasRegistry, EnumEntry};
pub use vocabulary_set::{
    LegacyBinding, VocabularyConfig, VocabularyKind, VocabularySet, LEGACY_VOCABULARY_NAMES,
};

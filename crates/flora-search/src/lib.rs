//! # flora-search
//!
//! Catalog preparation and faceted filtering for flora.
//!
//! This crate provides:
//! - [`Preparer`]: raw catalog records to canonicalized [`PreparedPlant`]s
//! - [`FacetFilterEngine`]: order-preserving facet filtering over prepared plants
//!
//! ## Example
//!
//! ```
//! use flora_search::{
//!     ColorTaxonomyIndex, FacetFilterEngine, FilterCriteria, FilterOptions, PlantRecord,
//!     Preparer, VocabularySet,
//! };
//!
//! let vocab = VocabularySet::bundled()?;
//! let colors = ColorTaxonomyIndex::bundled()?;
//!
//! let records = vec![PlantRecord::new("basil", "Basil")
//!     .with_usage(vec!["comestible"])
//!     .with_colors(vec!["Green"])];
//! let plants = Preparer::new(&vocab, &colors).prepare_catalog(&records);
//!
//! let criteria = FilterCriteria::new().require_usage("edible").any_color("vert");
//! let options = FilterOptions::new()
//!     .with_expanded_colors(colors.expand_selection(&criteria.colors));
//!
//! let hits = FacetFilterEngine::new(&vocab).filter_plants(&plants, &criteria, &options);
//! assert_eq!(hits.len(), 1);
//! # Ok::<(), flora_search::Error>(())
//! ```

pub mod facet;
pub mod prepare;

// Re-export core types
pub use flora_core::*;

pub use facet::{FacetFilterEngine, NormalizedFilter};
pub use prepare::Preparer;

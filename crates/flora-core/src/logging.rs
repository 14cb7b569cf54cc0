//! Structured logging schema and field name constants for flora.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries can filter on the same names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unusable configuration, the process cannot continue |
//! | WARN  | Recoverable issue, automatic fallback applied (taxonomy cycle, bad env value) |
//! | INFO  | Lifecycle events (startup, catalog loaded) |
//! | DEBUG | Decision points, index build summaries, filter completions |
//! | TRACE | Per-item iteration (per plant, per token) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "vocabulary", "taxonomy", "search"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "alias_registry", "vocabulary_set", "color_index", "preparer", "facet_filter"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "build", "expand_with_descendants", "prepare_catalog", "filter_plants"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Catalog plant id being operated on.
pub const PLANT_ID: &str = "plant_id";

/// Color taxonomy node id.
pub const COLOR_ID: &str = "color_id";

/// Controlled vocabulary name ("usage", "habitat", ...).
pub const VOCABULARY: &str = "vocabulary";

/// Free-text search query.
pub const QUERY: &str = "query";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of plants evaluated.
pub const PLANT_COUNT: &str = "plant_count";

/// Number of plants surviving a filter.
pub const RESULT_COUNT: &str = "result_count";

/// Number of entries or nodes an index was built from.
pub const ENTRY_COUNT: &str = "entry_count";

/// Number of canonical keys in a built index.
pub const KEY_COUNT: &str = "key_count";

/// Number of active facets in a filter request.
pub const FACET_COUNT: &str = "facet_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Number of alias collisions skipped by first-wins registration.
pub const COLLISIONS: &str = "collisions";

/// Number of cycles detected in the color taxonomy.
pub const CYCLE_COUNT: &str = "cycle_count";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

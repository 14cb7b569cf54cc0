//! flora: command-line tool for inspecting and querying a plant catalog.
//!
//! Vocabularies and the color taxonomy default to the bundled data; point
//! `FLORA_VOCABULARY_PATH` / `FLORA_COLOR_TAXONOMY_PATH` (or the matching
//! flags) at YAML or JSON files to override them.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flora_core::{
    canonicalize, CatalogConfig, ColorTaxonomyConfig, ColorTaxonomyIndex, FilterCriteria,
    FilterOptions, PlantRecord, VocabularyConfig, VocabularyKind, VocabularySet,
};
use flora_search::{FacetFilterEngine, Preparer};

#[derive(Parser)]
#[command(name = "flora")]
#[command(author, version, about = "Inspect and query a flora plant catalog")]
#[command(propagate_version = true)]
struct Cli {
    /// Vocabulary file (YAML or JSON); overrides FLORA_VOCABULARY_PATH
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Color taxonomy file (YAML or JSON); overrides FLORA_COLOR_TAXONOMY_PATH
    #[arg(long, global = true)]
    colors: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical key of each input
    Canonicalize {
        /// Text to canonicalize
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Resolve values against a controlled vocabulary
    Resolve {
        /// Vocabulary name (usage, habitat, season, ...)
        #[arg(long = "in", value_name = "VOCABULARY")]
        kind: VocabularyKind,

        /// Values to resolve
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the filter tokens a color selection expands to
    ExpandColor {
        /// Color ids, names or translations
        #[arg(required = true, num_args = 1.., value_name = "COLOR")]
        selection: Vec<String>,
    },

    /// Check the color taxonomy for cycles and unknown parents
    ValidateTaxonomy,

    /// Filter a catalog by facets
    Search(SearchArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Catalog file (JSON array of plant records); overrides FLORA_CATALOG_PATH
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Free-text query
    #[arg(short, long)]
    query: Option<String>,

    /// Required usage (repeatable, all must match)
    #[arg(long)]
    usage: Vec<String>,

    /// Accepted habitat (repeatable, any may match)
    #[arg(long)]
    habitat: Vec<String>,

    /// Accepted color (repeatable, any may match, includes descendants)
    #[arg(long)]
    color: Vec<String>,

    /// Living space (indoor, outdoor; both flags match only "both" plants)
    #[arg(long = "living-space")]
    living_space: Vec<String>,

    /// Season the plant must list
    #[arg(long)]
    season: Option<String>,

    /// Plant type
    #[arg(long = "type")]
    plant_type: Option<String>,

    /// Maintenance level
    #[arg(long)]
    maintenance: Option<String>,

    /// Only plants non-toxic to pets
    #[arg(long)]
    pet_safe: bool,

    /// Only plants non-toxic to humans
    #[arg(long)]
    human_safe: bool,

    /// Only plants with seeds available
    #[arg(long)]
    seeds: bool,

    /// Only liked plants (see --liked)
    #[arg(long)]
    favorites: bool,

    /// Liked plant ids
    #[arg(long, num_args = 1..)]
    liked: Vec<String>,

    /// Print matching prepared plants as JSON
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            query: self.query.clone(),
            plant_type: self.plant_type.clone(),
            maintenance: self.maintenance.clone(),
            season: self.season.clone(),
            usage: self.usage.clone(),
            habitat: self.habitat.clone(),
            colors: self.color.clone(),
            living_spaces: self.living_space.clone(),
            seeds_only: self.seeds,
            favorites_only: self.favorites,
            pet_safe: self.pet_safe,
            human_safe: self.human_safe,
        }
    }
}

#[derive(Serialize)]
struct Resolution<'a> {
    input: &'a str,
    canonical: String,
    db_value: Option<&'a str>,
    ui_value: Option<&'a str>,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, daily rotation)
///   LOG_ANSI    - "true"/"false" override ANSI colors
///   RUST_LOG    - standard env filter (default: "flora=info")
///
/// Console output goes to stderr so command output stays pipeable.
fn init_tracing() -> Option<WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "flora=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let guard = if let Some(ref path) = log_file {
        let path = Path::new(path);
        let file_dir = path.parent().unwrap_or(Path::new("."));
        let file_name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("flora.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    debug!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stderr)"),
        "Logging initialized"
    );
    guard
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CatalogConfig::from_env();
    if let Some(path) = cli.vocabulary {
        config = config.with_vocabulary_path(path);
    }
    if let Some(path) = cli.colors {
        config = config.with_color_taxonomy_path(path);
    }

    match cli.command {
        Commands::Canonicalize { text } => cmd_canonicalize(&text),
        Commands::Resolve { kind, values, json } => {
            cmd_resolve(&load_vocabularies(&config)?, kind, &values, json)
        }
        Commands::ExpandColor { selection } => {
            cmd_expand_color(&load_colors(&config)?, &selection)
        }
        Commands::ValidateTaxonomy => cmd_validate_taxonomy(&load_colors(&config)?),
        Commands::Search(args) => {
            if let Some(path) = &args.catalog {
                config = config.with_catalog_path(path);
            }
            cmd_search(&config, &args)
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

fn load_vocabularies(config: &CatalogConfig) -> anyhow::Result<VocabularySet> {
    let set = match &config.vocabulary_path {
        Some(path) => {
            let vocab_config = VocabularyConfig::load(path)
                .with_context(|| format!("loading vocabularies from {}", path.display()))?;
            VocabularySet::from_config(&vocab_config)?
        }
        None => VocabularySet::bundled()?,
    };
    Ok(set)
}

fn load_colors(config: &CatalogConfig) -> anyhow::Result<ColorTaxonomyIndex> {
    let index = match &config.color_taxonomy_path {
        Some(path) => {
            let color_config = ColorTaxonomyConfig::load(path)
                .with_context(|| format!("loading color taxonomy from {}", path.display()))?;
            ColorTaxonomyIndex::from_config(&color_config)
        }
        None => ColorTaxonomyIndex::bundled()?,
    };
    Ok(index)
}

fn load_catalog(path: &Path) -> anyhow::Result<Vec<PlantRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let records: Vec<PlantRecord> = serde_json::from_str(&content)
        .with_context(|| format!("parsing catalog {}", path.display()))?;
    Ok(records)
}

// =============================================================================
// COMMANDS
// =============================================================================

fn cmd_canonicalize(text: &[String]) -> anyhow::Result<()> {
    for input in text {
        println!("{}\t{}", input, canonicalize(input));
    }
    Ok(())
}

fn cmd_resolve(
    vocab: &VocabularySet,
    kind: VocabularyKind,
    values: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let registry = vocab.registry(kind);
    let resolutions: Vec<Resolution<'_>> = values
        .iter()
        .map(|value| Resolution {
            input: value,
            canonical: canonicalize(value),
            db_value: registry.to_db(value),
            ui_value: registry.to_ui(value),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&resolutions)?);
        return Ok(());
    }

    for r in &resolutions {
        match (r.db_value, r.ui_value) {
            (Some(db), Some(ui)) => println!("{}\t{}\t{}", r.input, db, ui),
            _ => println!("{}\t(unresolved in {})", r.input, kind),
        }
    }
    Ok(())
}

fn cmd_expand_color(colors: &ColorTaxonomyIndex, selected: &[String]) -> anyhow::Result<()> {
    for raw in selected {
        if colors.resolve(raw).is_none() {
            info!(color = %raw, "Color not in taxonomy, matching its own name only");
        }
    }
    let tokens: BTreeSet<String> = colors.expand_selection(selected).into_iter().collect();
    for token in tokens {
        println!("{}", token);
    }
    Ok(())
}

fn cmd_validate_taxonomy(colors: &ColorTaxonomyIndex) -> anyhow::Result<()> {
    let cycles = colors.find_cycles();
    let dangling = colors.dangling_parents();

    println!(
        "{} colors ({} primary)",
        colors.len(),
        colors.primary_colors().len()
    );
    for cycle in &cycles {
        println!("cycle: {}", cycle.join(" -> "));
    }
    for (child, parent) in &dangling {
        println!("unknown parent: {} -> {}", child, parent);
    }

    if !cycles.is_empty() || !dangling.is_empty() {
        bail!(
            "taxonomy has {} cycle(s) and {} unknown parent reference(s)",
            cycles.len(),
            dangling.len()
        );
    }
    println!("ok");
    Ok(())
}

fn cmd_search(config: &CatalogConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let Some(catalog_path) = &config.catalog_path else {
        bail!("no catalog given; pass --catalog or set FLORA_CATALOG_PATH");
    };

    let vocab = load_vocabularies(config)?;
    let colors = load_colors(config)?;
    let records = load_catalog(catalog_path)?;
    let plants = Preparer::new(&vocab, &colors).prepare_catalog(&records);

    let criteria = args.criteria();
    let options = FilterOptions::new()
        .with_expanded_colors(colors.expand_selection(&criteria.colors))
        .with_liked_ids(args.liked.iter().cloned());

    let hits = FacetFilterEngine::new(&vocab).filter_plants(&plants, &criteria, &options);
    info!(
        plant_count = plants.len(),
        result_count = hits.len(),
        facet_count = criteria.active_facet_count(),
        "Search complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
    } else {
        for plant in hits {
            println!("{}\t{}", plant.id, plant.name);
        }
    }
    Ok(())
}

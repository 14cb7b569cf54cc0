//! Test fixtures for catalog preparation and filtering tests.
//!
//! Provides a small catalog authored against the bundled vocabularies and
//! color taxonomy.

#![allow(dead_code)]

use flora_search::{
    ColorTaxonomyIndex, PlantRecord, PreparedPlant, Preparer, VocabularySet,
};

/// Plant ids in catalog order.
pub mod ids {
    pub const BASIL: &str = "basil";
    pub const LAVENDER: &str = "lavender";
    pub const ALOE: &str = "aloe";
    pub const BOSTON_FERN: &str = "boston-fern";
    pub const ROSE: &str = "rose";
    pub const AGAVE: &str = "agave";
    pub const MYSTERY: &str = "mystery";
}

/// Same catalog as [`catalog`], in the storage layer's JSON shape.
pub const CATALOG_JSON: &str = r#"[
  {
    "id": "basil",
    "name": "Sweet Basil",
    "scientificName": "Ocimum basilicum",
    "colors": ["Green"],
    "utility": ["comestible"],
    "habitat": ["Tropical"],
    "seasons": ["Summer"],
    "type": "herb",
    "maintenanceLevel": "easy",
    "livingSpace": "indoor",
    "toxicityPets": "non-toxic",
    "toxicityHuman": "non-toxic",
    "seedsAvailable": true
  },
  {
    "id": 42,
    "name": "Unknown",
    "colors": 7,
    "seasons": null
  }
]"#;

pub fn vocab() -> VocabularySet {
    VocabularySet::bundled().expect("bundled vocabularies parse")
}

pub fn colors() -> ColorTaxonomyIndex {
    ColorTaxonomyIndex::bundled().expect("bundled color taxonomy parses")
}

/// The reference plant: green, edible, tropical, summer.
pub fn basil() -> PlantRecord {
    PlantRecord::new(ids::BASIL, "Sweet Basil")
        .with_scientific_name("Ocimum basilicum")
        .with_colors(vec!["Green"])
        .with_usage(vec!["comestible"])
        .with_habitat(vec!["Tropical"])
        .with_seasons(vec!["Summer"])
        .with_plant_type("herb")
        .with_maintenance("easy")
        .with_living_space("indoor")
        .with_toxicity("non-toxic", "non-toxic")
        .with_seeds_available(true)
}

pub fn catalog() -> Vec<PlantRecord> {
    vec![
        basil(),
        PlantRecord::new(ids::LAVENDER, "English Lavender")
            .with_scientific_name("Lavandula angustifolia")
            .with_meaning("Devotion and calm")
            .with_colors(vec!["Lavender"])
            .with_usage("aromatic; medicinal")
            .with_habitat("Mediterranean")
            .with_seasons(vec!["Summer"])
            .with_plant_type("shrub")
            .with_maintenance("low")
            .with_living_space("outdoor")
            .with_toxicity("mildly toxic", "non-toxic")
            .with_seeds_available(true),
        PlantRecord::new(ids::ALOE, "Aloe Vera")
            .with_colors(vec!["Green"])
            .with_usage(vec!["medicinal"])
            .with_habitat(vec!["desert"])
            .with_seasons(vec!["Spring", "Summer"])
            .with_plant_type("succulent")
            .with_maintenance("easy")
            .with_living_space("Indoor & Outdoor")
            .with_toxicity("toxic", "mild"),
        PlantRecord::new(ids::BOSTON_FERN, "Boston Fern")
            .with_description("Arching fronds for shady rooms")
            .with_colors(vec!["Emerald"])
            .with_usage(vec!["decorative"])
            .with_habitat(vec!["tropical", "forest"])
            .with_seasons(vec!["Spring"])
            .with_plant_type("fern")
            .with_maintenance("moderate")
            .with_living_space("houseplant")
            .with_toxicity("safe", "safe"),
        PlantRecord::new(ids::ROSE, "Garden Rose")
            .with_colors(vec!["Crimson", "Rouge"])
            .with_usage(vec!["ornamental", "edible", "aromatic"])
            .with_habitat(vec!["temperate"])
            .with_seasons(vec!["Spring", "Summer"])
            .with_plant_type("shrub")
            .with_maintenance("high")
            .with_living_space("outdoor")
            .with_toxicity("non toxic", "non toxic"),
        PlantRecord::new(ids::AGAVE, "Blue Agave")
            .with_colors(vec!["Blue-Grey"])
            .with_usage(vec!["edible"])
            .with_habitat(vec!["arid"])
            .with_plant_type("succulent")
            .with_living_space("anywhere"),
        PlantRecord::new(ids::MYSTERY, "Mystery Plant"),
    ]
}

pub fn prepared_catalog() -> Vec<PreparedPlant> {
    let vocab = vocab();
    let colors = colors();
    Preparer::new(&vocab, &colors).prepare_catalog(&catalog())
}

pub fn ids_of<'a>(plants: &[&'a PreparedPlant]) -> Vec<&'a str> {
    plants.iter().map(|p| p.id.as_str()).collect()
}

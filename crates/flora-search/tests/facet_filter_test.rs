//! Integration tests for faceted filtering over the bundled vocabularies.
//!
//! These tests prepare the fixture catalog with the bundled vocabularies and
//! color taxonomy, then check each facet's matching policy end to end.

mod fixtures;

use fixtures::ids::*;
use flora_search::{FacetFilterEngine, FilterCriteria, FilterOptions, PreparedPlant};

/// Filter the fixture catalog, expanding the criteria's colors through the
/// bundled taxonomy, and return matching ids in result order.
fn search(criteria: &FilterCriteria) -> Vec<String> {
    search_with_likes(criteria, &[])
}

fn search_with_likes(criteria: &FilterCriteria, liked: &[&str]) -> Vec<String> {
    let vocab = fixtures::vocab();
    let colors = fixtures::colors();
    let plants = fixtures::prepared_catalog();
    let options = FilterOptions::new()
        .with_expanded_colors(colors.expand_selection(&criteria.colors))
        .with_liked_ids(liked.iter().copied());

    FacetFilterEngine::new(&vocab)
        .filter_plants(&plants, criteria, &options)
        .into_iter()
        .map(|p| p.id.clone())
        .collect()
}

// =============================================================================
// REFERENCE SCENARIO
// =============================================================================

#[test]
fn test_reference_plant_scenario() {
    let vocab = fixtures::vocab();
    let colors = fixtures::colors();
    let plants = fixtures::prepared_catalog();
    let basil: Vec<PreparedPlant> = plants.into_iter().filter(|p| p.id == BASIL).collect();
    let engine = FacetFilterEngine::new(&vocab);

    let matches = |criteria: FilterCriteria| {
        let options = FilterOptions::new()
            .with_expanded_colors(colors.expand_selection(&criteria.colors));
        engine.filter_plants(&basil, &criteria, &options).len() == 1
    };

    assert!(matches(FilterCriteria::new().require_usage("comestible")));
    assert!(!matches(
        FilterCriteria::new()
            .require_usage("comestible")
            .require_usage("medicinal")
    ));
    assert!(matches(
        FilterCriteria::new().any_habitat("arid").any_habitat("tropical")
    ));
    assert!(matches(FilterCriteria::new().any_color("vert")));
    assert!(matches(FilterCriteria::new().with_season("Summer")));
    assert!(!matches(FilterCriteria::new().with_season("Winter")));
}

// =============================================================================
// SET FACETS
// =============================================================================

#[test]
fn test_usage_requires_every_selection() {
    assert_eq!(
        search(&FilterCriteria::new().require_usage("edible")),
        vec![BASIL, ROSE, AGAVE]
    );
    assert!(search(
        &FilterCriteria::new()
            .require_usage("edible")
            .require_usage("medicinal")
    )
    .is_empty());
    assert_eq!(
        search(
            &FilterCriteria::new()
                .require_usage("fragrant")
                .require_usage("culinary")
        ),
        vec![ROSE]
    );
}

#[test]
fn test_habitat_matches_any_selection() {
    assert_eq!(
        search(&FilterCriteria::new().any_habitat("arid").any_habitat("tropical")),
        vec![BASIL, ALOE, BOSTON_FERN, AGAVE]
    );
}

#[test]
fn test_color_selection_expands_to_descendants() {
    // Emerald is a child of green.
    assert_eq!(
        search(&FilterCriteria::new().any_color("green")),
        vec![BASIL, ALOE, BOSTON_FERN]
    );
    assert_eq!(
        search(&FilterCriteria::new().any_color("Vert")),
        vec![BASIL, ALOE, BOSTON_FERN]
    );
    assert_eq!(search(&FilterCriteria::new().any_color("red")), vec![ROSE]);
}

#[test]
fn test_color_child_selection_does_not_match_parent() {
    assert!(search(&FilterCriteria::new().any_color("lime")).is_empty());
    assert_eq!(
        search(&FilterCriteria::new().any_color("emerald")),
        vec![BOSTON_FERN]
    );
}

#[test]
fn test_unresolved_color_parts_are_searchable() {
    let ids = search(&FilterCriteria::new().any_color("blue"));
    assert!(ids.contains(&AGAVE.to_string()));
    assert!(!ids.contains(&BASIL.to_string()));
}

// =============================================================================
// SCALAR FACETS
// =============================================================================

#[test]
fn test_season_membership() {
    assert_eq!(
        search(&FilterCriteria::new().with_season("Summer")),
        vec![BASIL, LAVENDER, ALOE, ROSE]
    );
    assert_eq!(
        search(&FilterCriteria::new().with_season("été")),
        vec![BASIL, LAVENDER, ALOE, ROSE]
    );
    assert!(search(&FilterCriteria::new().with_season("Winter")).is_empty());
}

#[test]
fn test_type_and_maintenance_equality() {
    assert_eq!(
        search(&FilterCriteria::new().with_plant_type("Bush")),
        vec![LAVENDER, ROSE]
    );
    assert_eq!(
        search(&FilterCriteria::new().with_maintenance("easy")),
        vec![BASIL, LAVENDER, ALOE]
    );
}

// =============================================================================
// LIVING SPACE
// =============================================================================

#[test]
fn test_single_living_space_includes_both() {
    assert_eq!(
        search(&FilterCriteria::new().in_living_space("indoor")),
        vec![BASIL, ALOE, BOSTON_FERN, AGAVE]
    );
    assert_eq!(
        search(&FilterCriteria::new().in_living_space("outdoor")),
        vec![LAVENDER, ALOE, ROSE, AGAVE]
    );
}

#[test]
fn test_dual_living_space_matches_both_only() {
    assert_eq!(
        search(
            &FilterCriteria::new()
                .in_living_space("indoor")
                .in_living_space("outdoor")
        ),
        vec![ALOE, AGAVE]
    );
    assert_eq!(
        search(&FilterCriteria::new().in_living_space("Indoor & Outdoor")),
        vec![ALOE, AGAVE]
    );
}

// =============================================================================
// TOGGLES
// =============================================================================

#[test]
fn test_safety_toggles() {
    assert_eq!(
        search(&FilterCriteria::new().pet_safe_only()),
        vec![BASIL, BOSTON_FERN, ROSE]
    );
    assert_eq!(
        search(&FilterCriteria::new().human_safe_only()),
        vec![BASIL, LAVENDER, BOSTON_FERN, ROSE]
    );
}

#[test]
fn test_seeds_only() {
    assert_eq!(
        search(&FilterCriteria::new().seeds_only()),
        vec![BASIL, LAVENDER]
    );
}

#[test]
fn test_favorites_keep_catalog_order() {
    let criteria = FilterCriteria::new().favorites_only();
    assert_eq!(
        search_with_likes(&criteria, &[ROSE, BASIL]),
        vec![BASIL, ROSE]
    );
    assert!(search_with_likes(&criteria, &[]).is_empty());
}

// =============================================================================
// FREE TEXT
// =============================================================================

#[test]
fn test_query_substring() {
    assert_eq!(search(&FilterCriteria::new().with_query("BASIL")), vec![BASIL]);
    assert_eq!(search(&FilterCriteria::new().with_query("calm")), vec![LAVENDER]);
    assert_eq!(
        search(&FilterCriteria::new().with_query("fronds")),
        vec![BOSTON_FERN]
    );
    assert_eq!(
        search(&FilterCriteria::new().with_query("green")),
        vec![BASIL, ALOE]
    );
}

// =============================================================================
// COMBINATIONS AND EDGE CASES
// =============================================================================

#[test]
fn test_combined_facets() {
    let criteria = FilterCriteria::new()
        .require_usage("edible")
        .in_living_space("indoor")
        .pet_safe_only();
    assert_eq!(search(&criteria), vec![BASIL]);
}

#[test]
fn test_empty_filter_returns_everything() {
    assert_eq!(
        search(&FilterCriteria::new()),
        vec![BASIL, LAVENDER, ALOE, BOSTON_FERN, ROSE, AGAVE, MYSTERY]
    );
}

#[test]
fn test_malformed_values_leave_facets_unapplied() {
    let criteria = FilterCriteria::new()
        .require_usage("")
        .any_habitat("   ")
        .in_living_space("greenhouse")
        .with_query("");
    assert_eq!(search(&criteria).len(), 7);
}

#[test]
fn test_order_is_preserved() {
    let vocab = fixtures::vocab();
    let mut plants = fixtures::prepared_catalog();
    plants.reverse();

    let criteria = FilterCriteria::new().require_usage("edible");
    let result = FacetFilterEngine::new(&vocab).filter_plants(
        &plants,
        &criteria,
        &FilterOptions::new(),
    );
    assert_eq!(fixtures::ids_of(&result), vec![AGAVE, ROSE, BASIL]);
}

use super::common::*;
use crate::mcda::domain::{Category, CategoryId, Parameter, ParameterId};
use crate::mcda::engine::{breakdown, compute_score, ScoringEngine};
use crate::mcda::hierarchy::McdaHierarchy;
use std::sync::Arc;

#[test]
fn reference_evaluation_matches_observed_composite() {
    let hierarchy = two_category_hierarchy();

    let result = breakdown(&hierarchy, &reference_evaluations());

    assert_eq!(result.raw_score, 7.875);
    assert_eq!(result.score, 7.88);
    assert_eq!(compute_score(&hierarchy, &reference_evaluations()), 7.88);

    let category_a = &result.categories[0];
    assert_eq!(category_a.category_id, CategoryId::new("a"));
    assert_eq!(category_a.normalized_score, 7.75);
    assert_eq!(category_a.contribution, 3.875);
    assert_eq!(result.categories[1].normalized_score, 8.0);
}

#[test]
fn empty_evaluations_score_zero() {
    assert_eq!(compute_score(&McdaHierarchy::standard(), &Default::default()), 0.0);
    assert_eq!(compute_score(&two_category_hierarchy(), &Default::default()), 0.0);
}

#[test]
fn partial_evaluations_keep_declared_weights() {
    let hierarchy = two_category_hierarchy();

    let score = compute_score(&hierarchy, &evaluations(&[("1", 8.0), ("3", 9.0)]));

    assert_eq!(score, 4.7);
}

#[test]
fn edge_values_combine_linearly() {
    let hierarchy = two_category_hierarchy();

    let score = compute_score(
        &hierarchy,
        &evaluations(&[("1", 0.0), ("2", 10.0), ("3", 5.0), ("4", 2.5)]),
    );

    assert_eq!(score, 4.5);
}

#[test]
fn uniform_ratings_map_to_same_composite() {
    let hierarchy = McdaHierarchy::standard();

    assert_eq!(compute_score(&hierarchy, &uniform_evaluations(&hierarchy, 0.0)), 0.0);
    assert_eq!(compute_score(&hierarchy, &uniform_evaluations(&hierarchy, 10.0)), 10.0);
    assert_eq!(compute_score(&hierarchy, &uniform_evaluations(&hierarchy, 7.0)), 7.0);
}

#[test]
fn out_of_range_values_are_clamped() {
    let hierarchy = two_category_hierarchy();

    let negative = compute_score(&hierarchy, &evaluations(&[("1", -5.0), ("3", 9.0)]));
    let zero = compute_score(&hierarchy, &evaluations(&[("1", 0.0), ("3", 9.0)]));
    assert_eq!(negative, zero);

    let above = compute_score(&hierarchy, &evaluations(&[("1", 15.0), ("3", 9.0)]));
    let ten = compute_score(&hierarchy, &evaluations(&[("1", 10.0), ("3", 9.0)]));
    assert_eq!(above, ten);
}

#[test]
fn omitted_parameter_scores_lower_than_removed_parameter() {
    let with_gap = McdaHierarchy::new(vec![Category::new("c", "C", 100.0)
        .with_parameter(Parameter::new("p1", "P1", 50.0))
        .with_parameter(Parameter::new("p2", "P2", 50.0))]);
    let without = McdaHierarchy::new(vec![
        Category::new("c", "C", 100.0).with_parameter(Parameter::new("p1", "P1", 50.0))
    ]);
    let ratings = evaluations(&[("p1", 8.0)]);

    let omitted = compute_score(&with_gap, &ratings);
    let removed = compute_score(&without, &ratings);

    assert_eq!(omitted, 4.0);
    assert_eq!(removed, 8.0);
    assert!(omitted < removed);
}

#[test]
fn unknown_ids_are_ignored_and_reported() {
    let hierarchy = two_category_hierarchy();
    let mut ratings = reference_evaluations();
    ratings.insert("rainfall".to_string(), 10.0);
    ratings.insert("altitude".to_string(), 3.0);

    let result = breakdown(&hierarchy, &ratings);

    assert_eq!(result.score, compute_score(&hierarchy, &reference_evaluations()));
    assert_eq!(
        result.ignored_parameters,
        vec!["altitude".to_string(), "rainfall".to_string()]
    );
}

#[test]
fn zero_weight_category_contributes_nothing() {
    let hierarchy = McdaHierarchy::new(vec![
        Category::new("a", "A", 50.0).with_parameter(Parameter::new("x", "X", 100.0)),
        Category::new("z", "Z", 50.0).with_parameter(Parameter::new("y", "Y", 0.0)),
        Category::new("empty", "Empty", 0.0),
    ]);

    let result = breakdown(&hierarchy, &evaluations(&[("x", 10.0), ("y", 10.0)]));

    assert_eq!(result.score, 5.0);
    assert_eq!(result.categories[1].normalized_score, 0.0);
    assert_eq!(result.categories[2].contribution, 0.0);
}

#[test]
fn misconfigured_weights_still_score() {
    let hierarchy = McdaHierarchy::new(vec![
        Category::new("a", "A", 60.0).with_parameter(Parameter::new("x", "X", 100.0)),
        Category::new("b", "B", 60.0).with_parameter(Parameter::new("y", "Y", 100.0)),
    ]);
    assert!(!hierarchy.validate_category_weights());

    let score = compute_score(&hierarchy, &uniform_evaluations(&hierarchy, 10.0));

    assert_eq!(score, 12.0);
}

#[test]
fn breakdown_lists_missing_parameters() {
    let hierarchy = McdaHierarchy::standard();
    let ratings = evaluations(&[("land_capacity", 6.0), ("topography", 9.0)]);

    let result = breakdown(&hierarchy, &ratings);

    let property = result
        .categories
        .iter()
        .find(|slice| slice.category_id.as_str() == "property")
        .expect("property category present");
    assert_eq!(property.evaluated_parameters, 1);
    assert_eq!(
        property.missing_parameters,
        vec![ParameterId::new("site_analysis")]
    );
    assert_eq!(property.normalized_score, 3.0);
    assert!(result.ignored_parameters.is_empty());
}

#[test]
fn nan_rating_counts_as_missing_value() {
    let hierarchy = two_category_hierarchy();
    let mut ratings = evaluations(&[("1", 8.0), ("3", 9.0)]);
    ratings.insert("2".to_string(), f64::NAN);

    assert_eq!(compute_score(&hierarchy, &ratings), 4.7);

    let category_a = &breakdown(&hierarchy, &ratings).categories[0];
    assert_eq!(category_a.evaluated_parameters, 1);
    assert_eq!(category_a.missing_parameters, vec![ParameterId::new("2")]);
}

#[test]
fn composite_and_breakdown_agree() {
    let standard = McdaHierarchy::standard();
    let cases = [
        (two_category_hierarchy(), reference_evaluations()),
        (two_category_hierarchy(), evaluations(&[("1", 8.0), ("3", 9.0)])),
        (
            standard.clone(),
            evaluations(&[("topography", 40.0), ("distance_towns", -3.0), ("rainfall", 7.0)]),
        ),
        (standard.clone(), uniform_evaluations(&standard, 7.0)),
    ];

    for (hierarchy, ratings) in &cases {
        let detail = breakdown(hierarchy, ratings);
        assert_eq!(compute_score(hierarchy, ratings), detail.score);
        let summed: f64 = detail.categories.iter().map(|slice| slice.contribution).sum();
        assert_eq!(summed, detail.raw_score);
    }
}

#[test]
fn engine_scores_against_injected_hierarchy() {
    let engine = ScoringEngine::new(Arc::new(two_category_hierarchy()));

    assert_eq!(engine.compute_score(&reference_evaluations()), 7.88);
    assert_eq!(engine.breakdown(&reference_evaluations()).score, 7.88);
    assert_eq!(engine.hierarchy().categories().len(), 2);

    let standard = ScoringEngine::standard();
    assert_eq!(standard.compute_score(&reference_evaluations()), 0.0);
}

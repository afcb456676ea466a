mod common;

use std::collections::HashMap;

use common::taste;
use moodlist::{
    ErrorKind,
    taste::{
        ActivityCatalog, ActivityCategory, SeedSet, build_recommendation_query,
        activity::ActivityProfile,
        query::{MAX_LIMIT, validate_count},
    },
};

fn seeds() -> SeedSet {
    SeedSet {
        artists: vec!["a1".to_string(), "a2".to_string()],
        genres: vec!["g1".to_string(), "g2".to_string(), "g3".to_string()],
    }
}

#[test]
fn test_workout_query() {
    let profile = taste(&["a1"], &["g1"]);
    let query = build_recommendation_query(
        &seeds(),
        &profile,
        ActivityCategory::Workout,
        50,
        &ActivityCatalog::standard(),
    )
    .unwrap();

    assert_eq!(query.seed_artists_param(), "a1,a2");
    assert_eq!(query.seed_genres_param(), "g1,g2,g3");
    assert_eq!(query.limit, 50);
    assert_eq!(
        query.constraints_param(),
        "min_energy=0.8&min_tempo=120&min_danceability=0.7&min_valence=0.6"
    );
}

#[test]
fn test_relaxation_mixes_bounds() {
    let profile = taste(&["a1"], &["g1"]);
    let query = build_recommendation_query(
        &seeds(),
        &profile,
        ActivityCategory::Relaxation,
        10,
        &ActivityCatalog::standard(),
    )
    .unwrap();

    assert_eq!(
        query.constraints_param(),
        "min_acousticness=0.3&min_valence=0.6&max_energy=0.8&max_tempo=120"
    );
}

#[test]
fn test_query_pairs() {
    let profile = taste(&["a1"], &["g1"]);
    let query = build_recommendation_query(
        &seeds(),
        &profile,
        ActivityCategory::Focus,
        100,
        &ActivityCatalog::standard(),
    )
    .unwrap();

    let pairs = query.to_query_pairs();
    let expected: Vec<(String, String)> = [
        ("seed_artists", "a1,a2"),
        ("seed_genres", "g1,g2,g3"),
        ("limit", "100"),
        ("min_acousticness", "0.3"),
        ("max_energy", "0.8"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    assert_eq!(pairs, expected);
}

#[test]
fn test_every_standard_activity_has_a_formula() {
    let activities = ActivityCatalog::standard();
    let profile = taste(&["a1"], &["g1"]);

    for activity in ActivityCategory::ALL {
        let query =
            build_recommendation_query(&seeds(), &profile, activity, 20, &activities).unwrap();
        assert!(!query.constraints.is_empty(), "{} has no constraints", activity);
    }
}

#[test]
fn test_missing_formula_is_config_error() {
    let mut tables = HashMap::new();
    tables.insert(
        ActivityCategory::Party,
        ActivityProfile {
            keywords: vec!["party".to_string()],
            formula: None,
        },
    );
    let activities = ActivityCatalog::new(tables);
    let profile = taste(&["a1"], &["g1"]);

    let err = build_recommendation_query(&seeds(), &profile, ActivityCategory::Party, 20, &activities)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigError);

    let err = build_recommendation_query(&seeds(), &profile, ActivityCategory::Focus, 20, &activities)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigError);
}

#[test]
fn test_count_bounds() {
    assert!(validate_count(1).is_ok());
    assert!(validate_count(MAX_LIMIT).is_ok());
    assert_eq!(validate_count(0).unwrap_err().kind(), ErrorKind::ConfigError);
    assert_eq!(
        validate_count(MAX_LIMIT + 1).unwrap_err().kind(),
        ErrorKind::ConfigError
    );

    let profile = taste(&["a1"], &["g1"]);
    let err = build_recommendation_query(
        &seeds(),
        &profile,
        ActivityCategory::Workout,
        0,
        &ActivityCatalog::standard(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigError);
}

use serde::Serialize;

use crate::{
    Error, Res,
    taste::{
        activity::{ActivityCatalog, ActivityCategory, FeatureRule},
        profile::TasteProfile,
        seeds::SeedSet,
    },
};

/// Largest `limit` the recommendations endpoint accepts.
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureConstraint {
    pub rule: FeatureRule,
    pub value: f64,
}

impl FeatureConstraint {
    pub fn param_name(&self) -> String {
        self.rule.param_name()
    }
}

/// Parameters of one recommendations request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationQuery {
    pub seed_artists: Vec<String>,
    pub seed_genres: Vec<String>,
    pub limit: u32,
    pub constraints: Vec<FeatureConstraint>,
}

impl RecommendationQuery {
    pub fn seed_artists_param(&self) -> String {
        self.seed_artists.join(",")
    }

    pub fn seed_genres_param(&self) -> String {
        self.seed_genres.join(",")
    }

    /// The audio-feature part of the query string, in formula order,
    /// e.g. `min_energy=0.8&min_tempo=120`.
    pub fn constraints_param(&self) -> String {
        self.constraints
            .iter()
            .map(|c| format!("{}={}", c.param_name(), c.value))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("seed_artists".to_string(), self.seed_artists_param()),
            ("seed_genres".to_string(), self.seed_genres_param()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        pairs.extend(
            self.constraints
                .iter()
                .map(|c| (c.param_name(), c.value.to_string())),
        );
        pairs
    }
}

pub fn validate_count(count: u32) -> Res<()> {
    if !(1..=MAX_LIMIT).contains(&count) {
        return Err(Error::config(format!(
            "Track count must be between 1 and {}, got {}",
            MAX_LIMIT, count
        )));
    }
    Ok(())
}

/// Combines the seeds with the activity's formula, filled in from the user's
/// averaged audio features.
///
/// # Errors
///
/// Returns [`Error::Config`] if the activity has no registered formula or
/// `count` is outside `1..=100`.
pub fn build_recommendation_query(
    seeds: &SeedSet,
    taste: &TasteProfile,
    activity: ActivityCategory,
    count: u32,
    activities: &ActivityCatalog,
) -> Res<RecommendationQuery> {
    validate_count(count)?;

    let constraints = activities
        .formula(activity)?
        .iter()
        .map(|rule| FeatureConstraint {
            rule: *rule,
            value: taste.avg_audio_features.get(rule.feature),
        })
        .collect();

    Ok(RecommendationQuery {
        seed_artists: seeds.artists.clone(),
        seed_genres: seeds.genres.clone(),
        limit: count,
        constraints,
    })
}

use axum::{extract::State, response::Json};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Res,
    api::{json::JsonBody, session::CurrentSession},
    info,
    server::AppState,
    success,
    taste::{
        ActivityCategory, SeedSelector, SeedSet, TrackSummary, build_recommendation_query,
        query::validate_count,
    },
};

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub activity: String,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub activity: ActivityCategory,
    pub seeds: SeedSet,
    pub tracks: Vec<TrackSummary>,
}

pub async fn recommendations(
    State(state): State<AppState>,
    current: CurrentSession,
    JsonBody(body): JsonBody<RecommendationsRequest>,
) -> Res<Json<RecommendationsResponse>> {
    let activity: ActivityCategory = body.activity.parse()?;
    let count = body.count.unwrap_or(state.config.recommendation_count);
    validate_count(count)?;

    let client = current.client(&state).await?;
    let taste = current.taste(&client).await?;
    let playlists = client.user_playlists().await?;

    let mut rng = StdRng::from_os_rng();
    let seeds = SeedSelector::new(&client, &state.activities)
        .with_max_attempts(state.config.seed_search_max_attempts)
        .select_seeds(activity, &playlists, &taste, &mut rng)
        .await?;
    info!(
        "Seeds for {}: artists [{}] genres [{}]",
        activity,
        seeds.artists.join(", "),
        seeds.genres.join(", ")
    );

    let query = build_recommendation_query(&seeds, &taste, activity, count, &state.activities)?;
    let tracks = client.recommendations(&query).await?;
    success!("{} recommendations fetched for {}", tracks.len(), activity);

    Ok(Json(RecommendationsResponse {
        activity,
        seeds,
        tracks: tracks.into_iter().map(TrackSummary::from).collect(),
    }))
}

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::{
    Res,
    api::session::CurrentSession,
    server::AppState,
    spotify::SpotifyClient,
    success,
    taste::{RawProfileData, TasteProfile, aggregate_profile},
    types::{Artist, Track, UserProfile},
};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub top_artists: Vec<Artist>,
    pub top_tracks: Vec<Track>,
    pub taste: TasteProfile,
}

pub struct FetchedProfile {
    pub raw: RawProfileData,
    pub top_tracks: Vec<Track>,
}

/// Fetches the profile, top artists and top tracks concurrently, then the
/// audio features of the top tracks.
pub async fn fetch_raw_profile(client: &SpotifyClient) -> Res<FetchedProfile> {
    let (user, top_artists, top_tracks) = tokio::try_join!(
        client.current_user(),
        client.top_artists(),
        client.top_tracks()
    )?;

    let track_ids: Vec<String> = top_tracks.iter().filter_map(|t| t.id.clone()).collect();
    let audio_features = client.audio_features(&track_ids).await?;

    Ok(FetchedProfile {
        raw: RawProfileData {
            user,
            top_artists,
            audio_features,
        },
        top_tracks,
    })
}

pub async fn profile(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Res<Json<ProfileResponse>> {
    let client = current.client(&state).await?;
    let fetched = fetch_raw_profile(&client).await?;
    let taste = aggregate_profile(&fetched.raw)?;
    current.store_taste(taste.clone()).await;

    success!(
        "Taste profile aggregated for {}: genres [{}]",
        taste.user_id,
        taste.top_genres.join(", ")
    );

    Ok(Json(ProfileResponse {
        profile: fetched.raw.user,
        top_artists: fetched.raw.top_artists,
        top_tracks: fetched.top_tracks,
        taste,
    }))
}

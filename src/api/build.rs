use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::{
    Res,
    api::{json::JsonBody, session::CurrentSession},
    info,
    server::AppState,
    success,
    taste::{PlaylistDraft, draft_to_playlist_request},
};

#[derive(Debug, Serialize)]
pub struct BuildResponse {
    pub playlist_id: String,
    pub tracks_added: usize,
}

/// Creates a private playlist from the client's draft and fills it in order.
pub async fn build(
    State(state): State<AppState>,
    current: CurrentSession,
    JsonBody(draft): JsonBody<PlaylistDraft>,
) -> Res<Json<BuildResponse>> {
    let request = draft_to_playlist_request(draft)?;
    let client = current.client(&state).await?;

    let user_id = match current.cached_taste().await {
        Some(taste) => taste.user_id,
        None => client.current_user().await?.id,
    };

    info!("Creating playlist '{}'", request.name);
    let created = client
        .create_playlist(&user_id, &request.create_body())
        .await?;

    let mut tracks_added = 0;
    for batch in request.track_batches() {
        client.add_tracks(&created.id, batch).await?;
        tracks_added += batch.len();
    }

    success!(
        "Playlist {} created with {} tracks",
        created.id,
        tracks_added
    );
    Ok(Json(BuildResponse {
        playlist_id: created.id,
        tracks_added,
    }))
}

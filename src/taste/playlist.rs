use serde::{Deserialize, Serialize};

use crate::{
    Error, Res,
    types::{CreatePlaylistRequest, Track},
};

/// Most track URIs accepted per add-tracks request.
pub const TRACK_BATCH: usize = 100;

pub const PLAYLIST_DESCRIPTION: &str = "Created via the Spotify API";

/// Client-supplied playlist to create once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDraft {
    pub name: String,
    #[serde(alias = "songs")]
    pub track_uris: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaylistRequest {
    pub name: String,
    pub tracks: Vec<String>,
}

impl PlaylistRequest {
    pub fn create_body(&self) -> CreatePlaylistRequest {
        CreatePlaylistRequest {
            name: self.name.clone(),
            description: PLAYLIST_DESCRIPTION.to_string(),
            public: false,
        }
    }

    pub fn track_batches(&self) -> std::slice::Chunks<'_, String> {
        self.tracks.chunks(TRACK_BATCH)
    }
}

/// Validates a draft and turns it into a playlist request.
///
/// Track order is preserved.
///
/// # Errors
///
/// Returns [`Error::Data`] if the name is blank, there are no tracks, or a
/// track is not a `spotify:` URI.
pub fn draft_to_playlist_request(draft: PlaylistDraft) -> Res<PlaylistRequest> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(Error::data("Playlist name must not be empty"));
    }
    if draft.track_uris.is_empty() {
        return Err(Error::data("Playlist must contain at least one track"));
    }
    if let Some(bad) = draft.track_uris.iter().find(|uri| !uri.starts_with("spotify:")) {
        return Err(Error::data(format!("Invalid track URI '{}'", bad)));
    }

    Ok(PlaylistRequest {
        name: name.to_string(),
        tracks: draft.track_uris,
    })
}

/// Compact view of a recommended track returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    pub artists: Vec<String>,
}

impl From<Track> for TrackSummary {
    fn from(track: Track) -> Self {
        Self {
            id: track.id,
            name: track.name,
            uri: track.uri,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}

#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use moodlist::{
    Error, Res,
    spotify::MusicCatalog,
    taste::{TasteProfile, profile::AudioFeatureAverages},
    types::{Artist, PlaylistItem, PlaylistSummary, SimplifiedArtist, Track},
};

/// In-memory stand-in for the music API.
#[derive(Default)]
pub struct FakeCatalog {
    pub playlists: HashMap<String, Vec<PlaylistItem>>,
    pub artists: HashMap<String, Artist>,
    pub search_results: Vec<PlaylistSummary>,
    pub artist_batches: Mutex<Vec<usize>>,
    pub searches: Mutex<u32>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artist(mut self, id: &str, genres: &[&str]) -> Self {
        self.artists.insert(
            id.to_string(),
            Artist {
                id: id.to_string(),
                name: format!("Artist {}", id),
                genres: genres.iter().map(|g| g.to_string()).collect(),
            },
        );
        self
    }

    /// A playlist with one track per entry of `artist_ids`.
    pub fn with_playlist(mut self, id: &str, artist_ids: &[&str]) -> Self {
        let items = artist_ids
            .iter()
            .enumerate()
            .map(|(i, artist)| item(&format!("{}-{}", id, i), artist))
            .collect();
        self.playlists.insert(id.to_string(), items);
        self
    }

    pub fn with_items(mut self, id: &str, items: Vec<PlaylistItem>) -> Self {
        self.playlists.insert(id.to_string(), items);
        self
    }

    pub fn with_search_results(mut self, ids: &[&str]) -> Self {
        self.search_results = ids.iter().map(|id| playlist(id, id)).collect();
        self
    }

    pub fn artist_batches(&self) -> Vec<usize> {
        self.artist_batches.lock().unwrap().clone()
    }

    pub fn search_count(&self) -> u32 {
        *self.searches.lock().unwrap()
    }
}

#[async_trait]
impl MusicCatalog for FakeCatalog {
    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<PlaylistItem>> {
        self.playlists
            .get(playlist_id)
            .cloned()
            .ok_or_else(|| Error::upstream_status(404, format!("no playlist {}", playlist_id)))
    }

    async fn several_artists(&self, ids: &[String]) -> Res<Vec<Artist>> {
        self.artist_batches.lock().unwrap().push(ids.len());
        Ok(ids
            .iter()
            .filter_map(|id| self.artists.get(id).cloned())
            .collect())
    }

    async fn search_playlists(&self, _query: &str, limit: u32) -> Res<Vec<PlaylistSummary>> {
        *self.searches.lock().unwrap() += 1;
        Ok(self
            .search_results
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub fn item(track_id: &str, artist_id: &str) -> PlaylistItem {
    PlaylistItem {
        track: Some(Track {
            id: Some(track_id.to_string()),
            name: format!("Track {}", track_id),
            uri: format!("spotify:track:{}", track_id),
            artists: vec![SimplifiedArtist {
                id: Some(artist_id.to_string()),
                name: format!("Artist {}", artist_id),
            }],
        }),
    }
}

pub fn playlist(id: &str, name: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn averages() -> AudioFeatureAverages {
    AudioFeatureAverages {
        acousticness: 0.3,
        energy: 0.8,
        valence: 0.6,
        danceability: 0.7,
        tempo: 120.0,
    }
}

pub fn taste(artists: &[&str], genres: &[&str]) -> TasteProfile {
    TasteProfile {
        user_id: "user-1".to_string(),
        top_artist_ids: artists.iter().map(|a| a.to_string()).collect(),
        top_genres: genres.iter().map(|g| g.to_string()).collect(),
        avg_audio_features: averages(),
    }
}

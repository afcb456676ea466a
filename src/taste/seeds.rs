//! Seed selection.
//!
//! Picks two artist seeds and up to three genre seeds for a recommendation
//! request, blending the user's own taste with a popular playlist for the
//! chosen activity:
//!
//! 1. If one of the user's playlists matches the activity keywords, its
//!    dominant artist and genre are seeded; otherwise a random top artist and
//!    a random top genre from the taste profile are used.
//! 2. One more genre is drawn from the top genres, skipping those already
//!    seeded. If none is left the slot stays empty.
//! 3. Public playlists for the activity are sampled until one yields an
//!    artist and a genre that are both new. The search is bounded; running
//!    out of attempts is reported as [`SeedSearch::Exhausted`].
//!
//! Randomness is injected so callers (and tests) control the source.

use futures::future::try_join_all;
use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Res,
    spotify::MusicCatalog,
    taste::{
        activity::{ActivityCatalog, ActivityCategory},
        profile::TasteProfile,
    },
    types::PlaylistSummary,
    utils, warning,
};

/// Candidate playlists requested per popular-playlist search.
pub const POPULAR_SEARCH_LIMIT: u32 = 20;

/// Maximum artist ids per lookup request during playlist analysis.
pub const ARTIST_BATCH: usize = 20;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSet {
    pub artists: Vec<String>,
    pub genres: Vec<String>,
}

/// Dominant artist and genre of a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPair {
    pub artist: String,
    pub genre: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSearch {
    Found(SeedPair),
    Exhausted { attempts: u32 },
}

pub struct SeedSelector<'a, C: MusicCatalog + ?Sized> {
    catalog: &'a C,
    activities: &'a ActivityCatalog,
    max_attempts: u32,
}

impl<'a, C: MusicCatalog + ?Sized> SeedSelector<'a, C> {
    pub fn new(catalog: &'a C, activities: &'a ActivityCatalog) -> Self {
        Self {
            catalog,
            activities,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Selects the seeds for one recommendation request.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the activity has no keyword table
    /// - [`Error::Data`] if a user playlist cannot be analyzed, no popular
    ///   playlist exists for the activity, or the fallback has no top artist
    /// - [`Error::ExhaustedSeedSearch`] if no unique popular seed was found
    /// - [`Error::Upstream`] on music API failures
    pub async fn select_seeds<R: Rng + ?Sized>(
        &self,
        activity: ActivityCategory,
        user_playlists: &[PlaylistSummary],
        taste: &TasteProfile,
        rng: &mut R,
    ) -> Res<SeedSet> {
        let matching = matching_playlists(self.activities, activity, user_playlists)?;
        let mut seeds = SeedSet::default();

        if let Some(playlist) = matching.choose(rng) {
            let pair = analyze_playlist(self.catalog, &playlist.id).await?;
            seeds.artists.push(pair.artist);
            seeds.genres.push(pair.genre);
        } else {
            if !push_unique(&mut seeds.artists, &taste.top_artist_ids, rng) {
                return Err(Error::data("Taste profile has no top artists to seed from"));
            }
            push_unique(&mut seeds.genres, &taste.top_genres, rng);
        }

        push_unique(&mut seeds.genres, &taste.top_genres, rng);

        match self.search_popular_seed(activity, &seeds, rng).await? {
            SeedSearch::Found(pair) => {
                seeds.artists.push(pair.artist);
                seeds.genres.push(pair.genre);
                Ok(seeds)
            }
            SeedSearch::Exhausted { attempts } => Err(Error::ExhaustedSeedSearch { attempts }),
        }
    }

    /// Samples popular playlists for the activity until one yields an artist
    /// and a genre that are not yet in `selected`.
    ///
    /// A sampled playlist that cannot be analyzed consumes an attempt.
    pub async fn search_popular_seed<R: Rng + ?Sized>(
        &self,
        activity: ActivityCategory,
        selected: &SeedSet,
        rng: &mut R,
    ) -> Res<SeedSearch> {
        for attempt in 1..=self.max_attempts {
            let candidates = self
                .catalog
                .search_playlists(activity.search_term(), POPULAR_SEARCH_LIMIT)
                .await?;
            let Some(playlist) = candidates.choose(rng) else {
                return Err(Error::data(format!(
                    "No playlists found for '{}'",
                    activity.search_term()
                )));
            };

            let pair = match analyze_playlist(self.catalog, &playlist.id).await {
                Ok(pair) => pair,
                Err(Error::Data(reason)) => {
                    warning!(
                        "Skipping popular playlist {} ({}/{}): {}",
                        playlist.id,
                        attempt,
                        self.max_attempts,
                        reason
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !selected.artists.contains(&pair.artist) && !selected.genres.contains(&pair.genre) {
                return Ok(SeedSearch::Found(pair));
            }
        }

        Ok(SeedSearch::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

/// The user's playlists whose name contains any keyword of the activity.
pub fn matching_playlists<'p>(
    activities: &ActivityCatalog,
    activity: ActivityCategory,
    playlists: &'p [PlaylistSummary],
) -> Res<Vec<&'p PlaylistSummary>> {
    let mut matching = Vec::new();
    for playlist in playlists {
        if activities.matches(activity, &playlist.name)? {
            matching.push(playlist);
        }
    }
    Ok(matching)
}

/// Finds the most frequent primary artist of a playlist and the most frequent
/// genre among its distinct artists.
///
/// Items without a track or without a primary artist id are ignored. Ties go
/// to whichever artist or genre was encountered first.
///
/// # Errors
///
/// Returns [`Error::Data`] if the playlist has no tracks or no dominant artist
/// or genre can be determined.
pub async fn analyze_playlist<C: MusicCatalog + ?Sized>(
    catalog: &C,
    playlist_id: &str,
) -> Res<SeedPair> {
    let items = catalog.playlist_tracks(playlist_id).await?;
    if items.is_empty() {
        return Err(Error::data(format!("Playlist {} has no tracks", playlist_id)));
    }

    let artist_ids: Vec<String> = items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .filter_map(|track| track.primary_artist_id())
        .map(str::to_string)
        .collect();

    let Some((artist, _)) = utils::most_common(artist_ids.iter().cloned(), 1)
        .into_iter()
        .next()
    else {
        return Err(Error::data(format!(
            "Failed to determine top artist of playlist {}",
            playlist_id
        )));
    };

    let mut distinct = artist_ids;
    utils::dedup_preserving_order(&mut distinct);

    let lookups = distinct
        .chunks(ARTIST_BATCH)
        .map(|chunk| catalog.several_artists(chunk));
    let artists = try_join_all(lookups).await?;

    let genres = artists
        .into_iter()
        .flatten()
        .flat_map(|artist| artist.genres.into_iter());

    let Some((genre, _)) = utils::most_common(genres, 1).into_iter().next() else {
        return Err(Error::data(format!(
            "Failed to determine top genre of playlist {}",
            playlist_id
        )));
    };

    Ok(SeedPair { artist, genre })
}

/// Appends a random entry of `source` that is not yet in `target`.
/// Returns false when every candidate is already taken.
fn push_unique<R: Rng + ?Sized>(target: &mut Vec<String>, source: &[String], rng: &mut R) -> bool {
    let candidates: Vec<&String> = source.iter().filter(|s| !target.contains(s)).collect();
    match candidates.choose(rng) {
        Some(choice) => {
            target.push(choice.to_string());
            true
        }
        None => false,
    }
}

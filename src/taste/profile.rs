use serde::{Deserialize, Serialize};

use crate::{
    Error, Res,
    taste::activity::Feature,
    types::{Artist, AudioFeatures, UserProfile},
    utils,
};

/// Number of genres kept in a taste profile.
pub const TOP_GENRES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatureAverages {
    pub acousticness: f64,
    pub energy: f64,
    pub valence: f64,
    pub danceability: f64,
    pub tempo: f64,
}

impl AudioFeatureAverages {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Acousticness => self.acousticness,
            Feature::Energy => self.energy,
            Feature::Valence => self.valence,
            Feature::Danceability => self.danceability,
            Feature::Tempo => self.tempo,
        }
    }
}

/// Per-user summary of listening history, built once per login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasteProfile {
    pub user_id: String,
    /// Rank order, unique.
    pub top_artist_ids: Vec<String>,
    /// Most frequent first, at most [`TOP_GENRES`].
    pub top_genres: Vec<String>,
    pub avg_audio_features: AudioFeatureAverages,
}

/// Raw music API records the aggregator consumes. Each field can be fetched
/// independently (and concurrently) by the caller.
#[derive(Debug, Clone)]
pub struct RawProfileData {
    pub user: UserProfile,
    pub top_artists: Vec<Artist>,
    /// One entry per requested track; `None` where the API had no analysis.
    pub audio_features: Vec<Option<AudioFeatures>>,
}

pub fn aggregate_profile(raw: &RawProfileData) -> Res<TasteProfile> {
    let top_genres = top_genres(&raw.top_artists, TOP_GENRES)?;
    let avg_audio_features = average_audio_features(&raw.audio_features)?;

    let mut top_artist_ids: Vec<String> = raw.top_artists.iter().map(|a| a.id.clone()).collect();
    utils::dedup_preserving_order(&mut top_artist_ids);

    Ok(TasteProfile {
        user_id: raw.user.id.clone(),
        top_artist_ids,
        top_genres,
        avg_audio_features,
    })
}

/// Arithmetic mean of each feature, rounded to two decimals.
///
/// A `None` entry fails the whole computation instead of being skipped.
pub fn average_audio_features(features: &[Option<AudioFeatures>]) -> Res<AudioFeatureAverages> {
    if features.is_empty() {
        return Err(Error::data("No audio features available for top tracks"));
    }

    let mut sum = AudioFeatureAverages {
        acousticness: 0.0,
        energy: 0.0,
        valence: 0.0,
        danceability: 0.0,
        tempo: 0.0,
    };

    for (i, entry) in features.iter().enumerate() {
        let Some(f) = entry else {
            return Err(Error::data(format!(
                "Audio features missing for track at position {}",
                i
            )));
        };
        validate(f)?;

        sum.acousticness += f.acousticness;
        sum.energy += f.energy;
        sum.valence += f.valence;
        sum.danceability += f.danceability;
        sum.tempo += f.tempo;
    }

    let n = features.len() as f64;
    Ok(AudioFeatureAverages {
        acousticness: utils::round2(sum.acousticness / n),
        energy: utils::round2(sum.energy / n),
        valence: utils::round2(sum.valence / n),
        danceability: utils::round2(sum.danceability / n),
        tempo: utils::round2(sum.tempo / n),
    })
}

fn validate(f: &AudioFeatures) -> Res<()> {
    let normalized = [
        ("acousticness", f.acousticness),
        ("energy", f.energy),
        ("valence", f.valence),
        ("danceability", f.danceability),
    ];

    for (name, value) in normalized {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::data(format!(
                "Audio feature {} out of range [0, 1]: {}",
                name, value
            )));
        }
    }

    if !f.tempo.is_finite() || f.tempo < 0.0 {
        return Err(Error::data(format!("Invalid tempo: {}", f.tempo)));
    }

    Ok(())
}

/// Most frequent genres across the given artists, ties resolved by first
/// appearance in artist order.
pub fn top_genres(artists: &[Artist], n: usize) -> Res<Vec<String>> {
    if artists.is_empty() {
        return Err(Error::data("Failed to pull top genres from listener history"));
    }

    let genres = artists.iter().flat_map(|a| a.genres.iter().cloned());
    Ok(utils::most_common(genres, n)
        .into_iter()
        .map(|(genre, _)| genre)
        .collect())
}

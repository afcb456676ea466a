use std::{collections::HashMap, fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Res};

/// A listening context the user picks a playlist for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Workout,
    Relaxation,
    RoadTrip,
    Party,
    Focus,
    Cooking,
    Cleaning,
    DateNight,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 8] = [
        ActivityCategory::Workout,
        ActivityCategory::Relaxation,
        ActivityCategory::RoadTrip,
        ActivityCategory::Party,
        ActivityCategory::Focus,
        ActivityCategory::Cooking,
        ActivityCategory::Cleaning,
        ActivityCategory::DateNight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityCategory::Workout => "workout",
            ActivityCategory::Relaxation => "relaxation",
            ActivityCategory::RoadTrip => "road_trip",
            ActivityCategory::Party => "party",
            ActivityCategory::Focus => "focus",
            ActivityCategory::Cooking => "cooking",
            ActivityCategory::Cleaning => "cleaning",
            ActivityCategory::DateNight => "date_night",
        }
    }

    /// Free-text query used when searching public playlists.
    pub fn search_term(&self) -> &'static str {
        match self {
            ActivityCategory::RoadTrip => "road trip",
            ActivityCategory::DateNight => "date night",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        ActivityCategory::ALL
            .into_iter()
            .find(|a| a.as_str().replace('_', "") == normalized)
            .ok_or_else(|| Error::config(format!("Unknown activity '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Min,
    Max,
    Target,
}

impl Bound {
    pub fn prefix(&self) -> &'static str {
        match self {
            Bound::Min => "min",
            Bound::Max => "max",
            Bound::Target => "target",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Acousticness,
    Energy,
    Valence,
    Danceability,
    Tempo,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Acousticness => "acousticness",
            Feature::Energy => "energy",
            Feature::Valence => "valence",
            Feature::Danceability => "danceability",
            Feature::Tempo => "tempo",
        }
    }
}

/// One entry of an activity formula, e.g. `min_energy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRule {
    pub bound: Bound,
    pub feature: Feature,
}

impl FeatureRule {
    pub const fn new(bound: Bound, feature: Feature) -> Self {
        Self { bound, feature }
    }

    pub fn param_name(&self) -> String {
        format!("{}_{}", self.bound.prefix(), self.feature.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityProfile {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub formula: Option<Vec<FeatureRule>>,
}

/// Immutable lookup tables: activity to playlist-name keywords and activity
/// to audio-feature formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityCatalog {
    activities: HashMap<ActivityCategory, ActivityProfile>,
}

impl ActivityCatalog {
    pub fn new(activities: HashMap<ActivityCategory, ActivityProfile>) -> Self {
        let activities = activities
            .into_iter()
            .map(|(activity, mut profile)| {
                profile.keywords = profile
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (activity, profile)
            })
            .collect();
        Self { activities }
    }

    /// The built-in tables.
    pub fn standard() -> Self {
        use Bound::*;
        use Feature::*;

        let entries: [(ActivityCategory, &[&str], &[FeatureRule]); 8] = [
            (
                ActivityCategory::Workout,
                &[
                    "workout", "exercise", "gym", "fitness", "cardio", "run", "strength", "sweat",
                    "lift",
                ],
                &[
                    FeatureRule::new(Min, Energy),
                    FeatureRule::new(Min, Tempo),
                    FeatureRule::new(Min, Danceability),
                    FeatureRule::new(Min, Valence),
                ],
            ),
            (
                ActivityCategory::Relaxation,
                &[
                    "relaxation", "chill", "calm", "soothing", "unwind", "peaceful", "meditation",
                    "mindfulness",
                ],
                &[
                    FeatureRule::new(Min, Acousticness),
                    FeatureRule::new(Min, Valence),
                    FeatureRule::new(Max, Energy),
                    FeatureRule::new(Max, Tempo),
                ],
            ),
            (
                ActivityCategory::RoadTrip,
                &[
                    "road trip", "travel", "journey", "adventure", "driving", "cruising", "highway",
                ],
                &[
                    FeatureRule::new(Target, Energy),
                    FeatureRule::new(Target, Danceability),
                    FeatureRule::new(Target, Tempo),
                ],
            ),
            (
                ActivityCategory::Party,
                &[
                    "party", "celebration", "dance", "upbeat", "club", "fun", "pregame", "bangers",
                ],
                &[
                    FeatureRule::new(Min, Energy),
                    FeatureRule::new(Min, Danceability),
                    FeatureRule::new(Min, Valence),
                ],
            ),
            (
                ActivityCategory::Focus,
                &[
                    "focus", "study", "concentration", "productivity", "background music",
                    "ambient", "reading",
                ],
                &[
                    FeatureRule::new(Min, Acousticness),
                    FeatureRule::new(Max, Energy),
                ],
            ),
            (
                ActivityCategory::Cooking,
                &["cooking", "kitchen", "culinary"],
                &[
                    FeatureRule::new(Target, Energy),
                    FeatureRule::new(Target, Tempo),
                    FeatureRule::new(Target, Valence),
                ],
            ),
            (
                ActivityCategory::Cleaning,
                &[
                    "cleaning", "tidy", "chores", "organization", "declutter", "productive",
                    "motivational",
                ],
                &[
                    FeatureRule::new(Min, Energy),
                    FeatureRule::new(Min, Tempo),
                    FeatureRule::new(Min, Danceability),
                ],
            ),
            (
                ActivityCategory::DateNight,
                &["romantic", "love", "dinner", "candlelight"],
                &[
                    FeatureRule::new(Min, Acousticness),
                    FeatureRule::new(Min, Valence),
                    FeatureRule::new(Max, Tempo),
                    FeatureRule::new(Max, Energy),
                ],
            ),
        ];

        let activities = entries
            .into_iter()
            .map(|(activity, keywords, formula)| {
                (
                    activity,
                    ActivityProfile {
                        keywords: keywords.iter().map(|k| k.to_string()).collect(),
                        formula: Some(formula.to_vec()),
                    },
                )
            })
            .collect();

        Self::new(activities)
    }

    /// Loads the tables from a JSON file keyed by activity tag.
    pub async fn load(path: &Path) -> Res<Self> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| Error::config(format!("Cannot read {}: {}", path.display(), e)))?;
        let activities: HashMap<ActivityCategory, ActivityProfile> =
            serde_json::from_str(&content).map_err(|e| {
                Error::config(format!("Invalid activity catalog {}: {}", path.display(), e))
            })?;
        Ok(Self::new(activities))
    }

    pub fn profile(&self, activity: ActivityCategory) -> Res<&ActivityProfile> {
        self.activities
            .get(&activity)
            .ok_or_else(|| Error::config(format!("Activity '{}' is not registered", activity)))
    }

    pub fn keywords(&self, activity: ActivityCategory) -> Res<&[String]> {
        Ok(&self.profile(activity)?.keywords)
    }

    pub fn formula(&self, activity: ActivityCategory) -> Res<&[FeatureRule]> {
        self.profile(activity)?
            .formula
            .as_deref()
            .ok_or_else(|| {
                Error::config(format!("No feature formula registered for '{}'", activity))
            })
    }

    /// Case-insensitive substring match of a playlist name against the
    /// activity's keywords.
    pub fn matches(&self, activity: ActivityCategory, playlist_name: &str) -> Res<bool> {
        let name = playlist_name.to_lowercase();
        Ok(self
            .keywords(activity)?
            .iter()
            .any(|keyword| name.contains(keyword.as_str())))
    }
}

impl Default for ActivityCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

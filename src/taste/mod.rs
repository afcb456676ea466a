//! # Taste Engine
//!
//! The decision logic of the service, split into the three stages that run
//! for every user:
//!
//! - [`profile`] - merges top artists and audio features into a [`TasteProfile`]
//!   (once per login)
//! - [`seeds`] - picks artist and genre seeds for an activity (per request)
//! - [`query`] - turns seeds and the activity formula into a recommendation
//!   query (per request)
//!
//! [`activity`] holds the immutable activity tables and [`playlist`] the
//! validation of client playlist drafts.

pub mod activity;
pub mod playlist;
pub mod profile;
pub mod query;
pub mod seeds;

pub use activity::{ActivityCatalog, ActivityCategory};
pub use playlist::{PlaylistDraft, PlaylistRequest, TrackSummary, draft_to_playlist_request};
pub use profile::{RawProfileData, TasteProfile, aggregate_profile};
pub use query::{RecommendationQuery, build_recommendation_query};
pub use seeds::{SeedSelector, SeedSet};

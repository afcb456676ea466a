//! # API Module
//!
//! HTTP endpoints of the service, built on [Axum](https://docs.rs/axum).
//! Handlers are thin: they resolve the caller's session, call the music API
//! through [`crate::spotify`] and hand the data to [`crate::taste`].
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - redirects to Spotify with a fresh `state` and PKCE challenge
//! - [`callback`] - exchanges the authorization code and opens a session
//! - [`logout`] - drops the session and clears its cookie
//!
//! ### Playlist flow
//!
//! - [`profile`] - aggregates and caches the caller's taste profile
//! - [`recommendations`] - selects seeds for an activity and fetches tracks
//! - [`build`] - turns a client draft into a playlist on the user's account
//!
//! ### Monitoring
//!
//! - [`health`] - status and version
//! - [`ping`] - liveness probe
//!
//! ## Errors
//!
//! Every handler returns [`crate::Res`]. Failures are rendered as JSON with
//! the error kind, a message and whether retrying can help; see
//! [`error::status_for`] for the status codes. Request bodies are read with
//! [`json::JsonBody`], so malformed JSON is reported the same way.

mod auth;
mod build;
pub mod error;
mod health;
pub mod json;
pub mod profile;
mod recommendations;
pub mod session;

pub use auth::{callback, login, logout};
pub use build::build;
pub use health::{health, ping};
pub use profile::profile;
pub use recommendations::recommendations;

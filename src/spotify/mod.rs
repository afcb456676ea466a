//! # Spotify Integration Module
//!
//! This module is the integration layer between the service and the Spotify
//! Web API. Everything in here is a thin I/O wrapper: it builds requests,
//! attaches the session's bearer token, retries transient failures and
//! decodes the JSON payloads into the types of [`crate::types`]. No decision
//! logic lives here.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! Taste engine (profile, seeds, query)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + PKCE)
//!     ├── Profile data (me, top artists, top tracks, audio features)
//!     ├── Artist lookups (batched)
//!     ├── Playlist operations (list, tracks, search, create, add)
//!     └── Recommendations
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! - **Timeouts**: every request carries the configured timeout; a timed out
//!   call surfaces as a retryable [`Error::Upstream`]
//! - **502 Bad Gateway**: retried a bounded number of times with a short delay
//! - **429 Too Many Requests**: honours `Retry-After` up to two minutes
//! - **Other statuses**: returned as [`Error::Upstream`] with the status code
//!
//! ## Seams
//!
//! The seed selector only needs three read operations. They are expressed by
//! the [`MusicCatalog`] trait so tests can substitute an in-memory catalog.

pub mod artists;
pub mod auth;
pub mod playlist;
pub mod profile;
pub mod recommendations;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    Error, Res,
    types::{Artist, PlaylistItem, PlaylistSummary},
    warning,
};

const MAX_ATTEMPTS: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(2);
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Read operations the seed selector performs against the music API.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Items of a playlist (first page).
    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<PlaylistItem>>;

    /// Full artist records for up to 20 ids, in request order.
    async fn several_artists(&self, ids: &[String]) -> Res<Vec<Artist>>;

    /// Public playlists matching a free-text query.
    async fn search_playlists(&self, query: &str, limit: u32) -> Res<Vec<PlaylistSummary>>;
}

/// Spotify client bound to one session's access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

/// Builds the shared HTTP client used by every session.
pub fn http_client(timeout: Duration) -> Res<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::config(format!("Cannot build HTTP client: {}", e)))
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: &str, access_token: String) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path))
    }

    /// GET on an absolute URL, as returned in `next` paging links.
    pub(crate) fn get_absolute(&self, url: &str) -> RequestBuilder {
        self.http.get(url)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    /// Sends the request with the bearer token and decodes the JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Res<T> {
        let request = builder.bearer_auth(&self.access_token).build()?;
        let mut attempt = 0;

        loop {
            attempt += 1;
            let Some(current) = request.try_clone() else {
                return Err(Error::config("Request body cannot be retried"));
            };
            let response = self.http.execute(current).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.json::<T>().await?);
            }

            if status == StatusCode::BAD_GATEWAY && attempt < MAX_ATTEMPTS {
                warning!(
                    "Music API returned 502 for {}, retrying ({}/{})",
                    request.url().path(),
                    attempt,
                    MAX_ATTEMPTS
                );
                sleep(BAD_GATEWAY_DELAY).await;
                continue;
            }

            if status == StatusCode::TOO_MANY_REQUESTS && attempt < MAX_ATTEMPTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);
                if retry_after <= MAX_RETRY_AFTER_SECS {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue;
                }
                warning!(
                    "Retry after has reached an abnormal high of {} seconds.",
                    retry_after
                );
            }

            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream_status(
                status.as_u16(),
                format!(
                    "Music API returned {} for {}: {}",
                    status,
                    request.url().path(),
                    body
                ),
            ));
        }
    }
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    async fn playlist_tracks(&self, playlist_id: &str) -> Res<Vec<PlaylistItem>> {
        self.get_playlist_tracks(playlist_id).await
    }

    async fn several_artists(&self, ids: &[String]) -> Res<Vec<Artist>> {
        self.get_several_artists(ids).await
    }

    async fn search_playlists(&self, query: &str, limit: u32) -> Res<Vec<PlaylistSummary>> {
        self.search_public_playlists(query, limit).await
    }
}

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use tokio::sync::Mutex;

use crate::{
    Error, Res,
    api::profile::fetch_raw_profile,
    management::{SESSION_COOKIE, Session},
    server::AppState,
    spotify::SpotifyClient,
    taste::{TasteProfile, aggregate_profile},
};

/// The authenticated session of the caller, resolved from the session cookie.
pub struct CurrentSession {
    pub id: String,
    session: Arc<Mutex<Session>>,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Res<Self> {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| Error::unauthorized("Not logged in"))?;
        let session = state
            .sessions
            .get(&id)
            .await
            .ok_or_else(|| Error::unauthorized("Unknown session, please log in again"))?;

        Ok(Self { id, session })
    }
}

impl CurrentSession {
    /// A music API client bound to this session's access token.
    ///
    /// An expired session is removed from the store.
    pub async fn client(&self, state: &AppState) -> Res<SpotifyClient> {
        let token = {
            let session = self.session.lock().await;
            session.tokens.valid_token().map(str::to_string)
        };
        let token = match token {
            Ok(token) => token,
            Err(e) => {
                state.sessions.remove(&self.id).await;
                return Err(e);
            }
        };

        Ok(SpotifyClient::new(
            state.http.clone(),
            state.config.api_base(),
            token,
        ))
    }

    pub async fn cached_taste(&self) -> Option<TasteProfile> {
        self.session.lock().await.taste.clone()
    }

    pub async fn store_taste(&self, taste: TasteProfile) {
        self.session.lock().await.taste = Some(taste);
    }

    /// The cached taste profile, aggregated on demand when the client never
    /// called `/profile` in this session.
    pub async fn taste(&self, client: &SpotifyClient) -> Res<TasteProfile> {
        if let Some(taste) = self.cached_taste().await {
            return Ok(taste);
        }

        let fetched = fetch_raw_profile(client).await?;
        let taste = aggregate_profile(&fetched.raw)?;
        self.store_taste(taste.clone()).await;
        Ok(taste)
    }
}

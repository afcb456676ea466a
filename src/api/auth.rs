use axum::{
    extract::{Query, State},
    response::{Json, Redirect},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    Error, Res, info,
    management::{SESSION_COOKIE, Session},
    server::AppState,
    spotify, success, utils,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Redirects the browser to the Spotify authorization page.
pub async fn login(State(state): State<AppState>) -> Res<Redirect> {
    let pending = state.sessions.begin_login().await;
    let challenge = utils::generate_code_challenge(&pending.code_verifier);
    let url = spotify::auth::authorize_url(&state.config, &pending.state, &challenge)?;

    info!("Redirecting to Spotify login");
    Ok(Redirect::to(&url))
}

/// Completes the authorization-code flow and opens a session.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Res<(CookieJar, Redirect)> {
    if let Some(error) = params.error {
        return Err(Error::unauthorized(format!(
            "Spotify returned an error: {}",
            error
        )));
    }

    let code = params
        .code
        .ok_or_else(|| Error::unauthorized("Authorization code not found in the request."))?;
    let login_state = params
        .state
        .ok_or_else(|| Error::unauthorized("Login state not found in the request."))?;
    let pending = state
        .sessions
        .take_pending(&login_state)
        .await
        .ok_or_else(|| Error::unauthorized("Unknown or expired login state"))?;

    let token =
        spotify::auth::exchange_code(&state.http, &state.config, &code, &pending.code_verifier)
            .await?;
    let id = state.sessions.insert(Session::new(token)).await;

    let cookie = Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .secure(state.config.secure_cookies)
        .same_site(SameSite::Lax);

    success!("Authentication successful!");
    Ok((jar.add(cookie), Redirect::to(&state.config.frontend_url)))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }

    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Json(json!({ "message": "Logged out successfully" })),
    )
}

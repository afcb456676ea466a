use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    Error, Res,
    config::Config,
    types::{Token, TokenResponse},
};

/// Builds the Spotify authorization URL for the authorization-code flow.
///
/// The `state` value ties the callback to the pending login that started it,
/// and the S256 `code_challenge` binds the later code exchange to the
/// verifier kept on the server.
///
/// # Errors
///
/// Returns [`Error::Config`] if the configured authorization URL is invalid.
pub fn authorize_url(config: &Config, state: &str, code_challenge: &str) -> Res<String> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("state", state),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| Error::config(format!("Invalid SPOTIFY_API_AUTH_URL: {}", e)))?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for an access token.
///
/// Sends the confidential client credentials together with the PKCE code
/// verifier that was generated when the login started.
///
/// # Errors
///
/// - [`Error::Upstream`] on transport failures or a non-success status
/// - [`Error::Data`] if the token response cannot be decoded
pub async fn exchange_code(
    http: &Client,
    config: &Config,
    code: &str,
    verifier: &str,
) -> Res<Token> {
    let res = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(Error::upstream_status(
            status.as_u16(),
            format!("Failed to fetch token ({}): {}", status, body),
        ));
    }

    let json: TokenResponse = res.json().await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token,
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

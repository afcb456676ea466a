use chrono::Utc;

use crate::{Error, Res, types::Token};

/// Seconds before expiry at which a token is treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Clone)]
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// The access token, or [`Error::Unauthorized`] once it is about to
    /// expire. There is no refresh; the user logs in again.
    pub fn valid_token(&self) -> Res<&str> {
        if self.is_expired_at(Utc::now().timestamp() as u64) {
            return Err(Error::unauthorized("Session expired, please log in again"));
        }
        Ok(&self.token.access_token)
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}

use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::{
    management::TokenManager,
    taste::TasteProfile,
    types::{PendingLogin, Token},
    utils,
};

pub const SESSION_COOKIE: &str = "moodlist_session";

/// Pending logins older than this are discarded.
const PENDING_LOGIN_TTL_SECS: i64 = 600;

/// State owned by one authenticated user.
#[derive(Debug)]
pub struct Session {
    pub tokens: TokenManager,
    /// Cached after the first profile aggregation.
    pub taste: Option<TasteProfile>,
}

impl Session {
    pub fn new(token: Token) -> Self {
        Self {
            tokens: TokenManager::new(token),
            taste: None,
        }
    }
}

/// Session-scoped credential store.
///
/// Each session lives behind its own mutex, so requests of different users
/// never contend on or mutate each other's state.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    pending: Arc<Mutex<HashMap<String, PendingLogin>>>,
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a login: generates the `state` value and PKCE verifier.
    pub async fn begin_login(&self) -> PendingLogin {
        let now = Utc::now().timestamp();
        let login = PendingLogin {
            state: utils::generate_state(),
            code_verifier: utils::generate_code_verifier(),
            created_at: now,
        };

        {
            let mut pending = self.pending.lock().await;
            pending.retain(|_, p| now - p.created_at < PENDING_LOGIN_TTL_SECS);
            pending.insert(login.state.clone(), login.clone());
        }
        self.prune_expired(now as u64).await;
        login
    }

    /// Removes and returns the pending login for `state`, if still valid.
    pub async fn take_pending(&self, state: &str) -> Option<PendingLogin> {
        let login = self.pending.lock().await.remove(state)?;
        if Utc::now().timestamp() - login.created_at >= PENDING_LOGIN_TTL_SECS {
            return None;
        }
        Some(login)
    }

    /// Stores a new session and returns its id. Expired sessions are dropped
    /// on the way.
    pub async fn insert(&self, session: Session) -> String {
        self.prune_expired(Utc::now().timestamp() as u64).await;

        let id = utils::generate_session_id();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        id
    }

    /// Removes every session whose token has expired at `now`.
    ///
    /// Sessions locked by an in-flight request are kept; they are evicted by
    /// that request or by a later pass.
    pub async fn prune_expired(&self, now: u64) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.try_lock() {
            Ok(session) => !session.tokens.is_expired_at(now),
            Err(_) => true,
        });
        before - sessions.len()
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

use chrono::Utc;
use moodlist::{
    ErrorKind,
    management::{Session, SessionStore, TokenManager},
    types::Token,
};

fn token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: None,
        scope: "user-top-read".to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_token_expiry_margin() {
    let manager = TokenManager::new(token(1_000, 3_600));

    assert!(!manager.is_expired_at(1_000));
    assert!(!manager.is_expired_at(4_359));
    assert!(manager.is_expired_at(4_360));
    assert!(manager.is_expired_at(10_000));
}

#[test]
fn test_valid_token() {
    let now = Utc::now().timestamp() as u64;
    let fresh = TokenManager::new(token(now, 3_600));
    assert_eq!(fresh.valid_token().unwrap(), "access");

    let stale = TokenManager::new(token(now - 7_200, 3_600));
    assert_eq!(stale.valid_token().unwrap_err().kind(), ErrorKind::Unauthorized);
}

#[tokio::test]
async fn test_pending_login_is_consumed_once() {
    let store = SessionStore::new();
    let login = store.begin_login().await;

    assert_eq!(login.code_verifier.len(), 128);
    assert!(store.take_pending("unknown").await.is_none());

    let taken = store.take_pending(&login.state).await.unwrap();
    assert_eq!(taken.code_verifier, login.code_verifier);
    assert!(store.take_pending(&login.state).await.is_none());
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let store = SessionStore::new();
    let now = Utc::now().timestamp() as u64;

    let first = store.insert(Session::new(token(now, 3_600))).await;
    let second = store.insert(Session::new(token(now, 3_600))).await;
    assert_ne!(first, second);
    assert_eq!(store.len().await, 2);

    {
        let session = store.get(&first).await.unwrap();
        session.lock().await.tokens = TokenManager::new(Token {
            access_token: "other".to_string(),
            ..token(now, 3_600)
        });
    }

    let untouched = store.get(&second).await.unwrap();
    assert_eq!(untouched.lock().await.tokens.current_token().access_token, "access");

    assert!(store.remove(&first).await);
    assert!(!store.remove(&first).await);
    assert!(store.get(&first).await.is_none());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_expired_sessions_are_evicted() {
    let store = SessionStore::new();
    let now = Utc::now().timestamp() as u64;

    for _ in 0..50 {
        store.insert(Session::new(token(0, 3_600))).await;
    }
    store.begin_login().await;
    assert!(store.is_empty().await);

    let fresh = store.insert(Session::new(token(now, 3_600))).await;
    assert_eq!(store.len().await, 1);
    assert!(store.get(&fresh).await.is_some());
}

#[tokio::test]
async fn test_prune_expired_keeps_live_sessions() {
    let store = SessionStore::new();
    let now = Utc::now().timestamp() as u64;

    let live = store.insert(Session::new(token(now, 3_600))).await;
    let stale = store.insert(Session::new(token(now, 3_600))).await;
    store.get(&stale).await.unwrap().lock().await.tokens = TokenManager::new(token(0, 3_600));

    assert_eq!(store.prune_expired(now).await, 1);
    assert!(store.get(&live).await.is_some());
    assert!(store.get(&stale).await.is_none());

    // a token that lapses later is evicted by a later pass
    assert_eq!(store.prune_expired(now + 7_200).await, 1);
    assert!(store.is_empty().await);
}

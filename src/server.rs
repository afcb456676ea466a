use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use reqwest::Client;

use crate::{
    Error, Res, api,
    config::Config,
    info,
    management::SessionStore,
    spotify,
    taste::ActivityCatalog,
};

/// Shared, read-only state of the server plus the session store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub sessions: SessionStore,
    pub activities: Arc<ActivityCatalog>,
}

impl AppState {
    pub fn new(config: Config, activities: ActivityCatalog) -> Res<Self> {
        let http = spotify::http_client(config.request_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            http,
            sessions: SessionStore::new(),
            activities: Arc::new(activities),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/ping", get(api::ping))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout).post(api::logout))
        .route("/profile", get(api::profile))
        .route("/recommendations", post(api::recommendations))
        .route("/build", post(api::build))
        .with_state(state)
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_address).map_err(|e| {
        Error::config(format!(
            "Failed to parse server address {}: {}",
            state.config.server_address, e
        ))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::config(format!("Cannot bind {}: {}", addr, e)))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state))
        .await
        .map_err(|e| Error::config(format!("Server stopped: {}", e)))
}

use crate::{
    cli::load_catalog, config::Config, error, server, server::AppState, warning,
};

pub async fn serve(config: Config, open_browser: bool) {
    let catalog = match load_catalog(config.activity_catalog_path.as_deref()).await {
        Ok(catalog) => catalog,
        Err(e) => error!("Cannot load activity catalog. Err: {}", e),
    };

    let login_url = format!("http://{}/login", config.server_address);
    let state = match AppState::new(config, catalog) {
        Ok(state) => state,
        Err(e) => error!("Cannot initialize server. Err: {}", e),
    };

    if open_browser {
        let url = login_url.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            if webbrowser::open(&url).is_err() {
                warning!(
                    "Failed to open browser. Please navigate to the following URL manually:\n{}",
                    url
                )
            }
        });
    }

    if let Err(e) = server::start_api_server(state).await {
        error!("{}", e);
    }
}

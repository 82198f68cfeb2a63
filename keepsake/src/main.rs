use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keepsake::api::{ApiServer, ApiServerConfig, AppState};
use keepsake::widgets::WidgetHub;
use spotify_playlist::{PlaylistSource, SpotifyClient, SpotifyCredentials};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keepsake=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = ApiServerConfig::from_env_or_default();

    // Page widgets: next birthday occurrences are derived once, here.
    let hub = Arc::new(WidgetHub::from_page_anchors(Utc::now()));
    hub.start();

    // No explicit timeout: the fetch relies on transport defaults.
    let playlist: Option<Arc<dyn PlaylistSource>> = match SpotifyCredentials::from_env() {
        Ok(credentials) => Some(Arc::new(SpotifyClient::new(
            credentials,
            reqwest::Client::new(),
        ))),
        Err(error) => {
            tracing::warn!(%error, "playlist endpoint will answer with a configuration error");
            None
        }
    };

    let state = AppState::new(playlist, hub.clone());
    let server = ApiServer::with_state(config, state);
    let cancel_token = server.cancel_token();

    let mut server_task = tokio::spawn(async move { server.run().await });

    tokio::select! {
        result = &mut server_task => result??,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            cancel_token.cancel();
            server_task.await??;
        }
    }

    hub.shutdown().await;

    Ok(())
}

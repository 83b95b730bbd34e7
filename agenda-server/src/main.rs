use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agenda_server::config::ServerConfig;
use agenda_server::state::AppState;
use agenda_server::store::EventStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let state = AppState::new(EventStore::new(config.events_path.clone()));

    let app = agenda_server::app(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(
        events_path = %config.events_path.display(),
        "agenda-server listening on http://{addr}"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

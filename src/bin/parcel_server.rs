//! Oahu parcel viewer server.
//!
//! Serves the viewer page and the parcel API in front of the hosted
//! feature service.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oahu_parcels::config::{self, MapConfig, ServiceConfig};
use oahu_parcels::feature::FeatureServiceClient;
use oahu_parcels::server::{self, AppState};
use oahu_parcels::view::CommandSurface;
use oahu_parcels::viewer::ParcelViewer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oahu_parcels=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let service_config = ServiceConfig::from_env().context("loading service configuration")?;
    tracing::info!(url = %service_config.service_url, "using feature service");

    let client =
        FeatureServiceClient::new(&service_config).context("building feature service client")?;
    let surface = CommandSurface::new();
    let viewer = ParcelViewer::new(client, surface.clone());
    let state = AppState::new(
        viewer,
        surface,
        MapConfig::for_service(service_config.service_url.as_str()),
    );

    let app = server::create_router(state);

    let port = config::server_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!("Oahu parcel viewer running on http://{}", addr);
    tracing::info!("  /                      - viewer page");
    tracing::info!("  /api/config            - map + layer setup");
    tracing::info!("  /api/parcel/at-point   - click lookup");
    tracing::info!("  /api/parcel/:id        - select by object id");
    tracing::info!("  /api/parcels/search    - owner/TMK/address search");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Port {} is already in use. Try: lsof -ti:{} | xargs kill -9",
                    port,
                    port
                );
            }
            return Err(e).context(format!("binding {addr}"));
        }
    };

    axum::serve(listener, app)
        .await
        .context("serving viewer")?;

    Ok(())
}

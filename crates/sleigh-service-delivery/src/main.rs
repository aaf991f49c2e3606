//! Sleigh delivery registry and routing HTTP service.
//!
//! Tracks children by behavior classification and named delivery locations,
//! and serves ranked delivery plans plus the total great-circle distance
//! along the ranked order.
//!
//! # Endpoints
//!
//! - `POST /ubicacion` - Create a delivery location
//! - `POST /ninos` - Register a child at a location
//! - `GET /ninos/buenos` - List good children
//! - `GET /ninos/malos` - List bad children
//! - `GET /entregas` - Locations ranked by good-count, highest first
//! - `GET /ruta` - Total route distance along the ranked order
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `SLEIGH_DATA_PATH` - Path to the registry database file (required)
//! - `SERVICE_PORT` - HTTP port (default: 6768)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use sleigh_service_delivery::build_router;
use sleigh_service_shared::{
    init_logging, init_metrics, AppState, AppStateError, LoggingConfig, MetricsConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("delivery");
    init_logging(&logging_config);

    // Initialize metrics
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    // Load configuration from environment. The data path has no default;
    // starting without one is a deployment error.
    let data_path = match env::var("SLEIGH_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => path,
        _ => {
            error!("SLEIGH_DATA_PATH is not set");
            return Err(Box::new(AppStateError::DataPathMissing) as Box<dyn std::error::Error>);
        }
    };
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(6768);

    info!(data_path = %data_path, port = port, "starting delivery service");

    // Open the registry store
    let state = AppState::open(&data_path).map_err(|e| {
        error!(error = %e, path = %data_path, "failed to open registry store");
        e
    })?;

    // Build the router
    let app = build_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Class booking API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p gym-api
//! ```
//!
//! Configuration is read from environment variables, with a `.env` file
//! loaded first when present.

use gym_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting gym booking API server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        redis = config.redis.is_some(),
        "Configuration loaded"
    );

    gym_api::run(config).await?;

    Ok(())
}

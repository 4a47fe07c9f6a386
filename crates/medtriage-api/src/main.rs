//! Medtriage REST server binary.
//!
//! # Environment Variables
//! - `MEDTRIAGE_ADDR`: Server address (default: "0.0.0.0:8000")
//! - `MEDTRIAGE_DATABASE`: SQLite file (default: "medtriage.db")
//! - `MEDTRIAGE_JWT_SECRET`: Token signing secret (random per process if unset)
//! - `MEDTRIAGE_TOKEN_TTL_MINUTES`: Access token lifetime (default: 60)
//! - `MEDTRIAGE_PBKDF2_ITERATIONS`: Password hashing rounds (default: 600000)
//! - `MEDTRIAGE_SEED_CATALOG`: JSON catalog loaded into an empty database

use anyhow::Context;
use medtriage_api::{router, AppState, ServerConfig};
use medtriage_core::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medtriage_api=info".parse()?)
                .add_directive("medtriage_core=info".parse()?)
                .add_directive("medtriage_server=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ServerConfig::from_env()?;
    tracing::debug!(?cfg, "configuration resolved");

    let mut db = Database::open(&cfg.database_path).with_context(|| {
        format!("failed to open database {}", cfg.database_path.display())
    })?;

    if let Some(seed) = &cfg.seed_catalog {
        let inserted = db
            .seed_catalog_from_json(seed)
            .with_context(|| format!("failed to seed catalog from {}", seed.display()))?;
        tracing::info!(inserted, path = %seed.display(), "catalog seed checked");
    }

    let app = router(AppState::from_config(db, &cfg));

    tracing::info!("-- Starting medtriage API on {}", cfg.addr);
    let listener = tokio::net::TcpListener::bind(&cfg.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! # Unitops API Server
//!
//! Role-based inventory/order/feedback backend for multiple business units.
//!
//! ## Startup sequence
//!
//! 1. Initialize tracing
//! 2. Load configuration from the environment
//! 3. Create the database pool and run migrations
//! 4. Provision the bootstrap admin account if absent
//! 5. Build the router and serve
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p unitops-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unitops_api::{app, bootstrap, config::Config};
use unitops_shared::db::{migrations, pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unitops_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Unitops API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db).await?;

    bootstrap::ensure_admin(&db, &config.admin).await?;

    let bind_address = config.bind_address();
    let state = app::AppState::new(db, config);
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}

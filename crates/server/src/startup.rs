use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use service::{
    category::{CategoryConfig, CategoryService},
    leaf_record::repo::seaorm::SeaOrmLeafRecordRepository,
    storage::ImageStore,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first, then `SERVER_HOST` / `SERVER_PORT` / `DATABASE_URL`.
fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(e) => {
            warn!(error = %e, "config file unusable; falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

/// Wire the category service and image store over an open connection.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> AppState {
    let leaf_records = Arc::new(SeaOrmLeafRecordRepository { db: db.clone() });
    let categories = CategoryService::new(
        db,
        leaf_records,
        CategoryConfig { max_subtree_depth: cfg.categories.max_subtree_depth },
    );
    let images = ImageStore::new(&cfg.uploads.dir, cfg.uploads.public_prefix.clone());
    AppState::new(categories, images)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    common::env::ensure_env(&cfg.uploads.dir, None).await?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!("database migrations applied");

    let state = build_state(db, &cfg);
    let app: Router = routes::build_router(state, build_cors(), &cfg.uploads);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting category tree server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

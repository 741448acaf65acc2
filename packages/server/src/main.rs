use std::sync::Arc;

use tracing::{Level, info};

use common::storage::filesystem::FilesystemBlobStore;
use server::config::AppConfig;
use server::state::AppState;
use server::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::seed_bootstrap_admin(&db, &config.auth).await?;

    let blob_store = FilesystemBlobStore::new(
        config.storage.root.clone(),
        config.storage.max_image_size,
    )
    .await?;

    let state = AppState {
        db,
        blob_store: Arc::new(blob_store),
        config: config.clone(),
    };

    let app = server::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("FaceRank API listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use butik_api::config::Config;
use butik_api::db;
use butik_api::routes::create_router;
use butik_api::state::AppState;
use butik_api::stores::postgres::{PgCatalog, PgEventStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "butik_api=debug,tower_http=info".into()),
        )
        .init();

    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&pool).await?;

    let state = AppState::new(
        Arc::new(PgEventStore::new(pool.clone())),
        Arc::new(PgCatalog::new(pool)),
    );
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

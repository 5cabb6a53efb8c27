/*
 * Responsibility
 * - Config読み込み → 依存生成 (PgPool / PostService) → Router 組み立て
 * - Middleware の適用 (CORS / trace / timeout)
 * - axum::serve() で起動
 */
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::{
    api, config::Config, middleware, repos::post_repo::PgPostRepo,
    services::post_service::PostService, state::AppState,
};

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogfeed_api=info,tower_http=info".into()),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;

    // migrations はコンパイル時に埋め込まれる (./migrations)
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store = Arc::new(PgPostRepo::new(pool));
    let state = AppState::new(PostService::new(store));

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::http::apply(router);
    middleware::cors::apply(router, config)
}

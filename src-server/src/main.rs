//! Course Studio Server Entry Point

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};

use course_studio_server::api::router;
use course_studio_server::config::Cli;
use course_studio_server::repository::init_db;
use course_studio_server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .init();

    let conn = init_db(&cli.db_path).await?;
    let mut app = router(AppState::new(conn));

    if !cli.cors_allow_origins.is_empty() {
        let origins = cli
            .cors_allow_origins
            .iter()
            .map(|origin| HeaderValue::from_str(origin).with_context(|| format!("invalid origin {origin}")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    tracing::info!("Listening on {}", cli.bind);
    axum::serve(listener, app).await?;
    Ok(())
}

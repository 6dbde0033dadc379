//src/main.rs

use axum::{middleware as axum_middleware, routing::get, Router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Config};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    let app = build_router(app_state);

    let listener = TcpListener::bind(&config.server_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

// Registro estático das rotas do módulo de relatórios
pub fn build_router(app_state: AppState) -> Router {
    let admin_prefix = format!("/{}/admin", app_state.admin_slug);

    // Rotas do painel (protegidas pelo middleware)
    let admin_routes = Router::new()
        .route("/reports", get(handlers::reports::index))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    tracing::info!("📍 Prefixo do painel: {}", admin_prefix);
    tracing::info!("📍 Rota registrada: GET {}/reports (reports_manager_list)", admin_prefix);

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest(&admin_prefix, admin_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{
        admin_repo::{resolve_admin_slug, valid_slug}, AdminRepository, PgReportRepository,
    },
    services::{auth::AuthService, report_service::ReportService},
};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Configuração lida do ambiente (.env é carregado antes)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub admin_slug: Option<String>,
    pub server_addr: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let admin_slug = env::var("ADMIN_SLUG").ok();
        let server_addr =
            env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{raw}'"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            admin_slug,
            server_addr,
            max_connections,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub admin_slug: String,
    pub auth_service: AuthService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let stored_slug = match config.admin_slug.as_deref() {
            Some(slug) if valid_slug(slug).is_some() => None,
            _ => AdminRepository::new(db_pool.clone()).first_admin_slug().await?,
        };
        let admin_slug = resolve_admin_slug(config.admin_slug.as_deref(), stored_slug);

        // --- Monta o gráfico de dependências ---
        let report_repo = PgReportRepository::new(db_pool);
        let report_service = ReportService::new(Arc::new(report_repo));
        let auth_service = AuthService::new(config.jwt_secret.clone());

        Ok(Self {
            admin_slug,
            auth_service,
            report_service,
        })
    }
}

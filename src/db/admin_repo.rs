// src/db/admin_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;

pub const DEFAULT_ADMIN_SLUG: &str = "admin";

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // `website_slug` do admin mais antigo. None se a tabela ainda não existe
    // (migrações da aplicação hospedeira não rodaram) ou se está vazia.
    pub async fn first_admin_slug(&self) -> Result<Option<String>, AppError> {
        let table_exists = sqlx::query_scalar::<_, bool>(
            "SELECT to_regclass('public.admins') IS NOT NULL",
        )
            .fetch_one(&self.pool)
            .await?;

        if !table_exists {
            return Ok(None);
        }

        let slug = sqlx::query_scalar::<_, Option<String>>(
            r#"
            SELECT website_slug
            FROM admins
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
            .fetch_optional(&self.pool)
            .await?
            .flatten();

        Ok(slug)
    }
}

/// Escolhe o prefixo do painel: variável de ambiente, depois o banco, depois "admin".
/// Valores que não formam um segmento de rota válido são ignorados.
pub fn resolve_admin_slug(configured: Option<&str>, stored: Option<String>) -> String {
    configured
        .and_then(valid_slug)
        .or_else(|| stored.as_deref().and_then(valid_slug))
        .unwrap_or_else(|| DEFAULT_ADMIN_SLUG.to_string())
}

// O slug vira um segmento literal no Router: só letras, dígitos, '-', '_' e '.'
pub fn valid_slug(raw: &str) -> Option<String> {
    let slug = raw.trim().trim_matches('/');
    if slug.is_empty() {
        return None;
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if !slug.chars().all(allowed) {
        tracing::warn!("Slug do painel ignorado (caracteres inválidos): '{}'", raw);
        return None;
    }

    Some(slug.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_slug_wins() {
        assert_eq!(resolve_admin_slug(Some("loja"), Some("outra".into())), "loja");
    }

    #[test]
    fn falls_back_to_stored_slug() {
        assert_eq!(resolve_admin_slug(None, Some("minha-loja".into())), "minha-loja");
        assert_eq!(resolve_admin_slug(Some("  "), Some("/minha-loja/".into())), "minha-loja");
    }

    #[test]
    fn defaults_to_admin_when_nothing_is_known() {
        assert_eq!(resolve_admin_slug(None, None), "admin");
        assert_eq!(resolve_admin_slug(None, Some(String::new())), "admin");
    }

    #[test]
    fn rejects_slugs_that_are_not_a_plain_route_segment() {
        assert_eq!(resolve_admin_slug(None, Some("{loja}".into())), "admin");
        assert_eq!(resolve_admin_slug(None, Some("*loja".into())), "admin");
        assert_eq!(resolve_admin_slug(None, Some("loja/filial".into())), "admin");
        assert_eq!(resolve_admin_slug(Some("lo ja"), Some("minha-loja".into())), "minha-loja");
        assert_eq!(resolve_admin_slug(Some("loja_2.0"), None), "loja_2.0");
    }
}

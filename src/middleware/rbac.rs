// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, middleware::auth::AuthenticatedAdmin};

/// Uma permissão do painel, identificada pelo slug.
pub trait PermissionDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// Guardião: rejeita a requisição se o admin não tiver a permissão `T`.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let admin = parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .ok_or(AppError::InvalidToken)?;

        let required_perm = T::slug();
        if !admin.0.can(required_perm) {
            tracing::warn!(admin_id = admin.0.id, permission = required_perm, "Acesso negado");
            return Err(AppError::MissingPermission(required_perm));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermReportsList;
impl PermissionDef for PermReportsList {
    fn slug() -> &'static str { "reports_manager_list" }
}

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::Admin};

// O middleware em si: valida o Bearer e guarda o admin nas extensions
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let admin = app_state.auth_service.validate_token(token)?;

    request.extensions_mut().insert(AuthenticatedAdmin(admin));
    Ok(next.run(request).await)
}

// Extrator para obter o admin autenticado diretamente nos handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub Admin);

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data inválida em '{field}': '{value}' (formato esperado: AAAA-MM-DD)")]
    InvalidDate { field: &'static str, value: String },

    #[error("Token de autenticação inválido ou ausente.")]
    InvalidToken,

    #[error("Você precisa da permissão '{0}' para acessar este recurso.")]
    MissingPermission(&'static str),

    // Falha de acesso aos dados durante a agregação, já convertida na borda
    #[error("Falha ao carregar relatórios: {0}")]
    ReportUnavailable(String),

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::MissingPermission(_) => StatusCode::FORBIDDEN,
            AppError::ReportUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // Erros que não passaram pela borda do relatório: loga o detalhe
            // e devolve uma mensagem genérica.
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                tracing::error!("Erro Interno do Servidor: {}", self);
                let body = Json(json!({ "error": "Ocorreu um erro inesperado." }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

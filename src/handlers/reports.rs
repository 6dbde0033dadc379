// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::AuthenticatedAdmin,
        rbac::{PermReportsList, RequirePermission},
    },
    models::report::{DateRange, ReportQuery, ReportSummary},
};

// GET /{slug}/admin/reports
#[utoipa::path(
    get,
    path = "/{slug}/admin/reports",
    tag = "Reports",
    params(
        ("slug" = String, Path, description = "Prefixo do painel (resolvido na inicialização)"),
        ReportQuery
    ),
    responses(
        (status = 200, description = "Resumo de vendas do período", body = ReportSummary),
        (status = 400, description = "Data em formato inválido"),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Sem a permissão reports_manager_list"),
        (status = 500, description = "Falha ao carregar relatórios")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn index(
    State(app_state): State<AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
    _perm: RequirePermission<PermReportsList>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();
    let range = DateRange::resolve(query.start_date.as_deref(), query.end_date.as_deref(), today)?;

    let summary = app_state
        .report_service
        .compute_summary(range)
        .await
        .map_err(|e| {
            tracing::error!(admin_id = admin.id, "Falha ao carregar relatórios: {}", e);
            AppError::ReportUnavailable(e.to_string())
        })?;

    tracing::info!(
        admin_id = admin.id,
        start = %range.start,
        end = %range.end,
        orders = summary.order_count,
        "📊 Relatório de vendas gerado"
    );

    Ok((StatusCode::OK, Json(summary)))
}

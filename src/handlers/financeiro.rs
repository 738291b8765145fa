// src/handlers/financeiro.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::{error::AppError, extract::ValidatedQuery},
    config::AppState,
    models::{
        abc::AbcEntry,
        billing::InvoiceReport,
        filters::ReportQuery,
        finance::TitlesReport,
    },
};

// GET /api/financeiro/notas
#[utoipa::path(
    get,
    path = "/api/financeiro/notas",
    tag = "Financeiro",
    params(ReportQuery),
    responses(
        (status = 200, description = "Notas consolidadas do período", body = InvoiceReport),
        (status = 400, description = "Filtros ausentes, malformados ou inválidos")
    )
)]
pub async fn get_invoices(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state.finance_service.invoice_report(&query).await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/financeiro/titulos
#[utoipa::path(
    get,
    path = "/api/financeiro/titulos",
    tag = "Financeiro",
    params(ReportQuery),
    responses(
        (status = 200, description = "Resumo de vencidos/pagos/em aberto e títulos filtrados", body = TitlesReport),
        (status = 400, description = "Filtros ausentes, malformados ou inválidos")
    )
)]
pub async fn get_titles(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    // A data de referência é sempre explícita para o agregador
    let as_of = query
        .data_referencia
        .unwrap_or_else(|| Utc::now().date_naive());

    let report = app_state
        .finance_service
        .titles_report(&query, as_of)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/financeiro/curva-abc
#[utoipa::path(
    get,
    path = "/api/financeiro/curva-abc",
    tag = "Financeiro",
    params(ReportQuery),
    responses(
        (status = 200, description = "Curva ABC de clientes por faturamento", body = Vec<AbcEntry>),
        (status = 400, description = "Período inválido")
    )
)]
pub async fn get_abc_curve(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.finance_service.abc_curve(query.period()).await?;

    Ok((StatusCode::OK, Json(entries)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvalidateCacheQuery {
    /// Código de um cliente; sem ele, o cache inteiro é limpo
    pub codigo: Option<String>,
}

// POST /api/financeiro/clientes/cache/invalidar
#[utoipa::path(
    post,
    path = "/api/financeiro/clientes/cache/invalidar",
    tag = "Financeiro",
    params(InvalidateCacheQuery),
    responses(
        (status = 204, description = "Cache de clientes invalidado")
    )
)]
pub async fn invalidate_client_cache(
    State(app_state): State<AppState>,
    Query(query): Query<InvalidateCacheQuery>,
) -> impl IntoResponse {
    app_state
        .finance_service
        .invalidate_client_cache(query.codigo.as_deref())
        .await;

    StatusCode::NO_CONTENT
}

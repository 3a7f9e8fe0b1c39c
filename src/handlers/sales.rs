// src/handlers/sales.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::sales::{SalesSummaryResult, TopCityEntry},
    services::sales_service,
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesPeriodQuery {
    /// Início do período (YYYY-MM-DD)
    pub start_date: String,
    /// Fim do período (YYYY-MM-DD)
    pub end_date: String,
}

// GET /sales/summary
#[utoipa::path(
    get,
    path = "/sales/summary",
    tag = "Sales",
    params(SalesPeriodQuery),
    responses(
        (status = 200, description = "Resumo do período: média móvel de 3 dias e top 5 dias de faturamento", body = SalesSummaryResult),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn get_sales_summary(
    State(app_state): State<AppState>,
    Query(params): Query<SalesPeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Valida ANTES de encostar no banco; datas futuras não passam daqui.
    let today = Local::now().date_naive();
    let range = sales_service::validate_date_range(&params.start_date, &params.end_date, today)?;

    let summary = app_state.sales_service.get_summary(&range).await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /sales/top-cities
#[utoipa::path(
    get,
    path = "/sales/top-cities",
    tag = "Sales",
    params(SalesPeriodQuery),
    responses(
        (status = 200, description = "Top 3 cidades por mês, com participação % nas vendas mensais", body = Vec<TopCityEntry>),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn get_top_cities(
    State(app_state): State<AppState>,
    Query(params): Query<SalesPeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = Local::now().date_naive();
    let range = sales_service::validate_date_range(&params.start_date, &params.end_date, today)?;

    let ranking = app_state.sales_service.get_top_cities(&range).await?;

    Ok((StatusCode::OK, Json(ranking)))
}

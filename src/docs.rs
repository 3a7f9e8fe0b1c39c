// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Sales ---
        handlers::sales::get_sales_summary,
        handlers::sales::get_top_cities,
    ),
    components(
        schemas(
            models::sales::SalesSummaryResult,
            models::sales::SalesSummary,
            models::sales::SalesPeriod,
            models::sales::DailyTotal,
            models::sales::TopDayEntry,
            models::sales::TopCityEntry,
        )
    ),
    tags(
        (name = "Sales", description = "Análise de Vendas (agregações por período)")
    )
)]
pub struct ApiDoc;

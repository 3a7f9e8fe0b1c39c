// src/models/sales.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// 1. Linha crua da consulta (uma por venda)
#[derive(Debug, Clone, FromRow)]
pub struct SaleRecord {
    pub sale_date: NaiveDate,
    pub amount: Option<Decimal>, // A coluna aceita NULL; a agregação trata como zero
}

// 2. Intervalo já validado da requisição
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// 3. Total por dia do período (a média móvel é anotada depois da agregação)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub sales: Decimal,
    pub moving_average: Option<Decimal>,
}

// 4. Entrada do ranking de melhores dias
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TopDayEntry {
    pub date: NaiveDate,
    pub sales: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesSummary {
    pub total_days: usize,
    pub total_sales: Decimal,
    pub period: SalesPeriod,
}

// 5. O payload completo do endpoint de resumo.
// Período sem vendas NÃO é falha: devolve summary zerado + `error` preenchido.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SalesSummaryResult {
    pub summary: SalesSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub moving_average: Vec<DailyTotal>,
    pub top_days: Vec<TopDayEntry>,
}

// 6. Ranking mensal de cidades (participação % nas vendas do mês)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TopCityEntry {
    pub sale_month: NaiveDate,
    pub city: String,
    pub sales_percentage: Option<Decimal>,
    pub monthly_total_sales: Option<Decimal>,
    pub city_rank: i64,
}

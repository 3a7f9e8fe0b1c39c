// src/db/sales_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::sales::{SaleRecord, TopCityEntry},
};

// O repositório de vendas: todas as leituras da tabela 'sales' passam por aqui.
// A pool entra pelo construtor, nada de estado global compartilhado.
#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Linhas cruas do período (sem ordenação, o agregador cuida disso)
    pub async fn fetch_sales_by_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SaleRecord>, AppError> {
        let records = sqlx::query_as::<_, SaleRecord>(
            r#"
            SELECT sale_date, amount
            FROM sales
            WHERE sale_date BETWEEN $1 AND $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    // 2. Top 3 cidades por mês, com participação % nas vendas mensais
    pub async fn fetch_top_cities_by_monthly_sales(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TopCityEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopCityEntry>(
            r#"
            WITH monthly_city_sales AS (
                SELECT
                    DATE_TRUNC('month', s.sale_date)::date AS sale_month,
                    u.city,
                    SUM(s.amount) AS total_sales,
                    SUM(SUM(s.amount)) OVER (PARTITION BY DATE_TRUNC('month', s.sale_date)) AS monthly_total_sales,
                    ROW_NUMBER() OVER (
                        PARTITION BY DATE_TRUNC('month', s.sale_date)
                        ORDER BY SUM(s.amount) DESC
                    ) AS city_rank
                FROM sales s
                INNER JOIN users u ON s.user_id = u.id
                WHERE s.sale_date IS NOT NULL
                  AND u.city IS NOT NULL
                  AND s.sale_date BETWEEN $1 AND $2
                GROUP BY sale_month, u.city
            )
            SELECT
                sale_month,
                city,
                ROUND((total_sales / NULLIF(monthly_total_sales, 0)) * 100, 2) AS sales_percentage,
                monthly_total_sales,
                city_rank
            FROM monthly_city_sales
            WHERE city_rank < 4
            ORDER BY sale_month
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

// src/db/seed_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;

// Carga de dados sintéticos para desenvolvimento: usuários, produtos e vendas
// gerados direto no banco via generate_series (nada de loop no lado Rust).
#[derive(Clone)]
pub struct SeedRepository {
    pool: PgPool,
}

impl SeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_test_data(
        &self,
        users_count: i64,
        products_count: i64,
        sales_count: i64,
    ) -> Result<(), AppError> {
        tracing::info!("Limpando tabelas...");
        sqlx::query("TRUNCATE TABLE sales, users, products CASCADE")
            .execute(&self.pool)
            .await?;
        tracing::info!("Tabelas limpas");

        tracing::info!("Inserindo {} usuários...", users_count);
        sqlx::query(
            r#"
            INSERT INTO users (id, name, city)
            SELECT
                id,
                'User_' || id,
                (ARRAY['Moscow', 'Saint Petersburg', 'Novosibirsk', 'Yekaterinburg', 'Kazan',
                       'Nizhny Novgorod', 'Chelyabinsk', 'Samara', 'Omsk', 'Rostov-on-Don',
                       'Ufa', 'Krasnoyarsk', 'Voronezh', 'Perm', 'Volgograd'])[(id % 15) + 1]
            FROM generate_series(1, $1) AS id
            "#,
        )
        .bind(users_count)
        .execute(&self.pool)
        .await?;
        tracing::info!("Usuários inseridos");

        tracing::info!("Inserindo {} produtos...", products_count);
        sqlx::query(
            r#"
            INSERT INTO products (id, name, category)
            SELECT
                id,
                'Product_' || id,
                (ARRAY['Electronics', 'Clothing', 'Books', 'Home & Garden', 'Sports',
                       'Automotive', 'Beauty', 'Toys', 'Food', 'Jewelry'])[(id % 10) + 1]
            FROM generate_series(1, $1) AS id
            "#,
        )
        .bind(products_count)
        .execute(&self.pool)
        .await?;
        tracing::info!("Produtos inseridos");

        tracing::info!("Inserindo {} vendas...", sales_count);
        sqlx::query(
            r#"
            INSERT INTO sales (id, user_id, product_id, sale_date, amount, quantity)
            SELECT
                id,
                (random() * ($1 - 1))::int + 1,
                (random() * ($2 - 1))::int + 1,
                DATE '2020-01-01' + (random() * 1825)::int,
                ROUND((random() * 2000 + 1)::numeric, 2),
                (random() * 20)::int + 1
            FROM generate_series(1, $3) AS id
            "#,
        )
        .bind(users_count)
        .bind(products_count)
        .bind(sales_count)
        .execute(&self.pool)
        .await?;
        tracing::info!("Vendas inseridas");

        tracing::info!("✅ Dados de teste criados com sucesso!");
        Ok(())
    }
}

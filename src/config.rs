// src/config.rs

use crate::{
    db::{SalesRepository, SeedRepository},
    services::sales_service::SalesService,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

// Configurações vindas do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct Settings {
    pub create_test_data: bool,
    pub users_count_test_data: i64,
    pub products_count_test_data: i64,
    pub sales_count_test_data: i64,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            create_test_data: env_i64("CREATE_TEST_DATA", 1) != 0,
            users_count_test_data: env_i64("USERS_COUNT_TEST_DATA", 10_000),
            products_count_test_data: env_i64("PRODUCTS_COUNT_TEST_DATA", 10_000),
            sales_count_test_data: env_i64("SALES_COUNT_TEST_DATA", 3_000_000),
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub settings: Settings,
    pub sales_service: SalesService,
    pub seed_repo: SeedRepository,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem decide é o main.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let settings = Settings::from_env();

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let sales_repo = SalesRepository::new(db_pool.clone());
        let sales_service = SalesService::new(sales_repo);
        let seed_repo = SeedRepository::new(db_pool.clone());

        Ok(Self {
            db_pool,
            settings,
            sales_service,
            seed_repo,
        })
    }
}

//src/main.rs

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger antes de qualquer outra coisa.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Carga de dados sintéticos, controlada por CREATE_TEST_DATA
    if app_state.settings.create_test_data {
        tracing::info!("Criando dados de teste...");
        let settings = &app_state.settings;
        app_state
            .seed_repo
            .create_test_data(
                settings.users_count_test_data,
                settings.products_count_test_data,
                settings.sales_count_test_data,
            )
            .await
            .expect("Falha ao criar os dados de teste.");
    } else {
        tracing::info!("Criação de dados de teste pulada");
    }

    // Define as rotas de análise de vendas
    let sales_routes = Router::new()
        .route("/summary", get(handlers::sales::get_sales_summary))
        .route("/top-cities", get(handlers::sales::get_top_cities));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/sales", sales_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:8000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Os três primeiros são erros de entrada: detectados ANTES de qualquer query.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Formato de data inválido. Use o formato YYYY-MM-DD")]
    InvalidDateFormat,

    #[error("A data inicial não pode ser maior que a final")]
    InvalidRangeOrder,

    #[error("As datas não podem estar no futuro")]
    FutureDateNotAllowed,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            // Erros de validação do intervalo viram 400, nunca são repetidos.
            AppError::InvalidDateFormat
            | AppError::InvalidRangeOrder
            | AppError::FutureDateNotAllowed => (StatusCode::BAD_REQUEST, self.to_string()),

            // Todos os outros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // O corpo segue o contrato do endpoint: {"detail": "..."}
        let body = Json(json!({ "detail": detail }));
        (status, body).into_response()
    }
}

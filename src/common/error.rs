use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Erros da camada HTTP/banco. O core de conciliação nunca gera erro:
// dados faltando viram zero ou vazio.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Query string inválida: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Período inválido: {0}")]
    InvalidDateRange(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` guarda o contexto do erro para o log.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidQuery(_)
            | AppError::InvalidDateRange(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.errors() {
                    let messages: Vec<String> = match field_errors {
                        validator::ValidationErrorsKind::Field(list) => list
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect(),
                        _ => Vec::new(),
                    };
                    details.insert(field.to_string(), messages);
                }
                json!({
                    "error": "Um ou mais filtros são inválidos.",
                    "details": details,
                })
            }
            AppError::InvalidQuery(rejection) => json!({
                "error": "Parâmetros da consulta ausentes ou malformados.",
                "details": rejection.body_text(),
            }),
            AppError::InvalidDateRange(message) => json!({ "error": message }),

            // Banco e erros internos viram 500; o detalhe só vai para o log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                json!({ "error": "Ocorreu um erro inesperado." })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Contact {
        #[validate(length(min = 2, message = "curto demais"))]
        name: String,
    }

    #[test]
    fn validation_errors_are_bad_request() {
        let errors = Contact { name: "x".into() }.validate().unwrap_err();
        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_range_is_bad_request() {
        let err = AppError::InvalidDateRange("fim antes do início".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_and_internal_errors_are_500() {
        let db = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(db.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let internal = AppError::from(anyhow::anyhow!("falhou"));
        assert_eq!(internal.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

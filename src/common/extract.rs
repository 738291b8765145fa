// src/common/extract.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::common::error::AppError;

// Extrator para query strings validadas. Parâmetro ausente ou malformado e
// regra do `validator` violada saem no mesmo corpo JSON do `AppError`.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::try_from_uri(&parts.uri)?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::to_bytes,
        http::{Request, StatusCode},
        response::IntoResponse,
    };
    use serde_json::Value;

    use crate::models::filters::ReportQuery;

    async fn extract(uri: &str) -> Result<ValidatedQuery<ReportQuery>, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedQuery::<ReportQuery>::from_request_parts(&mut parts, &()).await
    }

    async fn json_body(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn well_formed_query_is_extracted() {
        let ValidatedQuery(query) =
            extract("/notas?dataInicio=2024-03-01&dataFim=2024-03-31&status=3&cliente=bk")
                .await
                .unwrap();
        assert_eq!(query.data_inicio, "2024-03-01".parse().unwrap());
        assert_eq!(query.status.code(), Some("3"));
        assert_eq!(query.client_term(), "bk");
    }

    #[tokio::test]
    async fn missing_date_is_a_json_bad_request() {
        let error = match extract("/notas?dataInicio=2024-03-01").await {
            Err(error) => error,
            Ok(_) => panic!("dataFim ausente deveria ser rejeitado"),
        };
        assert!(matches!(error, AppError::InvalidQuery(_)));

        let (status, body) = json_body(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert!(body["details"].as_str().is_some_and(|d| d.contains("dataFim")));
    }

    #[tokio::test]
    async fn malformed_date_is_a_json_bad_request() {
        let error = match extract("/notas?dataInicio=ontem&dataFim=2024-03-31").await {
            Err(error) => error,
            Ok(_) => panic!("data malformada deveria ser rejeitada"),
        };
        let (status, body) = json_body(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn inverted_period_fails_validation() {
        let error = match extract("/notas?dataInicio=2024-04-01&dataFim=2024-03-01").await {
            Err(error) => error,
            Ok(_) => panic!("período invertido deveria ser rejeitado"),
        };
        assert!(matches!(error, AppError::ValidationError(_)));
        let (status, _) = json_body(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

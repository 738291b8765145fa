// src/db/client_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{billing::ClientRecord, finance::ClientCode},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca vários clientes de uma vez (um único round-trip por relatório).
    pub async fn find_by_codes(&self, codes: &[ClientCode]) -> Result<Vec<ClientRecord>, AppError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<&str> = codes.iter().map(ClientCode::as_str).collect();

        let records = sqlx::query_as::<_, ClientRecord>(
            r#"
            SELECT
                trim(cod_cliente::text) AS client_code,
                apelido,
                razao_social,
                fator_correcao::numeric AS fator_correcao
            FROM bk_clientes
            WHERE trim(cod_cliente::text) = ANY($1)
            "#,
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

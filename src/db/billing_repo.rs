// src/db/billing_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{billing::RawBillingLine, filters::DateRange},
};

// Leitura do faturamento (uma linha por item de nota).
#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Linhas emitidas no período. Nome e fator do cliente são anexados depois,
    // pelo diretório de clientes.
    pub async fn fetch_billing_lines(&self, period: DateRange) -> Result<Vec<RawBillingLine>, AppError> {
        let lines = sqlx::query_as::<_, RawBillingLine>(
            r#"
            SELECT
                nota::text              AS nota,
                data_emissao::date      AS data_emissao,
                cod_cliente::text       AS client_code,
                status::text            AS status,
                quantidade::numeric     AS quantidade,
                valor_unitario::numeric AS valor_unitario
            FROM bk_faturamento
            WHERE data_emissao::date BETWEEN $1 AND $2
            ORDER BY data_emissao, nota
            "#,
        )
        .bind(period.start)
        .bind(period.end)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(RawBillingLine::normalized)
        .collect::<Vec<_>>();

        tracing::debug!(
            linhas = lines.len(),
            inicio = %period.start,
            fim = %period.end,
            "Faturamento carregado"
        );

        Ok(lines)
    }
}

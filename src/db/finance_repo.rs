// src/db/finance_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{
        filters::{DateRange, StatusFilter},
        finance::FinancialTitle,
    },
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  TÍTULOS (Contas a Pagar / Receber)
    // =========================================================================

    // Títulos com vencimento no período. O filtro de status, quando não é "all",
    // já é aplicado na consulta. Texto em branco nas colunas vira None.
    pub async fn fetch_financial_titles(
        &self,
        period: DateRange,
        status: &StatusFilter,
    ) -> Result<Vec<FinancialTitle>, AppError> {
        let titles = sqlx::query_as::<_, FinancialTitle>(
            r#"
            SELECT
                numero_nota::text   AS invoice_number,
                dt_emissao::date    AS issue_date,
                dt_vencimento::date AS due_date,
                dt_pagamento::date  AS payment_date,
                vlr_desconto::numeric AS discount_value,
                "VLRTITULO"::numeric  AS face_value,
                "VLRSALDO"::numeric   AS balance_value,
                status::text        AS status,
                cod_cliente::text   AS client_code,
                nome_cliente        AS client_name,
                centro_custo        AS cost_center
            FROM bk_titulos
            WHERE dt_vencimento::date BETWEEN $1 AND $2
              AND ($3::text IS NULL OR trim(status::text) = $3)
            ORDER BY dt_vencimento, numero_nota
            "#,
        )
        .bind(period.start)
        .bind(period.end)
        .bind(status.code())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(FinancialTitle::normalized)
        .collect::<Vec<_>>();

        tracing::debug!(
            titulos = titles.len(),
            inicio = %period.start,
            fim = %period.end,
            status = ?status,
            "Títulos carregados"
        );

        Ok(titles)
    }
}

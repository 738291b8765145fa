// src/services/finance_service.rs

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::{BillingRepository, ClientDirectory, FinanceRepository},
    models::{
        abc::AbcEntry,
        billing::{InvoiceReport, RawBillingLine},
        filters::{DateRange, ReportQuery},
        finance::{ClientCode, FinancialTitle, TitlesReport},
    },
    services::{
        abc_curve::classify_abc,
        consolidation::{billed_total, consolidate_by_nota, invoice_totals},
        filters::{apply_invoice_filters, apply_title_filters, rederive_client_summaries},
        title_aggregator::summarize_titles,
    },
};

#[derive(Clone)]
pub struct FinanceService {
    billing_repo: BillingRepository,
    finance_repo: FinanceRepository,
    clients: ClientDirectory,
}

impl FinanceService {
    pub fn new(
        billing_repo: BillingRepository,
        finance_repo: FinanceRepository,
        clients: ClientDirectory,
    ) -> Self {
        Self {
            billing_repo,
            finance_repo,
            clients,
        }
    }

    /// Notas consolidadas do período, já filtradas.
    pub async fn invoice_report(&self, query: &ReportQuery) -> Result<InvoiceReport, AppError> {
        let lines = self.load_billing_lines(ensure_period(query.period())?).await?;
        let report = build_invoice_report(&lines, query);

        tracing::info!(
            linhas = lines.len(),
            notas = report.totals.invoice_count,
            faturado = %billed_total(&lines),
            "Relatório de notas gerado"
        );

        Ok(report)
    }

    /// Resumo de títulos (geral + por cliente) e a lista filtrada.
    pub async fn titles_report(
        &self,
        query: &ReportQuery,
        as_of: NaiveDate,
    ) -> Result<TitlesReport, AppError> {
        let period = ensure_period(query.period())?;
        let titles = self
            .finance_repo
            .fetch_financial_titles(period, &query.status)
            .await?;

        let report = build_titles_report(titles, query, as_of);

        tracing::info!(
            titulos = report.titles.len(),
            clientes = report.by_client.len(),
            referencia = %as_of,
            "Relatório de títulos gerado"
        );

        Ok(report)
    }

    /// Curva ABC de clientes sobre todas as notas do período (sem filtros).
    pub async fn abc_curve(&self, period: DateRange) -> Result<Vec<AbcEntry>, AppError> {
        let lines = self.load_billing_lines(ensure_period(period)?).await?;
        let invoices = consolidate_by_nota(&lines);
        Ok(classify_abc(&invoices))
    }

    pub async fn invalidate_client_cache(&self, code: Option<&str>) -> usize {
        match code.and_then(ClientCode::new) {
            Some(code) => usize::from(self.clients.invalidate(&code).await),
            None => self.clients.invalidate_all().await,
        }
    }

    async fn load_billing_lines(&self, period: DateRange) -> Result<Vec<RawBillingLine>, AppError> {
        let mut lines = self.billing_repo.fetch_billing_lines(period).await?;
        self.clients.attach(&mut lines).await?;
        Ok(lines)
    }
}

fn ensure_period(period: DateRange) -> Result<DateRange, AppError> {
    if period.start > period.end {
        return Err(AppError::InvalidDateRange(format!(
            "a data inicial {} é posterior à data final {}",
            period.start, period.end
        )));
    }
    Ok(period)
}

// --- Montagem pura dos relatórios (sem banco) ---

pub fn build_invoice_report(lines: &[RawBillingLine], query: &ReportQuery) -> InvoiceReport {
    let invoices = apply_invoice_filters(
        consolidate_by_nota(lines),
        &query.status,
        query.client_term(),
        query.note_term(),
    );
    let totals = invoice_totals(&invoices);
    InvoiceReport { invoices, totals }
}

/// O resumo geral considera todos os títulos recebidos (o status já foi
/// aplicado na busca). A quebra por cliente é sempre re-derivada da lista
/// completa com o termo de cliente atual.
pub fn build_titles_report(
    titles: Vec<FinancialTitle>,
    query: &ReportQuery,
    as_of: NaiveDate,
) -> TitlesReport {
    let full = summarize_titles(&titles, as_of);
    let by_client = rederive_client_summaries(&full.by_client, query.client_term());
    let titles = apply_title_filters(titles, &query.status, query.client_term());

    TitlesReport {
        summary: full.summary,
        by_client,
        titles,
    }
}

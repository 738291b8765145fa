// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Financeiro ---
        handlers::financeiro::get_invoices,
        handlers::financeiro::get_titles,
        handlers::financeiro::get_abc_curve,
        handlers::financeiro::invalidate_client_cache,
    ),
    components(
        schemas(
            // --- Notas ---
            models::billing::ConsolidatedInvoice,
            models::billing::InvoiceTotals,
            models::billing::InvoiceReport,

            // --- Títulos ---
            models::finance::ClientCode,
            models::finance::FinancialTitle,
            models::finance::FinancialSummary,
            models::finance::ClientFinancialSummary,
            models::finance::TitlesReport,

            // --- Curva ABC ---
            models::abc::AbcClass,
            models::abc::AbcEntry,
        )
    ),
    tags(
        (name = "Financeiro", description = "Conciliação de notas, títulos e indicadores por cliente")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_financial_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/financeiro/notas",
            "/api/financeiro/titulos",
            "/api/financeiro/curva-abc",
            "/api/financeiro/clientes/cache/invalidar",
        ] {
            assert!(doc.paths.paths.contains_key(path), "rota ausente: {path}");
        }
    }
}

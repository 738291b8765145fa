// src/services/consolidation.rs

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::billing::{ConsolidatedInvoice, InvoiceTotals, RawBillingLine};

/// Agrupa as linhas de faturamento em uma nota consolidada por número de nota.
///
/// - Linhas sem nota são descartadas.
/// - O valor de cada linha é `quantidade * (valor_unitario * fator)`, com o fator
///   do cliente aplicado só quando for positivo.
/// - Data, cliente, status e nome vêm da primeira linha vista da nota.
/// - A saída segue a ordem da primeira aparição de cada nota.
/// - Somas fora da faixa do `Decimal` saturam; nada aqui entra em pânico.
pub fn consolidate_by_nota(lines: &[RawBillingLine]) -> Vec<ConsolidatedInvoice> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut invoices: Vec<ConsolidatedInvoice> = Vec::new();

    for line in lines {
        let Some(nota) = line.nota_key() else {
            continue;
        };
        let line_value = line.line_value();

        match positions.get(nota) {
            Some(&pos) => {
                let invoice = &mut invoices[pos];
                invoice.item_count += 1;
                invoice.total_value = invoice.total_value.saturating_add(line_value);
            }
            None => {
                positions.insert(nota, invoices.len());
                invoices.push(ConsolidatedInvoice {
                    nota: nota.to_string(),
                    data_emissao: line.data_emissao,
                    client_code: line.client_code.clone(),
                    status: line.status.clone(),
                    total_value: line_value,
                    item_count: 1,
                    client_name: line.client_name.clone(),
                    correction_factor: line.effective_correction_factor(),
                });
            }
        }
    }

    invoices
}

pub fn invoice_totals(invoices: &[ConsolidatedInvoice]) -> InvoiceTotals {
    invoices.iter().fold(InvoiceTotals::default(), |mut acc, invoice| {
        acc.invoice_count += 1;
        acc.item_count += invoice.item_count;
        acc.total_value = acc.total_value.saturating_add(invoice.total_value);
        acc
    })
}

/// Soma bruta das linhas com nota; deve bater com a soma das notas consolidadas.
pub fn billed_total(lines: &[RawBillingLine]) -> Decimal {
    lines
        .iter()
        .filter(|line| line.nota_key().is_some())
        .map(RawBillingLine::line_value)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

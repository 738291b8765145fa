// src/services/title_aggregator.rs

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::finance::{ClientFinancialSummary, FinancialTitle, TitleSummary};

/// Resume os títulos em uma única passada.
///
/// Quitado (status "3") soma o valor do título em `total_paid`. Qualquer outro
/// status soma o saldo em `total_open` e, se o vencimento for anterior a
/// `as_of`, também em `total_overdue` (vencido é um subconjunto do aberto).
///
/// A quebra por cliente só considera títulos com código e nome de cliente;
/// os demais entram apenas no total geral. Totais fora da faixa do `Decimal`
/// saturam em vez de estourar.
pub fn summarize_titles(titles: &[FinancialTitle], as_of: NaiveDate) -> TitleSummary {
    let mut result = TitleSummary::default();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for title in titles {
        let face_value = title.face_value.unwrap_or_default();
        let balance_value = title.balance_value.unwrap_or_default();

        let client = match (&title.client_code, title.client_name.as_deref()) {
            (Some(code), Some(name)) => {
                let pos = *positions.entry(code.as_str()).or_insert_with(|| {
                    result
                        .by_client
                        .push(ClientFinancialSummary::new(code.clone(), name.to_string()));
                    result.by_client.len() - 1
                });
                Some(&mut result.by_client[pos])
            }
            _ => None,
        };

        let summary = &mut result.summary;
        if title.is_paid() {
            summary.total_paid = summary.total_paid.saturating_add(face_value);
            if let Some(client) = client {
                client.total_paid = client.total_paid.saturating_add(face_value);
            }
            continue;
        }

        let overdue = title.is_overdue(as_of);
        summary.total_open = summary.total_open.saturating_add(balance_value);
        if overdue {
            summary.total_overdue = summary.total_overdue.saturating_add(balance_value);
        }
        if let Some(client) = client {
            client.total_open = client.total_open.saturating_add(balance_value);
            if overdue {
                client.total_overdue = client.total_overdue.saturating_add(balance_value);
            }
        }
    }

    result
}

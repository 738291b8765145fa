// src/services/filters.rs

// Filtros puros usados pelas telas de notas e títulos. Todos são interseções,
// então a ordem de aplicação não muda o resultado final.

use crate::models::{
    billing::ConsolidatedInvoice,
    filters::StatusFilter,
    finance::{ClientFinancialSummary, FinancialTitle},
};

pub trait HasStatus {
    fn status(&self) -> Option<&str>;
}

pub trait HasClientName {
    fn client_name(&self) -> Option<&str>;
}

impl HasStatus for ConsolidatedInvoice {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl HasStatus for FinancialTitle {
    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

impl HasClientName for ConsolidatedInvoice {
    fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }
}

impl HasClientName for FinancialTitle {
    fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }
}

impl HasClientName for ClientFinancialSummary {
    fn client_name(&self) -> Option<&str> {
        Some(&self.client_name)
    }
}

/// "all" devolve tudo; senão compara o status exatamente.
pub fn filter_by_status<T: HasStatus>(items: Vec<T>, status: &StatusFilter) -> Vec<T> {
    let Some(code) = status.code() else {
        return items;
    };
    items
        .into_iter()
        .filter(|item| item.status().map(str::trim) == Some(code))
        .collect()
}

/// Trecho do nome do cliente, sem diferenciar maiúsculas. Termo vazio devolve tudo;
/// itens sem nome nunca casam com um termo preenchido.
pub fn filter_by_client_substring<T: HasClientName>(items: Vec<T>, term: &str) -> Vec<T> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| {
            item.client_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Trecho (não igualdade) do número da nota.
pub fn filter_by_note_substring(invoices: Vec<ConsolidatedInvoice>, term: &str) -> Vec<ConsolidatedInvoice> {
    let needle = term.trim();
    if needle.is_empty() {
        return invoices;
    }
    invoices
        .into_iter()
        .filter(|invoice| invoice.nota.contains(needle))
        .collect()
}

/// Sempre parte da lista completa por cliente; nunca de uma lista já filtrada.
pub fn rederive_client_summaries(
    full: &[ClientFinancialSummary],
    term: &str,
) -> Vec<ClientFinancialSummary> {
    filter_by_client_substring(full.to_vec(), term)
}

pub fn apply_invoice_filters(
    invoices: Vec<ConsolidatedInvoice>,
    status: &StatusFilter,
    client_term: &str,
    note_term: &str,
) -> Vec<ConsolidatedInvoice> {
    let invoices = filter_by_status(invoices, status);
    let invoices = filter_by_client_substring(invoices, client_term);
    filter_by_note_substring(invoices, note_term)
}

pub fn apply_title_filters(
    titles: Vec<FinancialTitle>,
    status: &StatusFilter,
    client_term: &str,
) -> Vec<FinancialTitle> {
    let titles = filter_by_status(titles, status);
    filter_by_client_substring(titles, client_term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::ClientCode;
    use rust_decimal::Decimal;

    fn invoice(nota: &str, status: Option<&str>, client: Option<&str>) -> ConsolidatedInvoice {
        ConsolidatedInvoice {
            nota: nota.to_string(),
            data_emissao: None,
            client_code: None,
            status: status.map(str::to_string),
            total_value: Decimal::ONE,
            item_count: 1,
            client_name: client.map(str::to_string),
            correction_factor: None,
        }
    }

    fn client(code: i64, name: &str) -> ClientFinancialSummary {
        ClientFinancialSummary::new(ClientCode::from(code), name.to_string())
    }

    fn notas(invoices: &[ConsolidatedInvoice]) -> Vec<&str> {
        invoices.iter().map(|i| i.nota.as_str()).collect()
    }

    fn sample() -> Vec<ConsolidatedInvoice> {
        vec![
            invoice("1001", Some("1"), Some("BK Centro")),
            invoice("1002", Some("3"), Some("Bluebay")),
            invoice("2001", Some("1"), None),
            invoice("2010", None, Some("bk norte")),
        ]
    }

    #[test]
    fn status_all_is_pass_through() {
        let items = sample();
        assert_eq!(filter_by_status(items.clone(), &StatusFilter::All), items);
    }

    #[test]
    fn status_is_exact_match() {
        let filtered = filter_by_status(sample(), &StatusFilter::from("1"));
        assert_eq!(notas(&filtered), vec!["1001", "2001"]);

        let filtered = filter_by_status(sample(), &StatusFilter::from("13"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn status_filter_applies_to_titles() {
        let titles = vec![
            FinancialTitle {
                status: Some("3".into()),
                ..Default::default()
            },
            FinancialTitle::default(),
        ];
        assert_eq!(filter_by_status(titles, &StatusFilter::from("3")).len(), 1);
    }

    #[test]
    fn client_filter_is_case_insensitive_and_skips_unnamed() {
        let filtered = filter_by_client_substring(sample(), "BK");
        assert_eq!(notas(&filtered), vec!["1001", "2010"]);

        let filtered = filter_by_client_substring(sample(), "  blue ");
        assert_eq!(notas(&filtered), vec!["1002"]);
    }

    #[test]
    fn blank_client_term_is_pass_through() {
        assert_eq!(filter_by_client_substring(sample(), "").len(), 4);
        assert_eq!(filter_by_client_substring(sample(), "   ").len(), 4);
    }

    #[test]
    fn note_filter_is_substring() {
        let filtered = filter_by_note_substring(sample(), "00");
        assert_eq!(notas(&filtered), vec!["1001", "1002", "2001"]);

        let filtered = filter_by_note_substring(sample(), "201");
        assert_eq!(notas(&filtered), vec!["2010"]);

        assert_eq!(filter_by_note_substring(sample(), "").len(), 4);
    }

    #[test]
    fn filter_order_does_not_matter() {
        let status = StatusFilter::from("1");
        let a = apply_invoice_filters(sample(), &status, "bk", "100");

        let b = filter_by_note_substring(sample(), "100");
        let b = filter_by_client_substring(b, "bk");
        let b = filter_by_status(b, &status);

        assert_eq!(a, b);
        assert_eq!(notas(&a), vec!["1001"]);
    }

    #[test]
    fn rederive_with_empty_term_returns_everything() {
        let full = vec![client(1, "BK Centro"), client(2, "Bluebay"), client(3, "Oni Agência")];
        assert_eq!(rederive_client_summaries(&full, ""), full);
    }

    #[test]
    fn rederive_never_compounds_previous_terms() {
        let full = vec![client(1, "BK Centro"), client(2, "Bluebay"), client(3, "Oni Agência")];

        let first = rederive_client_summaries(&full, "bk");
        assert_eq!(first.len(), 1);

        let second = rederive_client_summaries(&full, "b");
        assert_eq!(second.len(), 2);

        let third = rederive_client_summaries(&full, "AGÊNCIA");
        assert_eq!(third.len(), 1);
        assert_eq!(third[0].client_name, "Oni Agência");
    }

    #[test]
    fn title_filters_combine_status_and_client() {
        let titles = vec![
            FinancialTitle {
                status: Some("1".into()),
                client_name: Some("Bluebay".into()),
                ..Default::default()
            },
            FinancialTitle {
                status: Some("3".into()),
                client_name: Some("Bluebay".into()),
                ..Default::default()
            },
            FinancialTitle {
                status: Some("1".into()),
                client_name: Some("BK".into()),
                ..Default::default()
            },
        ];

        let filtered = apply_title_filters(titles, &StatusFilter::from("1"), "blue");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].status.as_deref(), Some("1"));
        assert_eq!(filtered[0].client_name.as_deref(), Some("Bluebay"));
    }
}

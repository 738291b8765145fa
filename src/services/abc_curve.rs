// src/services/abc_curve.rs

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    abc::{AbcClass, AbcEntry},
    billing::ConsolidatedInvoice,
    finance::ClientCode,
};

const CLASS_A_LIMIT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const CLASS_B_LIMIT: Decimal = Decimal::from_parts(95, 0, 0, false, 0);
const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Curva ABC de clientes sobre as notas consolidadas.
///
/// A classe de cada cliente é decidida pela participação acumulada *antes*
/// dele, então o maior cliente é sempre A. Notas sem cliente formam um único
/// grupo. Sem faturamento positivo, todos ficam com participação zero e classe C.
pub fn classify_abc(invoices: &[ConsolidatedInvoice]) -> Vec<AbcEntry> {
    let mut positions: HashMap<Option<&ClientCode>, usize> = HashMap::new();
    let mut groups: Vec<(Option<ClientCode>, Option<String>, Decimal)> = Vec::new();

    for invoice in invoices {
        let key = invoice.client_code.as_ref();
        match positions.get(&key) {
            Some(&pos) => groups[pos].2 = groups[pos].2.saturating_add(invoice.total_value),
            None => {
                positions.insert(key, groups.len());
                groups.push((
                    invoice.client_code.clone(),
                    invoice.client_name.clone(),
                    invoice.total_value,
                ));
            }
        }
    }

    groups.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.1.cmp(&b.1)));

    let grand_total = groups.iter().map(|g| g.2).fold(Decimal::ZERO, Decimal::saturating_add);
    let mut cumulative = Decimal::ZERO;

    groups
        .into_iter()
        .map(|(client_code, client_name, total_value)| {
            if grand_total <= Decimal::ZERO {
                return AbcEntry {
                    client_code,
                    client_name,
                    total_value,
                    share: Decimal::ZERO,
                    cumulative_share: Decimal::ZERO,
                    class: AbcClass::C,
                };
            }

            let class = if cumulative < CLASS_A_LIMIT {
                AbcClass::A
            } else if cumulative < CLASS_B_LIMIT {
                AbcClass::B
            } else {
                AbcClass::C
            };

            let share = percent_of(total_value, grand_total);
            cumulative = cumulative.saturating_add(share);

            AbcEntry {
                client_code,
                client_name,
                total_value,
                share: share.round_dp(2),
                cumulative_share: cumulative.round_dp(2),
                class,
            }
        })
        .collect()
}

// Percentual sem estouro: se `value * 100` não couber, divide primeiro.
fn percent_of(value: Decimal, total: Decimal) -> Decimal {
    value
        .checked_mul(HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .or_else(|| value.checked_div(total).and_then(|ratio| ratio.checked_mul(HUNDRED)))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(code: Option<i64>, name: &str, value: i64) -> ConsolidatedInvoice {
        ConsolidatedInvoice {
            nota: format!("N{}-{value}", code.unwrap_or_default()),
            data_emissao: None,
            client_code: code.map(ClientCode::from),
            status: None,
            total_value: Decimal::from(value),
            item_count: 1,
            client_name: Some(name.to_string()),
            correction_factor: None,
        }
    }

    fn classes(entries: &[AbcEntry]) -> Vec<AbcClass> {
        entries.iter().map(|e| e.class).collect()
    }

    #[test]
    fn classic_distribution() {
        let invoices = vec![
            invoice(Some(1), "BK", 500),
            invoice(Some(2), "Bluebay", 300),
            invoice(Some(3), "Oni", 120),
            invoice(Some(4), "Padaria", 50),
            invoice(Some(5), "Bar", 30),
        ];

        let entries = classify_abc(&invoices);

        assert_eq!(
            classes(&entries),
            vec![AbcClass::A, AbcClass::A, AbcClass::B, AbcClass::B, AbcClass::C]
        );
        assert_eq!(entries[0].share, Decimal::from(50));
        assert_eq!(entries[1].cumulative_share, Decimal::from(80));
        assert_eq!(entries[4].cumulative_share, Decimal::from(100));
    }

    #[test]
    fn invoices_of_same_client_are_summed() {
        let invoices = vec![
            invoice(Some(1), "BK", 10),
            invoice(Some(2), "Bluebay", 25),
            invoice(Some(1), "BK", 20),
        ];

        let entries = classify_abc(&invoices);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].client_name.as_deref(), Some("BK"));
        assert_eq!(entries[0].total_value, Decimal::from(30));
    }

    #[test]
    fn dominant_client_is_a_and_next_is_b() {
        let invoices = vec![invoice(Some(1), "BK", 900), invoice(Some(2), "Oni", 100)];
        let entries = classify_abc(&invoices);
        assert_eq!(entries[0].share, Decimal::from(90));
        assert_eq!(classes(&entries), vec![AbcClass::A, AbcClass::B]);
    }

    #[test]
    fn clientless_invoices_form_one_group() {
        let invoices = vec![
            invoice(None, "?", 10),
            invoice(None, "?", 15),
            invoice(Some(1), "BK", 5),
        ];
        let entries = classify_abc(&invoices);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].client_code, None);
        assert_eq!(entries[0].total_value, Decimal::from(25));
    }

    #[test]
    fn zero_total_means_class_c() {
        let invoices = vec![invoice(Some(1), "BK", 0), invoice(Some(2), "Oni", 0)];
        let entries = classify_abc(&invoices);
        assert!(entries.iter().all(|e| e.class == AbcClass::C && e.share.is_zero()));
    }

    #[test]
    fn near_limit_totals_do_not_overflow() {
        let half_max = Decimal::MAX / Decimal::TWO;
        let mut invoices = vec![invoice(Some(1), "BK", 0), invoice(Some(2), "Oni", 0)];
        invoices[0].total_value = half_max;
        invoices[1].total_value = half_max;
        invoices.push(invoice(Some(1), "BK", 0));
        invoices[2].total_value = half_max;

        let entries = classify_abc(&invoices);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].client_name.as_deref(), Some("BK"));
        assert_eq!(entries[0].total_value, Decimal::MAX);
        assert_eq!(entries[0].class, AbcClass::A);
        assert!(entries[1].share > Decimal::ZERO);
    }

    #[test]
    fn ties_are_ordered_by_name() {
        let invoices = vec![invoice(Some(2), "Zeta", 10), invoice(Some(1), "Alfa", 10)];
        let entries = classify_abc(&invoices);
        assert_eq!(entries[0].client_name.as_deref(), Some("Alfa"));
    }
}

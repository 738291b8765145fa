// src/models/ingest.rs

// Helpers de desserialização "tolerante" para as linhas que chegam do banco
// como JSON solto. Nenhum deles falha: valor malformado vira None e o core
// trata None como zero/vazio.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Converte qualquer valor JSON em `Decimal`. Aceita números, strings no
/// formato "1234.56", "1234,56" ou "1.234,56". Qualquer outra coisa é `None`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        // O Display do serde_json preserva o literal ("1.1" continua "1.1")
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    }
}

pub fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Formato brasileiro: "1.234,56" -> "1234.56"
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Texto não vazio. Números viram texto (a nota às vezes chega como número).
pub fn string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Mesmo critério de `string_from_value` para texto que já chegou tipado
/// (colunas `text` lidas pelo sqlx).
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Aceita "2024-03-01" ou timestamps ("2024-03-01T00:00:00", "2024-03-01 10:00:00+00").
pub fn date_from_value(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();
    let date_part = raw.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(string_from_value))
}

pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(date_from_value))
}

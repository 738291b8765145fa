// src/models/finance.rs

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::ingest;

/// Código de status que indica título quitado. Qualquer outro valor é "aberto".
pub const PAID_STATUS: &str = "3";

// --- Código do cliente ---
// Chega como número (faturamento) ou texto (títulos). A chave é sempre o texto,
// então 42 e "42" representam o mesmo cliente.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type, ToSchema)]
#[sqlx(transparent)]
#[serde(transparent)]
#[schema(value_type = String, example = "1042")]
pub struct ClientCode(String);

impl ClientCode {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self(i.to_string())),
                // 42.0 também é o cliente 42
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| Self((f as i64).to_string()))
                    .or_else(|| Some(Self(n.to_string()))),
            },
            Value::String(s) => Self::new(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ClientCode {
    fn from(code: i64) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for ClientCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ClientCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| D::Error::custom("código de cliente vazio ou inválido"))
    }
}

/// Versão tolerante para campos opcionais: qualquer coisa inválida vira None.
pub fn lenient_client_code<'de, D>(deserializer: D) -> Result<Option<ClientCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(ClientCode::from_value))
}

// --- Título financeiro (a pagar / a receber) ---
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTitle {
    #[serde(default, deserialize_with = "ingest::lenient_string")]
    #[schema(example = "000123")]
    pub invoice_number: Option<String>,

    #[serde(default, deserialize_with = "ingest::lenient_date")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-01")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "ingest::lenient_date")]
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-31")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "ingest::lenient_date")]
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    // Valores
    #[serde(default, deserialize_with = "ingest::lenient_decimal")]
    pub discount_value: Option<Decimal>,
    #[serde(default, alias = "VLRTITULO", deserialize_with = "ingest::lenient_decimal")]
    #[schema(example = "1500.00")]
    pub face_value: Option<Decimal>,
    #[serde(default, alias = "VLRSALDO", deserialize_with = "ingest::lenient_decimal")]
    #[schema(example = "500.00")]
    pub balance_value: Option<Decimal>,

    #[serde(default, deserialize_with = "ingest::lenient_string")]
    #[schema(example = "1")]
    pub status: Option<String>,

    // Vínculos
    #[serde(default, deserialize_with = "lenient_client_code")]
    pub client_code: Option<ClientCode>,
    #[serde(default, deserialize_with = "ingest::lenient_string")]
    #[schema(example = "Mercado Bom Preço")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "ingest::lenient_string")]
    pub cost_center: Option<String>,
}

impl FinancialTitle {
    pub fn is_paid(&self) -> bool {
        self.status.as_deref().map(str::trim) == Some(PAID_STATUS)
    }

    /// Título lido do banco: texto em branco vale como ausente. Sem isso um
    /// `nome_cliente` vazio abriria um grupo sem nome na quebra por cliente.
    pub fn normalized(self) -> Self {
        Self {
            invoice_number: ingest::non_blank(self.invoice_number),
            status: ingest::non_blank(self.status),
            client_code: self.client_code.and_then(|code| ClientCode::new(code.as_str())),
            client_name: ingest::non_blank(self.client_name),
            cost_center: ingest::non_blank(self.cost_center),
            ..self
        }
    }

    /// Aberto e com vencimento estritamente anterior à data de referência.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        !self.is_paid() && self.due_date.is_some_and(|due| due < as_of)
    }
}

// --- Resumos derivados ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_overdue: Decimal, // Vencido (subconjunto do aberto)
    pub total_paid: Decimal,    // Quitado (VLRTITULO)
    pub total_open: Decimal,    // Em aberto (VLRSALDO)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientFinancialSummary {
    pub client_code: ClientCode,
    pub client_name: String,
    pub total_overdue: Decimal,
    pub total_paid: Decimal,
    pub total_open: Decimal,
}

impl ClientFinancialSummary {
    pub fn new(client_code: ClientCode, client_name: String) -> Self {
        Self {
            client_code,
            client_name,
            total_overdue: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            total_open: Decimal::ZERO,
        }
    }
}

/// Resultado do agregador: totais globais + quebra por cliente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitleSummary {
    pub summary: FinancialSummary,
    pub by_client: Vec<ClientFinancialSummary>,
}

/// O que a tela de títulos recebe.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitlesReport {
    pub summary: FinancialSummary,
    pub by_client: Vec<ClientFinancialSummary>,
    pub titles: Vec<FinancialTitle>,
}

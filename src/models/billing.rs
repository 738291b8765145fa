// src/models/billing.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::{
    finance::{ClientCode, lenient_client_code},
    ingest,
};

// --- 1. Linha de faturamento (uma por item da nota) ---
// `client_name` e `correction_factor` não vêm da tabela de faturamento: são
// preenchidos pelo diretório de clientes antes da consolidação.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RawBillingLine {
    #[serde(default, deserialize_with = "ingest::lenient_string")]
    pub nota: Option<String>,

    #[serde(default, deserialize_with = "ingest::lenient_date")]
    pub data_emissao: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient_client_code")]
    pub client_code: Option<ClientCode>,

    #[serde(default, deserialize_with = "ingest::lenient_string")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "ingest::lenient_decimal")]
    pub quantidade: Option<Decimal>,
    #[serde(default, deserialize_with = "ingest::lenient_decimal")]
    pub valor_unitario: Option<Decimal>,

    #[sqlx(skip)]
    #[serde(default, deserialize_with = "ingest::lenient_string")]
    pub client_name: Option<String>,
    #[sqlx(skip)]
    #[serde(default, deserialize_with = "ingest::lenient_decimal")]
    pub correction_factor: Option<Decimal>,
}

impl RawBillingLine {
    /// Nota normalizada; linhas sem nota não entram na consolidação.
    pub fn nota_key(&self) -> Option<&str> {
        self.nota.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Fator aplicado de fato: só vale se for positivo.
    pub fn effective_correction_factor(&self) -> Option<Decimal> {
        self.correction_factor.filter(|f| *f > Decimal::ZERO)
    }

    /// quantidade * (valor unitário corrigido). Ausentes contam como zero.
    /// Produtos fora da faixa do `Decimal` saturam em vez de estourar.
    pub fn line_value(&self) -> Decimal {
        let quantidade = self.quantidade.unwrap_or_default();
        let unit_price = self.valor_unitario.unwrap_or_default();
        let adjusted = match self.effective_correction_factor() {
            Some(factor) => unit_price.saturating_mul(factor),
            None => unit_price,
        };
        quantidade.saturating_mul(adjusted)
    }

    /// Linha lida do banco: texto em branco vale como ausente, igual à ingestão JSON.
    pub fn normalized(self) -> Self {
        Self {
            nota: ingest::non_blank(self.nota),
            client_code: self.client_code.and_then(|code| ClientCode::new(code.as_str())),
            status: ingest::non_blank(self.status),
            client_name: ingest::non_blank(self.client_name),
            ..self
        }
    }

    pub fn attach_client(&mut self, info: &ClientInfo) {
        self.client_name = info.display_name.clone();
        self.correction_factor = info.correction_factor;
    }
}

// --- 2. Cadastro de cliente (como está na tabela) ---
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ClientRecord {
    pub client_code: ClientCode,
    pub apelido: Option<String>,      // Nome fantasia
    pub razao_social: Option<String>, // Nome legal
    pub fator_correcao: Option<Decimal>,
}

/// O que o faturamento precisa saber de um cliente.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub display_name: Option<String>,
    pub correction_factor: Option<Decimal>,
}

impl From<&ClientRecord> for ClientInfo {
    fn from(record: &ClientRecord) -> Self {
        Self {
            // Apelido tem preferência; razão social é o fallback
            display_name: ingest::non_blank(record.apelido.clone())
                .or_else(|| ingest::non_blank(record.razao_social.clone())),
            correction_factor: record.fator_correcao,
        }
    }
}

// --- 3. Nota consolidada ---
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedInvoice {
    #[schema(example = "45871")]
    pub nota: String,
    #[schema(value_type = Option<String>, format = Date, example = "2024-03-01")]
    pub data_emissao: Option<NaiveDate>,
    pub client_code: Option<ClientCode>,
    pub status: Option<String>,
    #[schema(example = "275.00")]
    pub total_value: Decimal,
    #[schema(example = 2)]
    pub item_count: usize,
    #[schema(example = "Mercado Bom Preço")]
    pub client_name: Option<String>,
    #[schema(example = "1.1")]
    pub correction_factor: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub invoice_count: usize,
    pub item_count: usize,
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceReport {
    pub invoices: Vec<ConsolidatedInvoice>,
    pub totals: InvoiceTotals,
}

// src/models/filters.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

// --- Filtro de status ---
// "all" deixa passar tudo; parâmetro vazio equivale a não filtrar. Qualquer
// outro valor (inclusive "ALL") é um código comparado exatamente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Code(String),
}

impl StatusFilter {
    pub fn code(&self) -> Option<&str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Code(code) => Some(code),
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "all" {
            StatusFilter::All
        } else {
            StatusFilter::Code(trimmed.to_string())
        }
    }
}

impl From<String> for StatusFilter {
    fn from(raw: String) -> Self {
        StatusFilter::from(raw.as_str())
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => "all".to_string(),
            StatusFilter::Code(code) => code,
        }
    }
}

/// Período inclusivo nas duas pontas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

// --- Query string dos relatórios financeiros ---
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_period", skip_on_field_errors = false))]
pub struct ReportQuery {
    /// Início do período (inclusivo)
    #[param(value_type = String, format = Date, example = "2024-03-01")]
    pub data_inicio: NaiveDate,

    /// Fim do período (inclusivo)
    #[param(value_type = String, format = Date, example = "2024-03-31")]
    pub data_fim: NaiveDate,

    /// "all" ou um código de status exato
    #[serde(default)]
    #[param(value_type = Option<String>, example = "all")]
    pub status: StatusFilter,

    /// Trecho do nome do cliente (sem diferenciar maiúsculas)
    #[validate(length(max = 120, message = "O filtro de cliente deve ter no máximo 120 caracteres"))]
    pub cliente: Option<String>,

    /// Trecho do número da nota
    #[validate(length(max = 40, message = "O filtro de nota deve ter no máximo 40 caracteres"))]
    pub nota: Option<String>,

    /// Data de referência para o cálculo de vencidos (padrão: hoje)
    #[param(value_type = Option<String>, format = Date)]
    pub data_referencia: Option<NaiveDate>,
}

fn validate_period(query: &ReportQuery) -> Result<(), ValidationError> {
    if query.data_inicio > query.data_fim {
        let mut err = ValidationError::new("invalid_period");
        err.message = Some("A data inicial não pode ser posterior à data final".into());
        return Err(err);
    }
    Ok(())
}

impl ReportQuery {
    pub fn period(&self) -> DateRange {
        DateRange {
            start: self.data_inicio,
            end: self.data_fim,
        }
    }

    pub fn client_term(&self) -> &str {
        self.cliente.as_deref().unwrap_or_default()
    }

    pub fn note_term(&self) -> &str {
        self.nota.as_deref().unwrap_or_default()
    }
}

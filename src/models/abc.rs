// src/models/abc.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::finance::ClientCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum AbcClass {
    A, // Até 80% do faturamento acumulado
    B, // De 80% a 95%
    C, // O restante
}

// Uma linha da Curva ABC de clientes
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbcEntry {
    pub client_code: Option<ClientCode>,
    #[schema(example = "Mercado Bom Preço")]
    pub client_name: Option<String>,
    #[schema(example = "12500.00")]
    pub total_value: Decimal,
    /// Participação no total, em %
    #[schema(example = "41.67")]
    pub share: Decimal,
    /// Participação acumulada até esta linha (inclusive), em %
    #[schema(example = "41.67")]
    pub cumulative_share: Decimal,
    pub class: AbcClass,
}

use crate::shared::decode::{DecodeError, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response of `GET /api/relatorios/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default)]
    pub vendas_periodo: Decimal,
    #[serde(default)]
    pub vendas_hoje: Decimal,
    #[serde(default)]
    pub produtos_estoque_baixo: u32,
    /// Sellers currently active (`ambulantes_ativos` on older backends)
    #[serde(default, alias = "ambulantes_ativos")]
    pub clientes_ativos: u32,
    #[serde(default)]
    pub pedidos_abertos: u32,
    #[serde(default)]
    pub produto_mais_vendido: ProdutoMaisVendido,
    #[serde(default)]
    pub vendas_por_dia: Vec<VendaDiaria>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProdutoMaisVendido {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub quantidade: Decimal,
}

/// One day of the sales chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendaDiaria {
    pub data: String,
    pub vendas: Decimal,
}

impl DashboardMetrics {
    /// Largest daily value, used to scale the bar chart.
    pub fn max_daily_sales(&self) -> Decimal {
        self.vendas_por_dia
            .iter()
            .map(|d| d.vendas)
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Validate for DashboardMetrics {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.vendas_periodo < Decimal::ZERO || self.vendas_hoje < Decimal::ZERO {
            return Err(DecodeError::invalid("vendas", "negativas"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::decode::decode_json;

    #[test]
    fn test_decode_metrics_with_legacy_names() {
        let m: DashboardMetrics = decode_json(
            r#"{"vendas_periodo": 1500.5, "vendas_hoje": 80, "produtos_estoque_baixo": 2,
                "ambulantes_ativos": 7, "pedidos_abertos": 3,
                "produto_mais_vendido": {"nome": "Picolé", "quantidade": 120},
                "vendas_por_dia": [{"data": "2025-02-01", "vendas": 10},
                                   {"data": "2025-02-02", "vendas": 42.5}]}"#,
        )
        .unwrap();
        assert_eq!(m.clientes_ativos, 7);
        assert_eq!(m.max_daily_sales(), Decimal::new(425, 1));
    }

    #[test]
    fn test_empty_body_defaults() {
        let m: DashboardMetrics = decode_json("{}").unwrap();
        assert_eq!(m, DashboardMetrics::default());
        assert_eq!(m.max_daily_sales(), Decimal::ZERO);
    }
}

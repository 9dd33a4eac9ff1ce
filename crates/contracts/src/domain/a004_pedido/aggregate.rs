use super::status::PedidoStatus;
use crate::domain::a001_cliente::{Cliente, ClienteId};
use crate::domain::a003_produto::{aggregate::is_dry_ice_name, ProdutoId};
use crate::domain::common::{datetime, AggregateRoot};
use crate::shared::decode::{DecodeError, Validate};
use crate::shared::numeric::has_fraction;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// ID pedido
    PedidoId
);

/// Linha de produto de um pedido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub produto_id: ProdutoId,
    #[serde(default)]
    pub produto_nome: Option<String>,
    /// Quantidade entregue; fracionária para produtos por peso (kg)
    pub quantidade_saida: Decimal,
    #[serde(default)]
    pub quantidade_retorno: Decimal,
    #[serde(default)]
    pub quantidade_vendida: Option<Decimal>,
    #[serde(alias = "preco_venda", alias = "preco_venda_unitario_registrado")]
    pub preco_unitario: Decimal,
    #[serde(default)]
    pub valor_total: Option<Decimal>,
    #[serde(default)]
    pub nao_devolve: bool,
    #[serde(default)]
    pub peso: Option<Decimal>,
}

impl PedidoItem {
    pub fn nome(&self) -> String {
        self.produto_nome
            .clone()
            .unwrap_or_else(|| format!("Produto #{}", self.produto_id))
    }

    /// Best guess when no catalog entry is at hand: explicit weight, dry-ice
    /// name, or an already fractional issued quantity.
    pub fn looks_weight_based(&self) -> bool {
        self.peso.map(|p| p > Decimal::ZERO).unwrap_or(false)
            || self.produto_nome.as_deref().map(is_dry_ice_name).unwrap_or(false)
            || has_fraction(self.quantidade_saida)
    }
}

impl Validate for PedidoItem {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.quantidade_saida < Decimal::ZERO {
            return Err(DecodeError::invalid("quantidade_saida", "negativa"));
        }
        if self.quantidade_retorno < Decimal::ZERO {
            return Err(DecodeError::invalid("quantidade_retorno", "negativa"));
        }
        if self.quantidade_retorno > self.quantidade_saida {
            return Err(DecodeError::invalid(
                "quantidade_retorno",
                "maior que a quantidade de saída",
            ));
        }
        if self.preco_unitario < Decimal::ZERO {
            return Err(DecodeError::invalid("preco_unitario", "negativo"));
        }
        Ok(())
    }
}

/// Pedido (viagem de consignação)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pedido {
    pub id: PedidoId,
    pub cliente_id: ClienteId,
    #[serde(default)]
    pub cliente_nome: Option<String>,
    #[serde(
        default,
        deserialize_with = "datetime::deserialize_opt",
        serialize_with = "datetime::serialize_opt"
    )]
    pub data_operacao: Option<NaiveDateTime>,
    pub status: PedidoStatus,
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub divida: Decimal,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub itens: Vec<PedidoItem>,
    #[serde(
        default,
        deserialize_with = "datetime::deserialize_opt",
        serialize_with = "datetime::serialize_opt"
    )]
    pub created_at: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "datetime::deserialize_opt",
        serialize_with = "datetime::serialize_opt"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Pedido {
    pub fn cliente_label(&self) -> String {
        self.cliente_nome
            .clone()
            .unwrap_or_else(|| format!("{} #{}", Cliente::element_name(), self.cliente_id))
    }

    pub fn is_open_for_return(&self) -> bool {
        self.status.is_open_for_return()
    }

    pub fn title(&self) -> String {
        format!("{} #{}", Self::element_name(), self.id)
    }
}

impl Validate for Pedido {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.divida < Decimal::ZERO {
            return Err(DecodeError::invalid("divida", "negativa"));
        }
        self.itens.validate().map_err(|e| e.within("itens"))
    }
}

impl AggregateRoot for Pedido {
    type Id = PedidoId;

    fn collection_name() -> &'static str {
        "pedidos"
    }

    fn element_name() -> &'static str {
        "Pedido"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::decode::decode_json;

    const PEDIDO_JSON: &str = r#"{
        "id": 12, "cliente_id": 3, "cliente_nome": "João",
        "ambulante_id": 3, "ambulante_nome": "João",
        "data_operacao": "2025-02-10T08:30:00", "status": "saida",
        "total": 0.0, "divida": 0.0, "observacoes": null,
        "itens": [
            {"id": 1, "pedido_id": 12, "produto_id": 1, "produto_nome": "Picolé",
             "quantidade_saida": 10.0, "quantidade_retorno": 0, "quantidade_vendida": 10,
             "preco_unitario": 2.5, "valor_total": 25.0, "created_at": null},
            {"id": 2, "pedido_id": 12, "produto_id": 9, "produto_nome": "Gelo Seco",
             "quantidade_saida": 2.5, "quantidade_retorno": 0, "quantidade_vendida": 2,
             "preco_unitario": 3.0, "valor_total": 7.5, "created_at": null}
        ],
        "created_at": "2025-02-10T08:30:00", "updated_at": "2025-02-10T08:30:00"
    }"#;

    #[test]
    fn test_decode_backend_pedido() {
        let p: Pedido = decode_json(PEDIDO_JSON).unwrap();
        assert_eq!(p.id, PedidoId(12));
        assert_eq!(p.cliente_label(), "João");
        assert!(p.is_open_for_return());
        assert_eq!(p.itens.len(), 2);
        assert!(!p.itens[0].looks_weight_based());
        assert!(p.itens[1].looks_weight_based());
    }

    #[test]
    fn test_return_above_issued_is_rejected() {
        let json = r#"{"id": 1, "cliente_id": 1, "status": "saida", "itens": [
            {"produto_id": 1, "quantidade_saida": 2, "quantidade_retorno": 3, "preco_unitario": 1}
        ]}"#;
        let err = decode_json::<Pedido>(json).unwrap_err();
        assert_eq!(
            err,
            DecodeError::invalid("itens.[0].quantidade_retorno", "maior que a quantidade de saída")
        );
    }

    #[test]
    fn test_preco_venda_alias() {
        let item: PedidoItem = decode_json(
            r#"{"produto_id": 4, "quantidade_saida": 1, "preco_venda": 4.0}"#,
        )
        .unwrap();
        assert_eq!(item.preco_unitario, Decimal::from(4));
        assert_eq!(item.nome(), "Produto #4");
    }
}

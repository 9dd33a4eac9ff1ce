//! Request/response bodies of the `/api/pedidos` endpoints

use super::aggregate::{Pedido, PedidoId, PedidoItem};
use super::status::PedidoStatus;
use crate::domain::a001_cliente::ClienteId;
use crate::domain::a003_produto::ProdutoId;
use crate::shared::decode::{DecodeError, Validate};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Query of `GET /api/pedidos`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PedidoListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PedidoStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<ClienteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_fim: Option<NaiveDate>,
}

impl PedidoListQuery {
    /// Orders waiting for their return leg.
    pub fn open_orders() -> Self {
        Self {
            status: Some(PedidoStatus::Saida),
            ..Self::default()
        }
    }
}

/// Response of `GET /api/pedidos/{id}/itens`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PedidoItensResponse {
    pub pedido_id: PedidoId,
    #[serde(default)]
    pub ambulante_nome: Option<String>,
    #[serde(default)]
    pub status: Option<PedidoStatus>,
    #[serde(default)]
    pub total: Decimal,
    pub itens: Vec<PedidoItem>,
}

/// The items endpoint answered with a bare array in its first revision.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PedidoItensPayload {
    Wrapped(PedidoItensResponse),
    Bare(Vec<PedidoItem>),
}

impl PedidoItensPayload {
    pub fn into_items(self) -> Vec<PedidoItem> {
        match self {
            Self::Wrapped(r) => r.itens,
            Self::Bare(items) => items,
        }
    }
}

impl Validate for PedidoItensPayload {
    fn validate(&self) -> Result<(), DecodeError> {
        match self {
            Self::Wrapped(r) => r.itens.validate().map_err(|e| e.within("itens")),
            Self::Bare(items) => items.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetornoItem {
    pub produto_id: ProdutoId,
    pub quantidade_retorno: Decimal,
}

/// Body of `POST /api/pedidos/{id}/retorno`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetornoRequest {
    pub itens: Vec<RetornoItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divida: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

/// Response of the settlement endpoint.
///
/// The amount field was renamed between backend revisions
/// (`valor_total_a_pagar` → `valor_total`); when neither is present the
/// settled order's `total` is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetornoResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "valor_total_a_pagar")]
    pub valor_total: Option<Decimal>,
    #[serde(default)]
    pub pedido: Option<Pedido>,
}

impl RetornoResponse {
    pub fn amount_due(&self) -> Option<Decimal> {
        self.valor_total
            .or_else(|| self.pedido.as_ref().map(|p| p.total))
    }
}

impl Validate for RetornoResponse {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.valor_total.is_none() && self.pedido.is_none() {
            return Err(DecodeError::invalid("valor_total", "ausente"));
        }
        self.pedido.validate().map_err(|e| e.within("pedido"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaidaItem {
    pub produto_id: ProdutoId,
    pub quantidade_saida: Decimal,
}

/// Body of `POST /api/pedidos/saida`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaidaRequest {
    pub cliente_id: ClienteId,
    pub itens: Vec<SaidaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaidaResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub pedido: Pedido,
}

impl Validate for SaidaResponse {
    fn validate(&self) -> Result<(), DecodeError> {
        self.pedido.validate().map_err(|e| e.within("pedido"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::decode::decode_json;

    #[test]
    fn test_itens_payload_both_shapes() {
        let wrapped: PedidoItensPayload = decode_json(
            r#"{"pedido_id": 5, "ambulante_nome": "Ana", "status": "saida", "total": 0,
                "itens": [{"produto_id": 1, "quantidade_saida": 3, "preco_unitario": 2}]}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_items().len(), 1);

        let bare: PedidoItensPayload = decode_json(
            r#"[{"id": 8, "produto_id": 1, "produto_nome": "Picolé", "quantidade_saida": 3,
                 "preco_venda": 2}]"#,
        )
        .unwrap();
        let items = bare.into_items();
        assert_eq!(items[0].preco_unitario, Decimal::from(2));
    }

    #[test]
    fn test_retorno_request_omits_absent_divida() {
        let req = RetornoRequest {
            itens: vec![RetornoItem {
                produto_id: ProdutoId(1),
                quantidade_retorno: Decimal::from(3),
            }],
            divida: None,
            observacoes: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"itens": [{"produto_id": 1, "quantidade_retorno": 3.0}]})
        );
    }

    #[test]
    fn test_retorno_response_amount_revisions() {
        let old: RetornoResponse = decode_json(r#"{"valor_total_a_pagar": 57.5}"#).unwrap();
        assert_eq!(old.amount_due(), Some(Decimal::new(575, 1)));

        let new: RetornoResponse = decode_json(
            r#"{"message": "ok", "pedido": {"id": 1, "cliente_id": 2, "status": "finalizado", "total": 12.0}}"#,
        )
        .unwrap();
        assert_eq!(new.amount_due(), Some(Decimal::from(12)));

        assert!(decode_json::<RetornoResponse>(r#"{"message": "ok"}"#).is_err());
    }

    #[test]
    fn test_open_orders_query() {
        let q = PedidoListQuery::open_orders();
        assert_eq!(q.status, Some(PedidoStatus::Saida));
        assert_eq!(q.page, None);
    }
}

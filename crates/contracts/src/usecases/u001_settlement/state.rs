use super::calculator::{compute_settlement, ReturnEntries, Settlement, SettlementItem};
use crate::domain::a003_produto::{Produto, ProdutoId};
use crate::domain::a004_pedido::{Pedido, PedidoId, PedidoItem, RetornoItem, RetornoRequest};
use crate::shared::numeric::{parse_or_zero, round_currency};
use crate::shared::validation::ValidationError;
use rust_decimal::Decimal;

/// Orders offered for return entry: only `saida` ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenOrders(Vec<Pedido>);

impl OpenOrders {
    /// The server is asked for `status=saida` already; filter again in case
    /// an older backend ignores the parameter.
    pub fn from_list(pedidos: Vec<Pedido>) -> Self {
        Self(
            pedidos
                .into_iter()
                .filter(Pedido::is_open_for_return)
                .collect(),
        )
    }

    pub fn get(&self, id: PedidoId) -> Option<&Pedido> {
        self.0.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pedido> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Tracks the item fetch of the selected order.
///
/// Only the latest selection counts: a response for an older one is stale
/// and must be dropped, and clearing the selection ends the pending fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemsRequest {
    pending: Option<PedidoId>,
}

impl ItemsRequest {
    /// Start a fetch for `pedido_id`; `None` cancels whatever is pending.
    pub fn begin(&mut self, pedido_id: Option<PedidoId>) {
        self.pending = pedido_id;
    }

    /// A response arrived. True when it belongs to the current selection,
    /// which is then no longer pending.
    pub fn finish(&mut self, pedido_id: PedidoId) -> bool {
        if self.pending == Some(pedido_id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettlementAction {
    /// A pedido was selected and its lines fetched
    Load {
        pedido_id: PedidoId,
        items: Vec<SettlementItem>,
    },
    /// Raw text typed in a return input
    SetReturn { produto_id: ProdutoId, input: String },
    /// Raw text typed in the debt input
    SetDebt(String),
    SetObservacoes(String),
    Reset,
}

/// Form state of the return settlement screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementState {
    pub pedido_id: Option<PedidoId>,
    pub items: Vec<SettlementItem>,
    pub returns: ReturnEntries,
    pub debt_surcharge: Decimal,
    pub observacoes: String,
}

impl SettlementState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert fetched order lines, joining them with the catalog.
    pub fn items_from(pedido_itens: &[PedidoItem], produtos: &[Produto]) -> Vec<SettlementItem> {
        pedido_itens
            .iter()
            .map(|item| {
                let produto = produtos.iter().find(|p| p.id == item.produto_id);
                SettlementItem::from_pedido_item(item, produto)
            })
            .collect()
    }

    pub fn reduce(mut self, action: SettlementAction) -> Self {
        match action {
            SettlementAction::Load { pedido_id, items } => {
                self = Self {
                    pedido_id: Some(pedido_id),
                    items,
                    ..Self::default()
                };
            }
            SettlementAction::SetReturn { produto_id, input } => {
                // Unknown products are ignored; the input is auto-adjusted
                // to the line's range when stored.
                if let Some(item) = self.items.iter().find(|i| i.produto_id == produto_id) {
                    let clamped = item.clamp_return(parse_or_zero(&input));
                    self.returns.set(produto_id, clamped);
                }
            }
            SettlementAction::SetDebt(input) => {
                self.debt_surcharge = parse_or_zero(&input);
            }
            SettlementAction::SetObservacoes(text) => {
                self.observacoes = text;
            }
            SettlementAction::Reset => {
                self = Self::default();
            }
        }
        self
    }

    pub fn summary(&self) -> Settlement {
        compute_settlement(&self.items, &self.returns, self.debt_surcharge)
    }

    /// Non-returnable lines get no input at all.
    pub fn return_input_enabled(&self, produto_id: ProdutoId) -> bool {
        self.items
            .iter()
            .any(|i| i.produto_id == produto_id && !i.non_returnable)
    }

    pub fn is_loaded(&self) -> bool {
        self.pedido_id.is_some()
    }

    /// Build the body for `POST /api/pedidos/{id}/retorno`.
    pub fn to_request(&self) -> Result<(PedidoId, RetornoRequest), ValidationError> {
        let pedido_id = self.pedido_id.ok_or(ValidationError::MissingPedido)?;
        if self.items.is_empty() {
            return Err(ValidationError::NoItems);
        }

        let settlement = self.summary();
        let itens = settlement
            .lines
            .iter()
            .map(|line| RetornoItem {
                produto_id: line.produto_id,
                quantidade_retorno: line.quantity_returned,
            })
            .collect();

        let divida = (settlement.debt_surcharge > Decimal::ZERO)
            .then(|| round_currency(settlement.debt_surcharge));
        let observacoes = Some(self.observacoes.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok((
            pedido_id,
            RetornoRequest {
                itens,
                divida,
                observacoes,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_pedido::PedidoStatus;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn loaded() -> SettlementState {
        let items = vec![
            SettlementItem {
                produto_id: ProdutoId(1),
                produto_nome: "Picolé".into(),
                quantity_issued: d("10"),
                unit_price: d("2.50"),
                non_returnable: false,
                weight_based: false,
            },
            SettlementItem {
                produto_id: ProdutoId(2),
                produto_nome: "Gelo seco".into(),
                quantity_issued: d("2.5"),
                unit_price: d("3.00"),
                non_returnable: true,
                weight_based: true,
            },
        ];
        SettlementState::new().reduce(SettlementAction::Load {
            pedido_id: PedidoId(7),
            items,
        })
    }

    #[test]
    fn test_set_return_clamps_on_entry() {
        let state = loaded().reduce(SettlementAction::SetReturn {
            produto_id: ProdutoId(1),
            input: "15".into(),
        });
        assert_eq!(state.returns.get(ProdutoId(1)), d("10"));

        let state = state.reduce(SettlementAction::SetReturn {
            produto_id: ProdutoId(2),
            input: "1".into(),
        });
        assert_eq!(state.returns.get(ProdutoId(2)), Decimal::ZERO);
        assert!(!state.return_input_enabled(ProdutoId(2)));
        assert!(state.return_input_enabled(ProdutoId(1)));
    }

    #[test]
    fn test_unknown_product_is_ignored() {
        let state = loaded().reduce(SettlementAction::SetReturn {
            produto_id: ProdutoId(99),
            input: "1".into(),
        });
        assert!(state.returns.is_empty());
    }

    #[test]
    fn test_summary_recomputes_on_every_action() {
        let state = loaded()
            .reduce(SettlementAction::SetReturn {
                produto_id: ProdutoId(1),
                input: "3".into(),
            })
            .reduce(SettlementAction::SetDebt("20".into()));
        let summary = state.summary();
        // 7 × 2.50 + 2.5 × 3.00
        assert_eq!(summary.subtotal, d("25.00"));
        assert_eq!(summary.total_due_display().to_string(), "45.00");
    }

    #[test]
    fn test_to_request() {
        let state = loaded()
            .reduce(SettlementAction::SetReturn {
                produto_id: ProdutoId(1),
                input: "3".into(),
            })
            .reduce(SettlementAction::SetDebt("12,345".into()))
            .reduce(SettlementAction::SetObservacoes("  ".into()));
        let (id, req) = state.to_request().unwrap();
        assert_eq!(id, PedidoId(7));
        assert_eq!(req.itens.len(), 2);
        assert_eq!(req.itens[0].quantidade_retorno, d("3"));
        assert_eq!(req.itens[1].quantidade_retorno, Decimal::ZERO);
        assert_eq!(req.divida, Some(d("12.35")));
        assert_eq!(req.observacoes, None);
    }

    #[test]
    fn test_to_request_omits_zero_debt() {
        let (_, req) = loaded().to_request().unwrap();
        assert_eq!(req.divida, None);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("divida").is_none());
    }

    #[test]
    fn test_to_request_validation() {
        assert_eq!(
            SettlementState::new().to_request().unwrap_err(),
            ValidationError::MissingPedido
        );
        let empty = SettlementState::new().reduce(SettlementAction::Load {
            pedido_id: PedidoId(1),
            items: vec![],
        });
        assert_eq!(empty.to_request().unwrap_err(), ValidationError::NoItems);
    }

    #[test]
    fn test_load_and_reset_clear_previous_entries() {
        let state = loaded().reduce(SettlementAction::SetDebt("5".into()));
        let reloaded = state.clone().reduce(SettlementAction::Load {
            pedido_id: PedidoId(8),
            items: vec![],
        });
        assert_eq!(reloaded.debt_surcharge, Decimal::ZERO);
        assert_eq!(reloaded.pedido_id, Some(PedidoId(8)));
        assert_eq!(state.reduce(SettlementAction::Reset), SettlementState::new());
    }

    #[test]
    fn test_open_orders_filter() {
        let pedidos: Vec<Pedido> = serde_json::from_str(
            r#"[
                {"id": 1, "cliente_id": 1, "status": "saida"},
                {"id": 2, "cliente_id": 1, "status": "finalizado"},
                {"id": 3, "cliente_id": 2, "status": "cancelado"},
                {"id": 4, "cliente_id": 2, "status": "saida"}
            ]"#,
        )
        .unwrap();
        let open = OpenOrders::from_list(pedidos);
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|p| p.status == PedidoStatus::Saida));
        assert!(open.get(PedidoId(4)).is_some());
        assert!(open.get(PedidoId(2)).is_none());
    }

    #[test]
    fn test_items_request_cancel_clears_loading() {
        let mut request = ItemsRequest::default();
        request.begin(Some(PedidoId(7)));
        assert!(request.is_loading());

        // selection cleared before the response arrives
        request.begin(None);
        assert!(!request.is_loading());
        assert!(!request.finish(PedidoId(7)));
        assert!(!request.is_loading());
    }

    #[test]
    fn test_items_request_keeps_only_latest() {
        let mut request = ItemsRequest::default();
        request.begin(Some(PedidoId(1)));
        request.begin(Some(PedidoId(2)));

        assert!(!request.finish(PedidoId(1)));
        assert!(request.is_loading());
        assert!(request.finish(PedidoId(2)));
        assert!(!request.is_loading());
        assert!(!request.finish(PedidoId(2)));
    }
}

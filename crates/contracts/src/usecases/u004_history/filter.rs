use crate::domain::a001_cliente::ClienteId;
use crate::domain::a004_pedido::{Pedido, PedidoListQuery, PedidoStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Filters of the history page.
///
/// Status, cliente and dates go to the server as query parameters; `apply`
/// repeats them locally together with the free-text search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub status: Option<PedidoStatus>,
    pub cliente_id: Option<ClienteId>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub search: String,
}

impl HistoryFilter {
    pub fn matches(&self, pedido: &Pedido) -> bool {
        if self.status.is_some_and(|s| s != pedido.status) {
            return false;
        }
        if self.cliente_id.is_some_and(|c| c != pedido.cliente_id) {
            return false;
        }
        if self.data_inicio.is_some() || self.data_fim.is_some() {
            // Orders without a date cannot be placed in a range
            let Some(data) = pedido.data_operacao.map(|d| d.date()) else {
                return false;
            };
            if self.data_inicio.is_some_and(|inicio| data < inicio) {
                return false;
            }
            if self.data_fim.is_some_and(|fim| data > fim) {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let haystack = format!("{} {}", pedido.id, pedido.cliente_label()).to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Matching orders, most recent first (undated last, then by id).
    pub fn apply(&self, pedidos: &[Pedido]) -> Vec<Pedido> {
        let mut result: Vec<Pedido> = pedidos.iter().filter(|p| self.matches(p)).cloned().collect();
        result.sort_by(|a, b| {
            b.data_operacao
                .cmp(&a.data_operacao)
                .then_with(|| b.id.cmp(&a.id))
        });
        result
    }

    pub fn to_query(&self, page: u32, per_page: u32) -> PedidoListQuery {
        PedidoListQuery {
            page: Some(page.max(1)),
            per_page: Some(per_page),
            status: self.status,
            cliente_id: self.cliente_id,
            data_inicio: self.data_inicio,
            data_fim: self.data_fim,
        }
    }
}

/// Count and amount per status for the history header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusTotals {
    pub em_aberto: u32,
    pub finalizados: u32,
    pub cancelados: u32,
    /// Σ total of finalizado orders
    pub valor_finalizado: Decimal,
    /// Σ divida of finalizado orders
    pub divida_registrada: Decimal,
}

impl StatusTotals {
    pub fn from_pedidos(pedidos: &[Pedido]) -> Self {
        pedidos.iter().fold(Self::default(), |mut acc, p| {
            match p.status {
                PedidoStatus::Saida => acc.em_aberto += 1,
                PedidoStatus::Finalizado => {
                    acc.finalizados += 1;
                    acc.valor_finalizado += p.total;
                    acc.divida_registrada += p.divida;
                }
                PedidoStatus::Cancelado => acc.cancelados += 1,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pedidos() -> Vec<Pedido> {
        serde_json::from_value(json!([
            {"id": 1, "cliente_id": 1, "cliente_nome": "Ana", "status": "finalizado", "total": 30, "divida": 5, "data_operacao": "2025-02-01T09:00:00"},
            {"id": 2, "cliente_id": 2, "cliente_nome": "Bruno", "status": "saida", "data_operacao": "2025-02-03T09:00:00"},
            {"id": 3, "cliente_id": 1, "cliente_nome": "Ana", "status": "cancelado", "data_operacao": "2025-02-02T18:30:00"},
            {"id": 4, "cliente_id": 2, "cliente_nome": "Bruno", "status": "finalizado", "total": 12.5},
            {"id": 5, "cliente_id": 1, "cliente_nome": "Ana", "status": "saida", "data_operacao": "2025-02-03T07:00:00"}
        ]))
        .unwrap()
    }

    fn ids(pedidos: &[Pedido]) -> Vec<i64> {
        pedidos.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_default_filter_sorts_most_recent_first() {
        let result = HistoryFilter::default().apply(&pedidos());
        assert_eq!(ids(&result), vec![2, 5, 3, 1, 4]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = HistoryFilter {
            data_inicio: NaiveDate::from_ymd_opt(2025, 2, 2),
            data_fim: NaiveDate::from_ymd_opt(2025, 2, 2),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&pedidos())), vec![3]);
    }

    #[test]
    fn test_status_cliente_and_search() {
        let filter = HistoryFilter {
            status: Some(PedidoStatus::Saida),
            cliente_id: Some(ClienteId(1)),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&pedidos())), vec![5]);

        let filter = HistoryFilter {
            search: " bru ".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&pedidos())), vec![2, 4]);
    }

    #[test]
    fn test_to_query() {
        let filter = HistoryFilter {
            status: Some(PedidoStatus::Finalizado),
            ..Default::default()
        };
        let query = filter.to_query(0, 10);
        assert_eq!(query.page, Some(1));
        assert_eq!(query.status, Some(PedidoStatus::Finalizado));
        assert_eq!(query.cliente_id, None);
    }

    #[test]
    fn test_status_totals() {
        let totals = StatusTotals::from_pedidos(&pedidos());
        assert_eq!(totals.em_aberto, 2);
        assert_eq!(totals.finalizados, 2);
        assert_eq!(totals.cancelados, 1);
        assert_eq!(totals.valor_finalizado, Decimal::new(425, 1));
        assert_eq!(totals.divida_registrada, Decimal::from(5));
    }
}

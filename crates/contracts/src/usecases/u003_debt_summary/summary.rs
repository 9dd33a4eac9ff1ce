use crate::domain::a001_cliente::{Cliente, ClienteId};
use crate::domain::a004_pedido::{Pedido, PedidoStatus};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Debt recorded in settlements of one cliente
#[derive(Debug, Clone, PartialEq)]
pub struct DebtSummary {
    pub cliente_id: ClienteId,
    pub cliente_nome: String,
    pub total_divida: Decimal,
    pub total_pedidos: u32,
    pub ultimo_pedido: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtDashboard {
    /// Highest debt first
    pub summaries: Vec<DebtSummary>,
    pub total_divida: Decimal,
}

impl DebtDashboard {
    pub fn devedores(&self) -> usize {
        self.summaries.len()
    }

    pub fn media_por_cliente(&self) -> Decimal {
        if self.summaries.is_empty() {
            Decimal::ZERO
        } else {
            self.total_divida / Decimal::from(self.summaries.len())
        }
    }
}

/// Aggregate the `divida` of settled orders per cliente.
///
/// Orders of clientes missing from `clientes` are skipped, as are orders that
/// are not `finalizado`. Only clientes with positive debt are returned.
pub fn summarize_debts(clientes: &[Cliente], pedidos: &[Pedido]) -> DebtDashboard {
    let mut by_cliente: BTreeMap<ClienteId, DebtSummary> = clientes
        .iter()
        .map(|c| {
            (
                c.id,
                DebtSummary {
                    cliente_id: c.id,
                    cliente_nome: c.nome.clone(),
                    total_divida: Decimal::ZERO,
                    total_pedidos: 0,
                    ultimo_pedido: None,
                },
            )
        })
        .collect();

    for pedido in pedidos.iter().filter(|p| p.status == PedidoStatus::Finalizado) {
        let Some(entry) = by_cliente.get_mut(&pedido.cliente_id) else {
            continue;
        };
        entry.total_divida += pedido.divida.max(Decimal::ZERO);
        entry.total_pedidos += 1;
        if let Some(data) = pedido.data_operacao {
            if entry.ultimo_pedido.map_or(true, |u| data > u) {
                entry.ultimo_pedido = Some(data);
            }
        }
    }

    let mut summaries: Vec<DebtSummary> = by_cliente
        .into_values()
        .filter(|s| s.total_divida > Decimal::ZERO)
        .collect();
    summaries.sort_by(|a, b| {
        b.total_divida
            .cmp(&a.total_divida)
            .then_with(|| a.cliente_nome.cmp(&b.cliente_nome))
    });

    let total_divida = summaries.iter().map(|s| s.total_divida).sum();
    DebtDashboard {
        summaries,
        total_divida,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn clientes() -> Vec<Cliente> {
        serde_json::from_value(json!([
            {"id": 1, "nome": "Ana"},
            {"id": 2, "nome": "Bruno"},
            {"id": 3, "nome": "Carla"},
            {"id": 4, "nome": "Davi"}
        ]))
        .unwrap()
    }

    fn pedidos() -> Vec<Pedido> {
        serde_json::from_value(json!([
            {"id": 10, "cliente_id": 1, "status": "finalizado", "divida": 10.5, "data_operacao": "2025-01-10T08:00:00"},
            {"id": 11, "cliente_id": 1, "status": "finalizado", "divida": 4.5, "data_operacao": "2025-01-12T08:00:00"},
            {"id": 12, "cliente_id": 2, "status": "finalizado", "divida": 40, "data_operacao": "2025-01-11T08:00:00"},
            {"id": 13, "cliente_id": 2, "status": "saida", "divida": 99},
            {"id": 14, "cliente_id": 3, "status": "finalizado", "divida": 0},
            {"id": 15, "cliente_id": 4, "status": "finalizado", "divida": 15},
            {"id": 16, "cliente_id": 77, "status": "finalizado", "divida": 500}
        ]))
        .unwrap()
    }

    #[test]
    fn test_summarize_debts() {
        let dash = summarize_debts(&clientes(), &pedidos());
        let nomes: Vec<&str> = dash.summaries.iter().map(|s| s.cliente_nome.as_str()).collect();
        // Ana and Davi tie at 15; name breaks the tie
        assert_eq!(nomes, vec!["Bruno", "Ana", "Davi"]);
        assert_eq!(dash.total_divida, d("70"));
        assert_eq!(dash.devedores(), 3);

        let ana = &dash.summaries[1];
        assert_eq!(ana.total_pedidos, 2);
        assert_eq!(
            ana.ultimo_pedido.map(|d| d.format("%Y-%m-%d").to_string()),
            Some("2025-01-12".to_string())
        );
        assert_eq!(dash.summaries[0].total_pedidos, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let dash = summarize_debts(&[], &pedidos());
        assert!(dash.summaries.is_empty());
        assert_eq!(dash.total_divida, Decimal::ZERO);
        assert_eq!(dash.media_por_cliente(), Decimal::ZERO);
    }
}

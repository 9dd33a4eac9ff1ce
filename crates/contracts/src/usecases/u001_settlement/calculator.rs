//! Pure settlement arithmetic.
//!
//! `quantity_sold = issued - returned`, `line_total = sold × unit_price`,
//! `total_due = Σ line_total + debt_surcharge`. All values stay exact
//! decimals; the `*_display` accessors round to cents.

use crate::domain::a003_produto::{Produto, ProdutoId};
use crate::domain::a004_pedido::PedidoItem;
use crate::shared::numeric::{
    has_fraction, non_negative, normalize_quantity, parse_or_zero, round_currency,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Calculator input for one order line
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementItem {
    pub produto_id: ProdutoId,
    pub produto_nome: String,
    pub quantity_issued: Decimal,
    pub unit_price: Decimal,
    /// Não devolve: return forced to zero
    pub non_returnable: bool,
    /// Accepts fractional (kg) quantities
    pub weight_based: bool,
}

impl SettlementItem {
    /// Build from an order line, using the catalog entry when one is known.
    /// A fractional issued quantity always makes the line weight based.
    pub fn from_pedido_item(item: &PedidoItem, produto: Option<&Produto>) -> Self {
        let (non_returnable, weight_based) = match produto {
            Some(p) => (
                p.nao_devolve || item.nao_devolve,
                p.is_weight_based() || has_fraction(item.quantidade_saida),
            ),
            None => (item.nao_devolve, item.looks_weight_based()),
        };
        Self {
            produto_id: item.produto_id,
            produto_nome: item.nome(),
            quantity_issued: item.quantidade_saida,
            unit_price: item.preco_unitario,
            non_returnable,
            weight_based,
        }
    }

    /// Apply the return rules to an entered quantity: non-returnable lines
    /// give 0, negatives give 0, the precision follows the line kind and the
    /// result is clamped to `[0, quantity_issued]`.
    pub fn clamp_return(&self, entered: Decimal) -> Decimal {
        if self.non_returnable {
            return Decimal::ZERO;
        }
        normalize_quantity(entered, self.weight_based).min(self.issued())
    }

    fn issued(&self) -> Decimal {
        non_negative(self.quantity_issued)
    }
}

/// Entered return quantities keyed by product (absent means 0)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnEntries(BTreeMap<ProdutoId, Decimal>);

impl ReturnEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, produto_id: ProdutoId) -> Decimal {
        self.0.get(&produto_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, produto_id: ProdutoId, quantity: Decimal) {
        self.0.insert(produto_id, non_negative(quantity));
    }

    /// Parse raw form text (parse-or-zero) and store it.
    pub fn set_from_input(&mut self, produto_id: ProdutoId, input: &str) {
        self.set(produto_id, parse_or_zero(input));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ProdutoId, Decimal)> for ReturnEntries {
    fn from_iter<I: IntoIterator<Item = (ProdutoId, Decimal)>>(iter: I) -> Self {
        let mut entries = Self::new();
        for (id, q) in iter {
            entries.set(id, q);
        }
        entries
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettlementLine {
    pub produto_id: ProdutoId,
    pub produto_nome: String,
    pub quantity_issued: Decimal,
    pub quantity_returned: Decimal,
    pub quantity_sold: Decimal,
    pub unit_price: Decimal,
    /// Exact `quantity_sold × unit_price`
    pub line_total: Decimal,
    pub non_returnable: bool,
    pub weight_based: bool,
}

impl SettlementLine {
    pub fn line_total_display(&self) -> Decimal {
        round_currency(self.line_total)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settlement {
    pub lines: Vec<SettlementLine>,
    pub subtotal: Decimal,
    pub debt_surcharge: Decimal,
    pub total_due: Decimal,
}

impl Settlement {
    pub fn subtotal_display(&self) -> Decimal {
        round_currency(self.subtotal)
    }

    pub fn debt_surcharge_display(&self) -> Decimal {
        round_currency(self.debt_surcharge)
    }

    pub fn total_due_display(&self) -> Decimal {
        round_currency(self.total_due)
    }

    pub fn line(&self, produto_id: ProdutoId) -> Option<&SettlementLine> {
        self.lines.iter().find(|l| l.produto_id == produto_id)
    }
}

/// Compute the settlement of one order. Pure; never fails.
pub fn compute_settlement(
    items: &[SettlementItem],
    returns: &ReturnEntries,
    debt_surcharge: Decimal,
) -> Settlement {
    let lines: Vec<SettlementLine> = items
        .iter()
        .map(|item| {
            let issued = item.issued();
            let returned = item.clamp_return(returns.get(item.produto_id));
            let sold = issued - returned;
            let unit_price = non_negative(item.unit_price);
            SettlementLine {
                produto_id: item.produto_id,
                produto_nome: item.produto_nome.clone(),
                quantity_issued: issued,
                quantity_returned: returned,
                quantity_sold: sold,
                unit_price,
                line_total: sold * unit_price,
                non_returnable: item.non_returnable,
                weight_based: item.weight_based,
            }
        })
        .collect();

    let subtotal: Decimal = lines.iter().map(|l| l.line_total).sum();
    let debt_surcharge = non_negative(debt_surcharge);

    Settlement {
        lines,
        subtotal,
        debt_surcharge,
        total_due: subtotal + debt_surcharge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn unit(id: i64, issued: &str, price: &str) -> SettlementItem {
        SettlementItem {
            produto_id: ProdutoId(id),
            produto_nome: format!("P{}", id),
            quantity_issued: d(issued),
            unit_price: d(price),
            non_returnable: false,
            weight_based: false,
        }
    }

    #[test]
    fn test_clamp_return_rules() {
        let item = unit(1, "10", "2.50");
        assert_eq!(item.clamp_return(d("3")), d("3"));
        assert_eq!(item.clamp_return(d("15")), d("10"));
        assert_eq!(item.clamp_return(d("-2")), Decimal::ZERO);
        assert_eq!(item.clamp_return(d("3.9")), d("3"));

        let locked = SettlementItem {
            non_returnable: true,
            ..unit(2, "10", "1")
        };
        assert_eq!(locked.clamp_return(d("4")), Decimal::ZERO);

        let gelo = SettlementItem {
            weight_based: true,
            ..unit(3, "2.500", "3.00")
        };
        assert_eq!(gelo.clamp_return(d("0.7504")), d("0.750"));
        assert_eq!(gelo.clamp_return(d("9")), d("2.5"));
    }

    #[test]
    fn test_missing_entry_means_zero() {
        let s = compute_settlement(&[unit(1, "4", "1.25")], &ReturnEntries::new(), Decimal::ZERO);
        assert_eq!(s.lines[0].quantity_returned, Decimal::ZERO);
        assert_eq!(s.lines[0].quantity_sold, d("4"));
        assert_eq!(s.total_due_display().to_string(), "5.00");
    }

    #[test]
    fn test_negative_debt_is_ignored() {
        let s = compute_settlement(&[], &ReturnEntries::new(), d("-5"));
        assert_eq!(s.debt_surcharge, Decimal::ZERO);
        assert_eq!(s.total_due, Decimal::ZERO);
    }

    #[test]
    fn test_entries_from_input() {
        let mut entries = ReturnEntries::new();
        entries.set_from_input(ProdutoId(1), "2,5");
        entries.set_from_input(ProdutoId(2), "lixo");
        entries.set_from_input(ProdutoId(3), "-1");
        assert_eq!(entries.get(ProdutoId(1)), d("2.5"));
        assert_eq!(entries.get(ProdutoId(2)), Decimal::ZERO);
        assert_eq!(entries.get(ProdutoId(3)), Decimal::ZERO);
        assert_eq!(entries.get(ProdutoId(99)), Decimal::ZERO);
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_from_pedido_item_prefers_catalog() {
        let item: PedidoItem = serde_json::from_str(
            r#"{"produto_id": 9, "produto_nome": "Gelo", "quantidade_saida": 2, "preco_unitario": 3}"#,
        )
        .unwrap();
        let without = SettlementItem::from_pedido_item(&item, None);
        assert!(!without.weight_based);
        assert!(!without.non_returnable);

        let produto: Produto = serde_json::from_str(
            r#"{"id": 9, "nome": "Gelo", "preco": 3, "peso": 1.5, "nao_devolve": true}"#,
        )
        .unwrap();
        let with = SettlementItem::from_pedido_item(&item, Some(&produto));
        assert!(with.weight_based);
        assert!(with.non_returnable);
        assert_eq!(with.produto_nome, "Gelo");
    }

    #[test]
    fn test_fractional_issue_settles_the_same_with_or_without_catalog() {
        let item: PedidoItem = serde_json::from_str(
            r#"{"produto_id": 4, "produto_nome": "Sorvete 2L", "quantidade_saida": 2.5, "preco_unitario": 4}"#,
        )
        .unwrap();
        let produto: Produto =
            serde_json::from_str(r#"{"id": 4, "nome": "Sorvete 2L", "preco": 4}"#).unwrap();
        assert!(!produto.is_weight_based());

        let mut returns = ReturnEntries::new();
        returns.set(ProdutoId(4), d("2.5"));

        let without = SettlementItem::from_pedido_item(&item, None);
        let with = SettlementItem::from_pedido_item(&item, Some(&produto));
        assert!(with.weight_based);
        assert_eq!(with.clamp_return(d("2.5")), d("2.5"));

        let a = compute_settlement(&[without], &returns, Decimal::ZERO);
        let b = compute_settlement(&[with], &returns, Decimal::ZERO);
        assert_eq!(b.lines[0].quantity_returned, d("2.5"));
        assert_eq!(b.lines[0].quantity_sold, Decimal::ZERO);
        assert_eq!(b.total_due, Decimal::ZERO);
        assert_eq!(a.lines[0].quantity_returned, b.lines[0].quantity_returned);
        assert_eq!(a.total_due, b.total_due);
    }
}

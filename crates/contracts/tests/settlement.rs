use contracts::domain::a003_produto::ProdutoId;
use contracts::usecases::u001_settlement::{
    compute_settlement, ReturnEntries, SettlementAction, SettlementItem, SettlementState,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn item(id: i64, issued: &str, price: &str) -> SettlementItem {
    SettlementItem {
        produto_id: ProdutoId(id),
        produto_nome: format!("Produto {}", id),
        quantity_issued: d(issued),
        unit_price: d(price),
        non_returnable: false,
        weight_based: false,
    }
}

fn returns(entries: &[(i64, &str)]) -> ReturnEntries {
    entries
        .iter()
        .map(|(id, q)| (ProdutoId(*id), d(q)))
        .collect()
}

#[test]
fn partial_return_of_unit_item() {
    let s = compute_settlement(&[item(1, "10", "2.50")], &returns(&[(1, "3")]), Decimal::ZERO);
    let line = &s.lines[0];
    assert_eq!(line.quantity_sold, d("7"));
    assert_eq!(line.line_total_display().to_string(), "17.50");
}

#[test]
fn over_entry_is_clamped_to_issued() {
    let s = compute_settlement(&[item(1, "10", "2.50")], &returns(&[(1, "15")]), Decimal::ZERO);
    let line = &s.lines[0];
    assert_eq!(line.quantity_returned, d("10"));
    assert_eq!(line.quantity_sold, Decimal::ZERO);
    assert_eq!(line.line_total_display().to_string(), "0.00");
}

#[test]
fn two_items_with_debt_surcharge() {
    let items = [item(1, "10", "2.50"), item(2, "5", "4.00")];
    let s = compute_settlement(&items, &returns(&[(1, "3"), (2, "0")]), d("20"));
    // 17.50 + 20.00
    assert_eq!(s.subtotal_display().to_string(), "37.50");
    assert_eq!(s.debt_surcharge_display().to_string(), "20.00");
    assert_eq!(s.total_due_display().to_string(), "57.50");
}

#[test]
fn weight_based_item_keeps_fraction() {
    let gelo = SettlementItem {
        weight_based: true,
        ..item(1, "2.500", "3.00")
    };
    let s = compute_settlement(&[gelo], &returns(&[(1, "0.750")]), Decimal::ZERO);
    let line = &s.lines[0];
    assert_eq!(line.quantity_returned, d("0.75"));
    assert_eq!(line.quantity_sold, d("1.750"));
    assert_eq!(line.line_total_display().to_string(), "5.25");
}

#[test]
fn empty_order() {
    let s = compute_settlement(&[], &ReturnEntries::new(), Decimal::ZERO);
    assert!(s.lines.is_empty());
    assert_eq!(s.subtotal, Decimal::ZERO);
    assert_eq!(s.total_due, Decimal::ZERO);

    let with_debt = compute_settlement(&[], &ReturnEntries::new(), d("12.40"));
    assert_eq!(with_debt.total_due, d("12.40"));
}

#[test]
fn full_precision_until_final_rounding() {
    // Rounding each 1.005 line first would give 3 × 1.01 = 3.03
    let items: Vec<SettlementItem> = (1..=3).map(|id| item(id, "3", "0.335")).collect();
    let s = compute_settlement(&items, &ReturnEntries::new(), Decimal::ZERO);
    assert_eq!(s.lines[0].line_total_display().to_string(), "1.01");
    assert_eq!(s.subtotal, d("3.015"));
    assert_eq!(s.total_due_display().to_string(), "3.02");
}

fn property_grid() -> Vec<(SettlementItem, Decimal)> {
    let issued = ["0", "1", "2.5", "10", "7.125"];
    let prices = ["0", "0.99", "2.50", "13.333"];
    let entered = ["-3", "0", "1", "2.4999", "10", "99"];
    let mut grid = Vec::new();
    let mut id = 0;
    for q in issued {
        for p in prices {
            for r in entered {
                for (non_returnable, weight_based) in
                    [(false, false), (false, true), (true, false), (true, true)]
                {
                    id += 1;
                    grid.push((
                        SettlementItem {
                            non_returnable,
                            weight_based,
                            ..item(id, q, p)
                        },
                        d(r),
                    ));
                }
            }
        }
    }
    grid
}

#[test]
fn sold_stays_within_issued() {
    for (it, entered) in property_grid() {
        let mut entries = ReturnEntries::new();
        entries.set(it.produto_id, entered);
        let s = compute_settlement(std::slice::from_ref(&it), &entries, Decimal::ZERO);
        let line = &s.lines[0];
        assert!(line.quantity_sold >= Decimal::ZERO, "{:?}", it);
        assert!(line.quantity_sold <= it.quantity_issued, "{:?}", it);
        assert_eq!(line.line_total, line.quantity_sold * line.unit_price);
    }
}

#[test]
fn clamp_and_non_returnable_laws() {
    for (it, entered) in property_grid() {
        let returned = it.clamp_return(entered);
        if it.non_returnable {
            assert_eq!(returned, Decimal::ZERO);
        } else if entered > it.quantity_issued {
            assert_eq!(returned, it.quantity_issued);
        }
        assert!(returned >= Decimal::ZERO);
    }
}

#[test]
fn totals_are_sums_and_computation_is_idempotent() {
    let grid = property_grid();
    let items: Vec<SettlementItem> = grid.iter().map(|(it, _)| it.clone()).collect();
    let entries: ReturnEntries = grid.iter().map(|(it, r)| (it.produto_id, *r)).collect();
    let debt = d("31.07");

    let first = compute_settlement(&items, &entries, debt);
    let second = compute_settlement(&items, &entries, debt);
    assert_eq!(first, second);

    let sum: Decimal = first.lines.iter().map(|l| l.line_total).sum();
    assert_eq!(first.subtotal, sum);
    assert_eq!(first.total_due, first.subtotal + debt);
}

#[test]
fn reducer_matches_calculator() {
    let items = vec![item(1, "10", "2.50"), item(2, "5", "4.00")];
    let state = SettlementState::new()
        .reduce(SettlementAction::Load {
            pedido_id: contracts::domain::a004_pedido::PedidoId(3),
            items: items.clone(),
        })
        .reduce(SettlementAction::SetReturn {
            produto_id: ProdutoId(1),
            input: "3".into(),
        })
        .reduce(SettlementAction::SetReturn {
            produto_id: ProdutoId(2),
            input: "abc".into(),
        })
        .reduce(SettlementAction::SetDebt("20".into()));

    let direct = compute_settlement(&items, &returns(&[(1, "3")]), d("20"));
    assert_eq!(state.summary(), direct);
    assert_eq!(state.summary().total_due_display().to_string(), "57.50");
}

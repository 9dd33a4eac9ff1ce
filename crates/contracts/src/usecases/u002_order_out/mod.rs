pub mod cart;

pub use cart::{CartLine, OrderOutCart};

use crate::usecases::common::UseCaseMetadata;

pub struct IssueOrder;

impl UseCaseMetadata for IssueOrder {
    fn usecase_index() -> &'static str {
        "u002"
    }

    fn usecase_name() -> &'static str {
        "order_out"
    }

    fn display_name() -> &'static str {
        "Saída de produtos"
    }

    fn description() -> &'static str {
        "Monte o carrinho de produtos entregues a um cliente e registre a saída"
    }
}

pub mod filter;

pub use filter::{HistoryFilter, StatusTotals};

use crate::usecases::common::UseCaseMetadata;

pub struct OrderHistory;

impl UseCaseMetadata for OrderHistory {
    fn usecase_index() -> &'static str {
        "u004"
    }

    fn usecase_name() -> &'static str {
        "history"
    }

    fn display_name() -> &'static str {
        "Histórico de Pedidos"
    }
}

//! Return settlement (retorno): what a seller owes after bringing stock back.

pub mod calculator;
pub mod state;

pub use calculator::{
    compute_settlement, ReturnEntries, Settlement, SettlementItem, SettlementLine,
};
pub use state::{ItemsRequest, OpenOrders, SettlementAction, SettlementState};

use crate::usecases::common::UseCaseMetadata;

pub struct RecordReturn;

impl UseCaseMetadata for RecordReturn {
    fn usecase_index() -> &'static str {
        "u001"
    }

    fn usecase_name() -> &'static str {
        "settlement"
    }

    fn display_name() -> &'static str {
        "Retorno / Cálculo"
    }

    fn description() -> &'static str {
        "Registre o retorno de produtos e calcule o valor final devido pelo cliente"
    }
}

pub mod summary;

pub use summary::{summarize_debts, DebtDashboard, DebtSummary};

use crate::usecases::common::UseCaseMetadata;

pub struct DebtOverview;

impl UseCaseMetadata for DebtOverview {
    fn usecase_index() -> &'static str {
        "u003"
    }

    fn usecase_name() -> &'static str {
        "debt_summary"
    }

    fn display_name() -> &'static str {
        "Dashboard de Dívida"
    }

    fn description() -> &'static str {
        "Dívida registrada nos retornos, agrupada por cliente"
    }
}

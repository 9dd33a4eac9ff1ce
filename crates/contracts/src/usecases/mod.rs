pub mod common;
pub mod u001_settlement;
pub mod u002_order_out;
pub mod u003_debt_summary;
pub mod u004_history;

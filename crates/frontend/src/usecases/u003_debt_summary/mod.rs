pub mod view;

pub use view::DebtSummaryView;

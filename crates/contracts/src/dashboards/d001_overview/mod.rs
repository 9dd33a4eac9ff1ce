pub mod dto;

pub use dto::{DashboardMetrics, ProdutoMaisVendido, VendaDiaria};

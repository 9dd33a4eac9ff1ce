pub mod aggregate;

pub use aggregate::{Produto, ProdutoId};

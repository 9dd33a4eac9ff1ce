pub mod aggregate;

pub use aggregate::{Cliente, ClienteId, ClienteStatus, DividaPendente, DividaRegistro};

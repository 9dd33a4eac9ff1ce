//! Pedido: one consignment trip (saída → retorno)

pub mod aggregate;
pub mod dto;
pub mod status;

pub use aggregate::{Pedido, PedidoId, PedidoItem};
pub use dto::{
    PedidoItensPayload, PedidoItensResponse, PedidoListQuery, RetornoItem, RetornoRequest,
    RetornoResponse, SaidaItem, SaidaRequest, SaidaResponse,
};
pub use status::PedidoStatus;

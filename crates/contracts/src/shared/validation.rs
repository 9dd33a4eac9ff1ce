use thiserror::Error;

/// Client-side validation failures, raised before anything is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Selecione um cliente para finalizar o pedido.")]
    MissingCliente,
    #[error("O carrinho está vazio.")]
    EmptyCart,
    #[error("Selecione um pedido em aberto.")]
    MissingPedido,
    #[error("O pedido não possui itens para retorno.")]
    NoItems,
    #[error("O pedido #{0} não está aguardando retorno.")]
    PedidoNotOpen(i64),
    #[error("Informe {0}.")]
    Required(&'static str),
}

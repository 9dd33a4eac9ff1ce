pub mod a001_cliente;
pub mod a002_categoria;
pub mod a003_produto;
pub mod a004_pedido;

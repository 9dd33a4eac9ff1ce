//! Order-out cart: products handed to a cliente before a trip.

use crate::domain::a001_cliente::ClienteId;
use crate::domain::a003_produto::{Produto, ProdutoId};
use crate::domain::a004_pedido::{SaidaItem, SaidaRequest};
use crate::shared::numeric::{normalize_quantity, parse_or_zero};
use crate::shared::validation::ValidationError;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub produto_id: ProdutoId,
    pub produto_nome: String,
    pub preco_unitario: Decimal,
    pub quantidade: Decimal,
    pub weight_based: bool,
    /// Stock known when the product was added
    pub estoque: Decimal,
}

impl CartLine {
    pub fn valor_total(&self) -> Decimal {
        self.quantidade * self.preco_unitario
    }

    /// The server rejects issues above stock; the page warns first.
    pub fn exceeds_stock(&self) -> bool {
        self.quantidade > self.estoque
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderOutCart {
    pub cliente_id: Option<ClienteId>,
    pub lines: Vec<CartLine>,
    pub observacoes: String,
}

impl OrderOutCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_cliente(&mut self, cliente_id: Option<ClienteId>) {
        self.cliente_id = cliente_id;
    }

    /// Add `quantidade` of a product, merging with an existing line.
    /// Quantities that normalise to zero are ignored.
    pub fn add_item(&mut self, produto: &Produto, quantidade: Decimal) {
        let weight_based = produto.is_weight_based();
        let quantidade = normalize_quantity(quantidade, weight_based);
        if quantidade <= Decimal::ZERO {
            return;
        }

        match self.lines.iter_mut().find(|l| l.produto_id == produto.id) {
            Some(line) => line.quantidade += quantidade,
            None => self.lines.push(CartLine {
                produto_id: produto.id,
                produto_nome: produto.nome.clone(),
                preco_unitario: produto.preco,
                quantidade,
                weight_based,
                estoque: produto.estoque,
            }),
        }
    }

    pub fn add_item_from_input(&mut self, produto: &Produto, input: &str) {
        self.add_item(produto, parse_or_zero(input));
    }

    /// Replace a line's quantity; zero or less removes the line.
    pub fn update_quantity(&mut self, produto_id: ProdutoId, quantidade: Decimal) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.produto_id == produto_id) {
            line.quantidade = normalize_quantity(quantidade, line.weight_based);
        }
        self.lines.retain(|l| l.quantidade > Decimal::ZERO);
    }

    pub fn remove(&mut self, produto_id: ProdutoId) {
        self.lines.retain(|l| l.produto_id != produto_id);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::valor_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn validate(&self) -> Result<ClienteId, ValidationError> {
        let cliente_id = self.cliente_id.ok_or(ValidationError::MissingCliente)?;
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        Ok(cliente_id)
    }

    /// Body for `POST /api/pedidos/saida`.
    pub fn to_request(&self) -> Result<SaidaRequest, ValidationError> {
        let cliente_id = self.validate()?;
        let observacoes = Some(self.observacoes.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(SaidaRequest {
            cliente_id,
            itens: self
                .lines
                .iter()
                .map(|l| SaidaItem {
                    produto_id: l.produto_id,
                    quantidade_saida: l.quantidade,
                })
                .collect(),
            observacoes,
        })
    }
}

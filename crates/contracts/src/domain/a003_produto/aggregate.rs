use crate::domain::a002_categoria::CategoriaId;
use crate::domain::common::AggregateRoot;
use crate::shared::decode::{DecodeError, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(
    /// ID produto do catálogo
    ProdutoId
);

/// Produto do catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Produto {
    pub id: ProdutoId,
    pub nome: String,
    pub preco: Decimal,
    #[serde(default)]
    pub estoque: Decimal,
    #[serde(default)]
    pub categoria_id: Option<CategoriaId>,
    #[serde(default)]
    pub categoria_nome: Option<String>,
    #[serde(default)]
    pub imagem_url: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub estoque_minimo: Decimal,
    /// Produto que não volta (ex: gelo seco); retorno sempre 0
    #[serde(default)]
    pub nao_devolve: bool,
    /// Peso unitário em kg; > 0 marks a weight-based product
    #[serde(default)]
    pub peso: Decimal,
}

fn default_active() -> bool {
    true
}

impl Produto {
    pub fn is_estoque_baixo(&self) -> bool {
        self.estoque <= self.estoque_minimo
    }

    /// Weight-based products accept fractional quantities.
    pub fn is_weight_based(&self) -> bool {
        self.peso > Decimal::ZERO || is_dry_ice_name(&self.nome)
    }
}

/// Dry ice is sold by weight even when the catalog has no `peso` set.
pub fn is_dry_ice_name(nome: &str) -> bool {
    let lower = nome.to_lowercase();
    lower.contains("gelo") && lower.contains("seco")
}

impl Validate for Produto {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.preco < Decimal::ZERO {
            return Err(DecodeError::invalid("preco", "negativo"));
        }
        if self.peso < Decimal::ZERO {
            return Err(DecodeError::invalid("peso", "negativo"));
        }
        Ok(())
    }
}

impl AggregateRoot for Produto {
    type Id = ProdutoId;

    fn collection_name() -> &'static str {
        "produtos"
    }

    fn element_name() -> &'static str {
        "Produto"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::decode::decode_json;

    #[test]
    fn test_weight_and_stock_flags() {
        let gelo: Produto = decode_json(
            r#"{"id": 9, "nome": "Gelo Seco", "preco": 3.0, "estoque": 40,
                "estoque_minimo": 10, "nao_devolve": true, "peso": 0}"#,
        )
        .unwrap();
        assert!(gelo.is_weight_based());
        assert!(gelo.nao_devolve);
        assert!(!gelo.is_estoque_baixo());

        let picole: Produto = decode_json(
            r#"{"id": 1, "nome": "Picolé Limão", "preco": 2.5, "estoque": 5, "estoque_minimo": 10}"#,
        )
        .unwrap();
        assert!(!picole.is_weight_based());
        assert!(picole.is_estoque_baixo());
    }

    #[test]
    fn test_peso_marks_weight_based() {
        let p: Produto =
            decode_json(r#"{"id": 2, "nome": "Gelo em barra", "preco": 1.0, "peso": 1.5}"#).unwrap();
        assert!(p.is_weight_based());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = decode_json::<Produto>(r#"{"id": 2, "nome": "X", "preco": -1}"#).unwrap_err();
        assert_eq!(err, DecodeError::invalid("preco", "negativo"));
    }
}

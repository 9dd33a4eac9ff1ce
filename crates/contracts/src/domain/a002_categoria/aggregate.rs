use crate::domain::common::AggregateRoot;
use crate::shared::decode::Validate;
use serde::{Deserialize, Serialize};

crate::aggregate_id!(CategoriaId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Categoria {
    pub id: CategoriaId,
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Validate for Categoria {}

impl AggregateRoot for Categoria {
    type Id = CategoriaId;

    fn collection_name() -> &'static str {
        "categorias"
    }

    fn element_name() -> &'static str {
        "Categoria"
    }
}

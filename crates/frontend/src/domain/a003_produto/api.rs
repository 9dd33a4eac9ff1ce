use crate::shared::api_client::{ApiClient, ApiError};
use contracts::domain::a002_categoria::CategoriaId;
use contracts::domain::a003_produto::Produto;
use contracts::domain::common::AggregateRoot;
use contracts::shared::{ListPayload, PaginatedResponse};
use serde::Serialize;

/// Query of `GET /api/produtos`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProdutoListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<CategoriaId>,
}

pub async fn list(
    client: &ApiClient,
    query: &ProdutoListQuery,
) -> Result<PaginatedResponse<Produto>, ApiError> {
    let payload: ListPayload<Produto> = client
        .get_query(&Produto::collection_path(), query)
        .await?;
    Ok(payload.into_paginated())
}

/// Whole catalog in one page, for order screens
pub async fn list_all(client: &ApiClient) -> Result<Vec<Produto>, ApiError> {
    let query = ProdutoListQuery {
        per_page: Some(1000),
        ..Default::default()
    };
    Ok(list(client, &query).await?.items)
}

pub async fn estoque_baixo(client: &ApiClient) -> Result<Vec<Produto>, ApiError> {
    let payload: ListPayload<Produto> = client
        .get_json(&format!("{}/estoque-baixo", Produto::collection_path()))
        .await?;
    Ok(payload.into_items())
}

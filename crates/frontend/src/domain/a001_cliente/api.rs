use crate::shared::api_client::{ApiClient, ApiError};
use contracts::domain::a001_cliente::{Cliente, ClienteId, ClienteStatus, DividaPendente};
use contracts::domain::common::AggregateRoot;
use contracts::shared::{ListPayload, PaginatedResponse};
use serde::Serialize;

/// Query of `GET /api/clientes`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClienteListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClienteStatus>,
}

pub async fn list(
    client: &ApiClient,
    query: &ClienteListQuery,
) -> Result<PaginatedResponse<Cliente>, ApiError> {
    let payload: ListPayload<Cliente> = client
        .get_query(&Cliente::collection_path(), query)
        .await?;
    Ok(payload.into_paginated())
}

/// Active clientes for selects
pub async fn list_active(client: &ApiClient) -> Result<Vec<Cliente>, ApiError> {
    let payload: ListPayload<Cliente> = client
        .get_json(&format!("{}/ativos", Cliente::collection_path()))
        .await?;
    Ok(payload.into_items())
}

pub async fn divida_pendente(client: &ApiClient, id: ClienteId) -> Result<DividaPendente, ApiError> {
    client
        .get_json(&format!("{}/divida-pendente", Cliente::item_path(id)))
        .await
}

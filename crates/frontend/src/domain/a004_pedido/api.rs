use crate::shared::api_client::{ApiClient, ApiError};
use contracts::domain::a004_pedido::{
    Pedido, PedidoId, PedidoItem, PedidoItensPayload, PedidoListQuery, RetornoRequest,
    RetornoResponse, SaidaRequest, SaidaResponse,
};
use contracts::domain::common::AggregateRoot;
use contracts::shared::{ListPayload, PaginatedResponse};

pub async fn list(
    client: &ApiClient,
    query: &PedidoListQuery,
) -> Result<PaginatedResponse<Pedido>, ApiError> {
    let payload: ListPayload<Pedido> = client
        .get_query(&Pedido::collection_path(), query)
        .await?;
    Ok(payload.into_paginated())
}

/// `GET /api/pedidos?status=saida`
pub async fn list_open(client: &ApiClient) -> Result<Vec<Pedido>, ApiError> {
    let query = PedidoListQuery {
        per_page: Some(1000),
        ..PedidoListQuery::open_orders()
    };
    Ok(list(client, &query).await?.items)
}

pub async fn get(client: &ApiClient, id: PedidoId) -> Result<Pedido, ApiError> {
    client.get_json(&Pedido::item_path(id)).await
}

pub async fn itens(client: &ApiClient, id: PedidoId) -> Result<Vec<PedidoItem>, ApiError> {
    let payload: PedidoItensPayload = client
        .get_json(&format!("{}/itens", Pedido::item_path(id)))
        .await?;
    Ok(payload.into_items())
}

pub async fn registrar_saida(
    client: &ApiClient,
    request: &SaidaRequest,
) -> Result<SaidaResponse, ApiError> {
    client
        .post_json(&format!("{}/saida", Pedido::collection_path()), request)
        .await
}

pub async fn registrar_retorno(
    client: &ApiClient,
    id: PedidoId,
    request: &RetornoRequest,
) -> Result<RetornoResponse, ApiError> {
    client
        .post_json(&format!("{}/retorno", Pedido::item_path(id)), request)
        .await
}

/// Order-out receipt (PDF)
pub async fn imprimir_saida(client: &ApiClient, id: PedidoId) -> Result<Vec<u8>, ApiError> {
    client
        .get_bytes(&format!("{}/imprimir", Pedido::item_path(id)))
        .await
}

/// Settlement receipt (PDF)
pub async fn imprimir_retorno(client: &ApiClient, id: PedidoId) -> Result<Vec<u8>, ApiError> {
    client
        .get_bytes(&format!("{}/imprimir_retorno", Pedido::item_path(id)))
        .await
}

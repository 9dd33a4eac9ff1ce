use crate::shared::api_client::{ApiClient, ApiError};
use contracts::domain::a002_categoria::Categoria;
use contracts::domain::common::AggregateRoot;
use contracts::shared::ListPayload;

pub async fn list_active(client: &ApiClient) -> Result<Vec<Categoria>, ApiError> {
    let payload: ListPayload<Categoria> = client
        .get_json(&format!("{}/ativas", Categoria::collection_path()))
        .await?;
    Ok(payload.into_items())
}

use crate::shared::api_client::{ApiClient, ApiError};
use contracts::dashboards::d001_overview::DashboardMetrics;

/// `GET /api/relatorios/dashboard`
pub async fn get_metrics(client: &ApiClient) -> Result<DashboardMetrics, ApiError> {
    client.get_json("/relatorios/dashboard").await
}

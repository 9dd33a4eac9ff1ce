use crate::shared::api_client::{ApiClient, ApiError};
use contracts::system::auth::{
    LoginRequest, LoginResponse, ProfileResponse, RefreshResponse, UserInfo,
};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    ApiClient::anonymous()
        .post_json("/auth/login", &request)
        .await
}

/// New access token; `client` must carry the refresh token
pub async fn refresh(client: &ApiClient) -> Result<RefreshResponse, ApiError> {
    client.post_empty("/auth/refresh").await
}

/// Current user
pub async fn profile(client: &ApiClient) -> Result<UserInfo, ApiError> {
    client
        .get_json::<ProfileResponse>("/auth/profile")
        .await
        .map(|r| r.user)
}

pub async fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client
        .post_empty::<serde_json::Value>("/auth/logout")
        .await
        .map(|_| ())
}

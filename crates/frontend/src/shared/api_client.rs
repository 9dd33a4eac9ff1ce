//! HTTP client for the Licimar REST backend.
//!
//! Wraps `gloo_net` requests: attaches the bearer token, decodes JSON bodies
//! through the validating [`decode_json`] step and turns non-2xx responses
//! into [`ApiError`] carrying the server's own message.

use super::api_utils::api_url;
use contracts::shared::decode::{decode_json, DecodeError, Validate};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Falha de conexão com o servidor: {0}")]
    Network(String),
    /// 401; carries the server message when there is one
    #[error("{0}")]
    Unauthorized(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Falha ao montar a requisição: {0}")]
    Serialize(String),
    #[error("Janela do navegador indisponível")]
    NoWindow,
}

impl ApiError {
    /// Text shown to the user in alerts.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(status, body);
        if status == 401 {
            Self::Unauthorized(message)
        } else {
            Self::Http { status, message }
        }
    }
}

/// Pick the message out of an error body: `message`, `erro` or `error`,
/// first one present. Falls back to `Erro {status}`.
pub fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "erro", "error"].iter().find_map(|key| {
                value
                    .get(*key)
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| format!("Erro {}", status))
}

/// Request helper bound to the current access token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiClient {
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    pub async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
    {
        let url = api_url(path);
        log::debug!("GET {}", url);
        let response = self
            .authorize(Request::get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| network_error("GET", &url, e))?;
        read_json(&url, response).await
    }

    /// GET with the query string built from `query` (None fields skipped).
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
        Q: Serialize,
    {
        let qs = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
        if qs.is_empty() {
            self.get_json(path).await
        } else {
            self.get_json(&format!("{}?{}", path, qs)).await
        }
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned + Validate,
    {
        let url = api_url(path);
        log::debug!("POST {}", url);
        let request = self
            .authorize(Request::post(&url))
            .header("Accept", "application/json")
            .json(body)
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| network_error("POST", &url, e))?;
        read_json(&url, response).await
    }

    /// POST without a body, e.g. refresh and logout.
    pub async fn post_empty<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Validate,
    {
        let url = api_url(path);
        log::debug!("POST {}", url);
        let response = self
            .authorize(Request::post(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| network_error("POST", &url, e))?;
        read_json(&url, response).await
    }

    /// Binary body (PDF receipts).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let url = api_url(path);
        log::debug!("GET {} (binary)", url);
        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(|e| network_error("GET", &url, e))?;
        if !response.ok() {
            return Err(read_error(&url, response).await);
        }
        response
            .binary()
            .await
            .map_err(|e| network_error("GET", &url, e))
    }
}

fn network_error(method: &str, url: &str, e: gloo_net::Error) -> ApiError {
    log::error!("{} {} failed: {}", method, url, e);
    ApiError::Network(e.to_string())
}

async fn read_error(url: &str, response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status, &body);
    log::warn!("{} -> {}: {}", url, status, err);
    err
}

async fn read_json<T>(url: &str, response: Response) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    if !response.ok() {
        return Err(read_error(url, response).await);
    }
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode_json::<T>(&body).map_err(|e| {
        log::error!("{}: unexpected response: {}", url, e);
        ApiError::Decode(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(400, r#"{"message": "Quantidade de retorno inválida"}"#),
            "Quantidade de retorno inválida"
        );
        assert_eq!(
            extract_error_message(409, r#"{"erro": "Pedido já finalizado"}"#),
            "Pedido já finalizado"
        );
        assert_eq!(
            extract_error_message(500, r#"{"error": "boom", "message": ""}"#),
            "boom"
        );
        assert_eq!(extract_error_message(502, "<html>Bad gateway</html>"), "Erro 502");
        assert_eq!(extract_error_message(404, r#"{"message": 12}"#), "Erro 404");
    }

    #[test]
    fn test_from_status() {
        let err = ApiError::from_status(401, r#"{"message": "Token expirado"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Token expirado");

        let err = ApiError::from_status(422, "");
        assert_eq!(
            err,
            ApiError::Http {
                status: 422,
                message: "Erro 422".into()
            }
        );
        assert_eq!(err.user_message(), "Erro 422");
    }

    #[test]
    fn test_decode_error_is_user_visible() {
        let err: ApiError = DecodeError::invalid("itens.[0].quantidade_saida", "negativa").into();
        assert!(err.user_message().contains("quantidade_saida"));
    }
}

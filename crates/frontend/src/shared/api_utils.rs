//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::{config, ApiConfig};

/// Get the base URL for API requests, prefix included.
///
/// Uses `[api] base_url` when set; otherwise the backend is assumed on the
/// page's host at `[api] port`.
///
/// # Returns
/// - API base URL like "http://localhost:5000/api"
/// - Just the prefix if window is not available
pub fn api_base() -> String {
    let api = &config().api;
    if !api.base_url.trim().is_empty() {
        return join_base(api.base_url.trim(), &api.prefix);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return normalize_prefix(&api.prefix),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    origin_base(api, &protocol, &hostname)
}

/// Build a full API URL from a path relative to the prefix
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/pedidos/12/itens");
/// ```
pub fn api_url(path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    format!("{}{}", api_base(), path)
}

fn origin_base(api: &ApiConfig, protocol: &str, hostname: &str) -> String {
    join_base(
        &format!("{}//{}:{}", protocol, hostname, api.port),
        &api.prefix,
    )
}

fn join_base(origin: &str, prefix: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), normalize_prefix(prefix))
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

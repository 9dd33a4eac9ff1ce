use super::session::TokenStore;
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Tokens in the browser's localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

impl TokenStore for LocalStorageTokenStore {
    fn access_token(&self) -> Option<String> {
        get_local_storage()?.get_item(ACCESS_TOKEN_KEY).ok()?
    }

    fn refresh_token(&self) -> Option<String> {
        get_local_storage()?.get_item(REFRESH_TOKEN_KEY).ok()?
    }

    fn save_access_token(&self, token: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
        }
    }

    fn save_refresh_token(&self, token: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(REFRESH_TOKEN_KEY, token);
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
            let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        }
    }
}

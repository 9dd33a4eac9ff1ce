//! Session object: tokens plus the signed-in user.
//!
//! Init reads persisted tokens ([`Session::hydrate`]); teardown clears them
//! ([`Session::teardown`]). Persistence goes through [`TokenStore`] so the
//! lifecycle is testable without a browser.

use crate::shared::api_client::ApiClient;
use contracts::system::auth::{LoginResponse, RefreshResponse, UserInfo};
use std::cell::RefCell;

pub trait TokenStore {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn save_access_token(&self, token: &str);
    fn save_refresh_token(&self, token: &str);
    fn clear(&self);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserInfo>,
}

impl Session {
    /// Restore from storage. The user is unknown until the profile is fetched.
    pub fn hydrate(store: &impl TokenStore) -> Self {
        Self {
            access_token: non_empty(store.access_token()),
            refresh_token: non_empty(store.refresh_token()),
            user: None,
        }
    }

    pub fn establish(store: &impl TokenStore, response: LoginResponse) -> Self {
        store.save_access_token(&response.access_token);
        store.save_refresh_token(&response.refresh_token);
        Self {
            access_token: Some(response.access_token),
            refresh_token: Some(response.refresh_token),
            user: Some(response.user),
        }
    }

    /// New access token from `/auth/refresh`; the refresh token is kept.
    pub fn refreshed(self, store: &impl TokenStore, response: RefreshResponse) -> Self {
        store.save_access_token(&response.access_token);
        Self {
            access_token: Some(response.access_token),
            user: response.user.or(self.user),
            ..self
        }
    }

    pub fn with_user(self, user: UserInfo) -> Self {
        Self {
            user: Some(user),
            ..self
        }
    }

    pub fn teardown(store: &impl TokenStore) -> Self {
        store.clear();
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(UserInfo::is_admin).unwrap_or(false)
    }

    pub fn username(&self) -> String {
        self.user
            .as_ref()
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "Convidado".to_string())
    }

    /// Client carrying the access token.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.access_token.clone())
    }

    /// Client carrying the refresh token, as `/auth/refresh` expects.
    pub fn refresh_client(&self) -> Option<ApiClient> {
        self.refresh_token
            .as_ref()
            .map(|t| ApiClient::new(Some(t.clone())))
    }
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

/// In-memory store for tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    access: RefCell<Option<String>>,
    refresh: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        Self {
            access: RefCell::new(Some(access.to_string())),
            refresh: RefCell::new(Some(refresh.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.access.borrow().clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.refresh.borrow().clone()
    }

    fn save_access_token(&self, token: &str) {
        *self.access.borrow_mut() = Some(token.to_string());
    }

    fn save_refresh_token(&self, token: &str) {
        *self.refresh.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.access.borrow_mut() = None;
        *self.refresh.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::UserRole;

    fn user(role: UserRole) -> UserInfo {
        UserInfo {
            id: 1,
            username: "maria".into(),
            email: None,
            role,
            active: true,
        }
    }

    #[test]
    fn test_hydrate_reads_persisted_tokens() {
        let store = MemoryTokenStore::with_tokens("a1", "r1");
        let session = Session::hydrate(&store);
        assert_eq!(session.access_token.as_deref(), Some("a1"));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert!(session.user.is_none());
        assert!(session.is_authenticated());

        let empty = MemoryTokenStore::with_tokens("", " ");
        assert!(!Session::hydrate(&empty).is_authenticated());
        assert!(!Session::hydrate(&MemoryTokenStore::default()).is_authenticated());
    }

    #[test]
    fn test_establish_persists() {
        let store = MemoryTokenStore::default();
        let session = Session::establish(
            &store,
            LoginResponse {
                access_token: "a2".into(),
                refresh_token: "r2".into(),
                user: user(UserRole::Admin),
            },
        );
        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().as_deref(), Some("r2"));
        assert!(session.is_admin());
        assert_eq!(session.username(), "maria");
        assert!(session.client().has_token());
    }

    #[test]
    fn test_refresh_keeps_refresh_token_and_user() {
        let store = MemoryTokenStore::with_tokens("old", "r");
        let session = Session::hydrate(&store).with_user(user(UserRole::Operador));
        let session = session.refreshed(
            &store,
            RefreshResponse {
                access_token: "new".into(),
                user: None,
            },
        );
        assert_eq!(session.access_token.as_deref(), Some("new"));
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
        assert_eq!(store.access_token().as_deref(), Some("new"));
        assert!(!session.is_admin());
        assert!(session.user.is_some());
    }

    #[test]
    fn test_teardown_clears_store() {
        let store = MemoryTokenStore::with_tokens("a", "r");
        let session = Session::teardown(&store);
        assert_eq!(session, Session::default());
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
        assert!(session.refresh_client().is_none());
        assert_eq!(session.username(), "Convidado");
    }
}

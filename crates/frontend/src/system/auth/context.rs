use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::session::Session;
use super::storage::LocalStorageTokenStore;
use crate::shared::api_client::{ApiClient, ApiError};
use contracts::system::auth::LoginResponse;

/// Session handle shared through context
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<Session>,
    /// True while a restored session is being validated
    pub checking: RwSignal<bool>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn is_admin(&self) -> bool {
        self.session.with(Session::is_admin)
    }

    /// API client for the current token (untracked; call from handlers).
    pub fn client(&self) -> ApiClient {
        self.session.with_untracked(Session::client)
    }

    pub fn login_succeeded(&self, response: LoginResponse) {
        log::info!("Login: {}", response.user.username);
        self.session
            .set(Session::establish(&LocalStorageTokenStore, response));
    }

    /// Drops the session when the server rejects the token.
    pub fn handle_error(&self, err: &ApiError) {
        if err.is_unauthorized() {
            log::warn!("Session rejected by server, signing out");
            self.session.set(Session::teardown(&LocalStorageTokenStore));
        }
    }

    pub fn logout(&self) {
        let client = self.client();
        let session = self.session;
        spawn_local(async move {
            if let Err(e) = api::logout(&client).await {
                log::warn!("Logout request failed: {}", e);
            }
            session.set(Session::teardown(&LocalStorageTokenStore));
        });
    }
}

/// Validate a restored session: profile first, then one refresh attempt,
/// otherwise tear down.
async fn validate(auth: AuthContext) {
    let current = auth.session.get_untracked();
    if !current.is_authenticated() {
        auth.checking.set(false);
        return;
    }

    match api::profile(&current.client()).await {
        Ok(user) => auth.session.set(current.with_user(user)),
        Err(e) => {
            log::info!("Stored token rejected ({}), trying refresh", e);
            let refreshed = match current.refresh_client() {
                Some(client) => api::refresh(&client).await.ok(),
                None => None,
            };
            match refreshed {
                Some(response) => {
                    let session = current.refreshed(&LocalStorageTokenStore, response);
                    let session = match session.user.clone() {
                        Some(_) => session,
                        None => match api::profile(&session.client()).await {
                            Ok(user) => session.with_user(user),
                            Err(_) => Session::teardown(&LocalStorageTokenStore),
                        },
                    };
                    auth.session.set(session);
                }
                None => auth.session.set(Session::teardown(&LocalStorageTokenStore)),
            }
        }
    }
    auth.checking.set(false);
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let session = Session::hydrate(&LocalStorageTokenStore);
    let auth = AuthContext {
        checking: RwSignal::new(session.is_authenticated()),
        session: RwSignal::new(session),
    };
    provide_context(auth);

    spawn_local(validate(auth));

    children()
}

/// Hook to access the session
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthProvider not found in component tree")
}

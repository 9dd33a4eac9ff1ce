use leptos::prelude::*;

use super::context::use_auth;

/// Renders `children` for a signed-in session, `fallback` otherwise.
/// A loading line is shown while a restored session is being checked.
#[component]
pub fn RequireAuth(#[prop(into)] fallback: ViewFn, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    // Only remount when the gate itself flips, not on every session update
    let gate = Memo::new(move |_| (auth.checking.get(), auth.is_authenticated()));

    move || match gate.get() {
        (true, _) => view! { <div class="app-loading">"Carregando..."</div> }.into_any(),
        (false, true) => children().into_any(),
        (false, false) => fallback.run(),
    }
}

/// Renders `children` only for admin users.
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let allowed = Memo::new(move |_| auth.is_admin());

    move || {
        if allowed.get() {
            children().into_any()
        } else {
            view! {
                <div class="warning-box">
                    "Acesso restrito a administradores."
                </div>
            }
            .into_any()
        }
    }
}

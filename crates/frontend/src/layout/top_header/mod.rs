//! Top bar: sidebar toggle, brand, signed-in user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();
    let role_label = move || if auth.is_admin() { "Administrador" } else { "Operador" };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Recolher" } else { "Expandir" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"Licimar"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || auth.session.with(|s| s.username())}</span>
                    <span class="top-header__role">{role_label}</span>
                </div>

                <button class="top-header__icon-btn" on:click=move |_| auth.logout() title="Sair">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

//! PageFrame: standard root wrapper for every page of the shell.
//!
//! Sets `id` (`"{entity}--{category}"`, e.g. `"u001_settlement--usecase"`) and
//! `data-page-category` on the root element.

use leptos::prelude::*;

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";
pub const PAGE_CAT_USECASE: &str = "usecase";
pub const PAGE_CAT_LIST: &str = "list";
pub const PAGE_CAT_SYSTEM: &str = "system";

#[component]
pub fn PageFrame(
    page_id: &'static str,
    category: &'static str,
    /// Page heading
    title: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            <div class="page__header">
                <h1 class="page__title">{title}</h1>
            </div>
            <div class="page__content">
                {children()}
            </div>
        </div>
    }
}

/// Inline alert used for validation and server errors
#[component]
pub fn ErrorBox(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|e| view! {
            <div class="warning-box warning-box--error">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">{e}</span>
            </div>
        })}
    }
}

/// Success notice that hides itself after a few seconds
#[component]
pub fn Notice(message: RwSignal<Option<String>>) -> impl IntoView {
    Effect::new(move |_| {
        if message.get().is_some() {
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(4000).await;
                message.set(None);
            });
        }
    });

    view! {
        {move || message.get().map(|m| view! {
            <div class="warning-box warning-box--success">
                <span class="warning-box__text">{m}</span>
            </div>
        })}
    }
}

use crate::dashboards::OverviewDashboard;
use crate::layout::global_context::{AppGlobalContext, Page};
use crate::layout::left::sidebar::Sidebar;
use crate::layout::Shell;
use crate::system::auth::guard::{RequireAdmin, RequireAuth};
use crate::system::pages::login::LoginPage;
use crate::usecases::u001_settlement::SettlementView;
use crate::usecases::u002_order_out::OrderOutView;
use crate::usecases::u003_debt_summary::DebtSummaryView;
use crate::usecases::u004_history::HistoryView;
use leptos::prelude::*;

/// Active page of the center area; no router, the sidebar sets the page.
#[component]
fn PageContent() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    move || match ctx.active.get() {
        Page::Dashboard => view! { <OverviewDashboard /> }.into_any(),
        Page::Settlement => view! { <SettlementView /> }.into_any(),
        Page::OrderOut => view! { <OrderOutView /> }.into_any(),
        Page::History => view! { <HistoryView /> }.into_any(),
        Page::DebtSummary => view! {
            <RequireAdmin>
                <DebtSummaryView />
            </RequireAdmin>
        }
        .into_any(),
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    ctx.init_url_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <PageContent /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireAuth fallback=|| view! { <LoginPage /> }>
            <MainLayout />
        </RequireAuth>
    }
}

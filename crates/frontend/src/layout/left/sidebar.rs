//! Sidebar with collapsible menu groups

use crate::layout::global_context::{AppGlobalContext, Page};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u001_settlement::RecordReturn;
use contracts::usecases::u002_order_out::IssueOrder;
use contracts::usecases::u003_debt_summary::DebtOverview;
use contracts::usecases::u004_history::OrderHistory;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(Page, &'static str, &'static str, &'static str)>, // (page, label, icon, hint)
    admin_only: bool,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "dashboards",
            label: "Painéis",
            icon: "dashboard",
            items: vec![(Page::Dashboard, "Dashboard", "dashboard", "Indicadores do dia")],
            admin_only: false,
        },
        MenuGroup {
            id: "operations",
            label: "Operações",
            icon: "truck",
            items: vec![
                (Page::OrderOut, IssueOrder::display_name(), "truck", IssueOrder::description()),
                (Page::Settlement, RecordReturn::display_name(), "undo", RecordReturn::description()),
                (Page::History, OrderHistory::display_name(), "history", OrderHistory::description()),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "finance",
            label: "Financeiro",
            icon: "dollar-sign",
            items: vec![(
                Page::DebtSummary,
                DebtOverview::display_name(),
                "dollar-sign",
                DebtOverview::description(),
            )],
            admin_only: true,
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id)
            .collect::<Vec<_>>(),
    );

    view! {
        <div class="app-sidebar__content">
            {move || {
                let is_admin = auth.is_admin();
                get_menu_groups()
                    .into_iter()
                    .filter(|group| !group.admin_only || is_admin)
                    .map(|group| {
                        let group_id = group.id;
                        let items = StoredValue::new(group.items);
                        view! {
                            <div>
                                <div
                                    class="app-sidebar__item"
                                    style:padding-left="12px"
                                    on:click=move |_| {
                                        expanded_groups.update(|items| {
                                            if let Some(pos) = items.iter().position(|x| *x == group_id) {
                                                items.remove(pos);
                                            } else {
                                                items.push(group_id);
                                            }
                                        });
                                    }
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(group.icon)}
                                        <span>{group.label}</span>
                                    </div>
                                </div>
                                <Show when=move || expanded_groups.get().contains(&group_id)>
                                    <div class="app-sidebar__children">
                                        {items.get_value().into_iter().map(|(page, label, icon_name, hint)| view! {
                                            <div
                                                class="app-sidebar__item"
                                                title=hint
                                                class:app-sidebar__item--active=move || ctx.active.get() == page
                                                style:padding-left="10px"
                                                on:click=move |_| ctx.open(page)
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(icon_name)}
                                                    <span>{label}</span>
                                                </div>
                                            </div>
                                        }).collect_view()}
                                    </div>
                                </Show>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

use crate::dashboards::d001_overview::api;
use crate::domain::a003_produto::api as produto_api;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::page_frame::{ErrorBox, PageFrame, PAGE_CAT_DASHBOARD};
use crate::system::auth::context::use_auth;
use contracts::dashboards::d001_overview::DashboardMetrics;
use contracts::domain::a003_produto::Produto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thaw::*;

/// Bar height in percent of the best day
fn bar_percent(value: Decimal, max: Decimal) -> u32 {
    if max <= Decimal::ZERO {
        return 0;
    }
    (value / max * Decimal::ONE_HUNDRED)
        .round()
        .to_u32()
        .unwrap_or(0)
        .min(100)
}

/// Home dashboard: sales, open orders, stock
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let auth = use_auth();
    let (metrics, set_metrics) = signal(None::<DashboardMetrics>);
    let (low_stock, set_low_stock) = signal(Vec::<Produto>::new());
    let (loading, set_loading) = signal(false);
    let error = RwSignal::new(None::<String>);

    let load = move || {
        let client = auth.client();
        set_loading.set(true);
        error.set(None);
        spawn_local(async move {
            match api::get_metrics(&client).await {
                Ok(m) => set_metrics.set(Some(m)),
                Err(e) => {
                    auth.handle_error(&e);
                    error.set(Some(format!("Erro ao carregar métricas: {}", e.user_message())));
                }
            }
            match produto_api::estoque_baixo(&client).await {
                Ok(list) => set_low_stock.set(list),
                Err(e) => log::warn!("Low stock list: {}", e),
            }
            set_loading.set(false);
        });
    };
    load();

    view! {
        <PageFrame page_id="d001_overview--dashboard" category=PAGE_CAT_DASHBOARD title="Dashboard">
            <ErrorBox message=error />

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || loading.get())
                    on_click=move |_| load()
                >
                    {icon("refresh")}
                    "Atualizar"
                </Button>
            </div>

            {move || metrics.get().map(|m| {
                let max = m.max_daily_sales();
                let top = m.produto_mais_vendido.clone();
                view! {
                    <div class="metric-cards">
                        <div class="metric-card">
                            <span class="metric-card__label">"Vendas no período"</span>
                            <strong class="metric-card__value">{format_money(m.vendas_periodo)}</strong>
                        </div>
                        <div class="metric-card">
                            <span class="metric-card__label">"Vendas hoje"</span>
                            <strong class="metric-card__value">{format_money(m.vendas_hoje)}</strong>
                        </div>
                        <div class="metric-card">
                            <span class="metric-card__label">"Pedidos em aberto"</span>
                            <strong class="metric-card__value">{m.pedidos_abertos}</strong>
                        </div>
                        <div class="metric-card">
                            <span class="metric-card__label">"Clientes ativos"</span>
                            <strong class="metric-card__value">{m.clientes_ativos}</strong>
                        </div>
                        <div class="metric-card" class:metric-card--danger={m.produtos_estoque_baixo > 0}>
                            <span class="metric-card__label">"Estoque baixo"</span>
                            <strong class="metric-card__value">{m.produtos_estoque_baixo}</strong>
                        </div>
                    </div>

                    <div class="dashboard__top-product">
                        <span>"Produto mais vendido: "</span>
                        <strong>{top.nome.unwrap_or_else(|| "-".to_string())}</strong>
                        <span>{format!(" ({})", format_quantity(top.quantidade, false))}</span>
                    </div>

                    <div class="dashboard__chart">
                        {m.vendas_por_dia.into_iter().map(|day| {
                            let height = format!("height: {}%;", bar_percent(day.vendas, max));
                            view! {
                                <div class="dashboard__bar" title=format_money(day.vendas)>
                                    <div class="dashboard__bar-fill" style=height></div>
                                    <span class="dashboard__bar-label">{day.data}</span>
                                </div>
                            }
                        }).collect_view()}
                    </div>
                }
            })}

            {move || {
                let list = low_stock.get();
                (!list.is_empty()).then(|| view! {
                    <h2>"Produtos com estoque baixo"</h2>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Produto"</TableHeaderCell>
                                <TableHeaderCell>"Estoque"</TableHeaderCell>
                                <TableHeaderCell>"Mínimo"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {list.into_iter().map(|p| {
                                let weight = p.is_weight_based();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{p.nome}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_quantity(p.estoque, weight)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_quantity(p.estoque_minimo, weight)}</TableCellLayout></TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                })
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(Decimal::from(50), Decimal::from(200)), 25);
        assert_eq!(bar_percent(Decimal::from(200), Decimal::from(200)), 100);
        assert_eq!(bar_percent(Decimal::from(10), Decimal::ZERO), 0);
    }
}

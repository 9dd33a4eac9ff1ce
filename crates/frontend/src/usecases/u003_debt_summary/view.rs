use crate::domain::a001_cliente::api::{self as cliente_api, ClienteListQuery};
use crate::domain::a004_pedido::api as pedido_api;
use crate::shared::date_utils::format_opt_date;
use crate::shared::icons::icon;
use crate::shared::number_format::format_money;
use crate::shared::page_frame::{ErrorBox, PageFrame, PAGE_CAT_USECASE};
use crate::system::auth::context::use_auth;
use contracts::domain::a001_cliente::{ClienteId, DividaPendente};
use contracts::domain::a004_pedido::{PedidoListQuery, PedidoStatus};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u003_debt_summary::{summarize_debts, DebtDashboard, DebtOverview};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Dívida acumulada por cliente, a partir dos pedidos finalizados.
#[component]
pub fn DebtSummaryView() -> impl IntoView {
    let auth = use_auth();
    let (dashboard, set_dashboard) = signal(DebtDashboard::default());
    let (is_loading, set_is_loading) = signal(false);
    let error = RwSignal::new(None::<String>);
    let pendente = RwSignal::new(None::<DividaPendente>);

    let load = move || {
        let client = auth.client();
        set_is_loading.set(true);
        error.set(None);
        spawn_local(async move {
            let clientes_query = ClienteListQuery {
                per_page: Some(100),
                ..Default::default()
            };
            let pedidos_query = PedidoListQuery {
                status: Some(PedidoStatus::Finalizado),
                per_page: Some(1000),
                ..Default::default()
            };
            let clientes = cliente_api::list(&client, &clientes_query).await;
            let pedidos = pedido_api::list(&client, &pedidos_query).await;
            match (clientes, pedidos) {
                (Ok(clientes), Ok(pedidos)) => {
                    let summary = summarize_debts(&clientes.items, &pedidos.items);
                    log::debug!(
                        "Debt summary: {} clientes, total {}",
                        summary.devedores(),
                        summary.total_divida
                    );
                    set_dashboard.set(summary);
                }
                (Err(e), _) | (_, Err(e)) => {
                    auth.handle_error(&e);
                    error.set(Some(format!(
                        "Erro ao carregar dados de dívida: {}",
                        e.user_message()
                    )));
                }
            }
            set_is_loading.set(false);
        });
    };

    let show_pendente = move |id: ClienteId| {
        let client = auth.client();
        spawn_local(async move {
            match cliente_api::divida_pendente(&client, id).await {
                Ok(info) => pendente.set(Some(info)),
                Err(e) => {
                    auth.handle_error(&e);
                    error.set(Some(e.user_message()));
                }
            }
        });
    };

    load();

    view! {
        <PageFrame page_id="u003_debt_summary--usecase" category=PAGE_CAT_USECASE title=DebtOverview::display_name()>
            <ErrorBox message=error />

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || is_loading.get())
                    on_click=move |_| load()
                >
                    {icon("refresh")}
                    "Atualizar"
                </Button>
            </div>

            <div class="metric-cards">
                <div class="metric-card metric-card--danger">
                    <span class="metric-card__label">"Dívida Total"</span>
                    <strong class="metric-card__value">
                        {move || dashboard.with(|d| format_money(d.total_divida))}
                    </strong>
                </div>
                <div class="metric-card">
                    <span class="metric-card__label">"Clientes com Dívida"</span>
                    <strong class="metric-card__value">{move || dashboard.with(|d| d.devedores())}</strong>
                </div>
                <div class="metric-card">
                    <span class="metric-card__label">"Média por Cliente"</span>
                    <strong class="metric-card__value">
                        {move || dashboard.with(|d| format_money(d.media_por_cliente()))}
                    </strong>
                </div>
            </div>

            {move || {
                if is_loading.get() {
                    view! { <p class="app-loading">"Carregando..."</p> }.into_any()
                } else if dashboard.with(|d| d.summaries.is_empty()) {
                    view! { <p class="hint">"Nenhum cliente com dívida registrada."</p> }.into_any()
                } else {
                    view! {
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Cliente"</TableHeaderCell>
                                    <TableHeaderCell>"Dívida"</TableHeaderCell>
                                    <TableHeaderCell>"Pedidos"</TableHeaderCell>
                                    <TableHeaderCell>"Último pedido"</TableHeaderCell>
                                    <TableHeaderCell>""</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {dashboard.get().summaries.into_iter().map(|s| {
                                    let id = s.cliente_id;
                                    view! {
                                        <TableRow>
                                            <TableCell><TableCellLayout>{s.cliente_nome}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{format_money(s.total_divida)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{s.total_pedidos}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{format_opt_date(s.ultimo_pedido)}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| show_pendente(id)
                                                    >
                                                        "Pendências"
                                                    </Button>
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()}
                            </TableBody>
                        </Table>
                    }
                    .into_any()
                }
            }}

            {move || pendente.get().map(|info| view! {
                <div class="details-container">
                    <h3>{info.cliente_nome.clone().unwrap_or_else(|| format!("Cliente #{}", info.cliente_id))}</h3>
                    <p>{format!("Saldo devedor: {}", format_money(info.saldo_devedor))}</p>
                    <p>{format!("Dívidas em aberto: {}", info.quantidade_dividas)}</p>
                    <ul>
                        {info.dividas.into_iter().map(|d| view! {
                            <li>
                                {format!(
                                    "{} - {} (pago {})",
                                    format_opt_date(d.data_registro),
                                    format_money(d.saldo),
                                    format_money(d.valor_pago),
                                )}
                                {d.descricao.map(|text| view! { <span class="hint">{format!(" {}", text)}</span> })}
                            </li>
                        }).collect_view()}
                    </ul>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| pendente.set(None)>
                        "Fechar"
                    </Button>
                </div>
            })}
        </PageFrame>
    }
}

use super::view_model::{HistoryViewModel, PER_PAGE};
use crate::shared::date_utils::{format_opt_date, input_date_value, parse_input_date};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::page_frame::{ErrorBox, Notice, PageFrame, PAGE_CAT_LIST};
use crate::system::auth::context::use_auth;
use contracts::domain::a001_cliente::ClienteId;
use contracts::domain::a004_pedido::{Pedido, PedidoStatus};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u004_history::OrderHistory;
use leptos::prelude::*;
use thaw::*;

fn status_class(status: PedidoStatus) -> &'static str {
    match status {
        PedidoStatus::Saida => "status-badge status-badge--open",
        PedidoStatus::Finalizado => "status-badge status-badge--done",
        PedidoStatus::Cancelado => "status-badge status-badge--cancelled",
    }
}

#[component]
pub fn HistoryView() -> impl IntoView {
    let vm = HistoryViewModel::new(use_auth());
    vm.load_clientes();

    // Search is applied locally; only the server-side filters trigger a fetch
    let server_query = Memo::new(move |_| vm.filter.with(|f| f.to_query(1, PER_PAGE)));
    Effect::new(move |_| {
        server_query.track();
        let page = vm.page.get();
        vm.fetch(page);
    });

    let totals = Memo::new(move |_| vm.totals());

    view! {
        <PageFrame page_id="u004_history--list" category=PAGE_CAT_LIST title=OrderHistory::display_name()>
            <ErrorBox message=vm.error />
            <Notice message=vm.notice />

            <div class="filters">
                <div class="form-group">
                    <label for="f-status">"Status"</label>
                    <select
                        id="f-status"
                        on:change=move |ev| {
                            let status = PedidoStatus::from_code(&event_target_value(&ev));
                            vm.update_filter(|f| f.status = status);
                        }
                    >
                        <option value="">"Todos"</option>
                        {PedidoStatus::ALL.iter().map(|s| view! {
                            <option value=s.code()>{s.label()}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label for="f-cliente">"Cliente"</label>
                    <select
                        id="f-cliente"
                        on:change=move |ev| {
                            let id = event_target_value(&ev).parse::<i64>().ok().map(ClienteId);
                            vm.update_filter(|f| f.cliente_id = id);
                        }
                    >
                        <option value="">"Todos"</option>
                        {move || vm.clientes.with(|list| list.iter().map(|c| view! {
                            <option value=c.id.to_string()>{c.nome.clone()}</option>
                        }).collect_view())}
                    </select>
                </div>
                <div class="form-group">
                    <label for="f-inicio">"De"</label>
                    <input
                        type="date"
                        id="f-inicio"
                        prop:value=move || vm.filter.with(|f| input_date_value(f.data_inicio))
                        on:change=move |ev| {
                            let date = parse_input_date(&event_target_value(&ev));
                            vm.update_filter(|f| f.data_inicio = date);
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="f-fim">"Até"</label>
                    <input
                        type="date"
                        id="f-fim"
                        prop:value=move || vm.filter.with(|f| input_date_value(f.data_fim))
                        on:change=move |ev| {
                            let date = parse_input_date(&event_target_value(&ev));
                            vm.update_filter(|f| f.data_fim = date);
                        }
                    />
                </div>
                <div class="form-group">
                    <label for="f-search">"Buscar"</label>
                    <input
                        type="text"
                        id="f-search"
                        placeholder="Cliente ou nº do pedido"
                        prop:value=move || vm.filter.with(|f| f.search.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            vm.filter.update(|f| f.search = text);
                        }
                    />
                </div>
            </div>

            <div class="metric-cards">
                <div class="metric-card">
                    <span class="metric-card__label">"Em aberto"</span>
                    <strong class="metric-card__value">{move || totals.with(|t| t.em_aberto)}</strong>
                </div>
                <div class="metric-card">
                    <span class="metric-card__label">"Finalizados"</span>
                    <strong class="metric-card__value">{move || totals.with(|t| t.finalizados)}</strong>
                </div>
                <div class="metric-card">
                    <span class="metric-card__label">"Cancelados"</span>
                    <strong class="metric-card__value">{move || totals.with(|t| t.cancelados)}</strong>
                </div>
                <div class="metric-card">
                    <span class="metric-card__label">"Valor finalizado"</span>
                    <strong class="metric-card__value">{move || totals.with(|t| format_money(t.valor_finalizado))}</strong>
                </div>
                <div class="metric-card metric-card--danger">
                    <span class="metric-card__label">"Dívida registrada"</span>
                    <strong class="metric-card__value">{move || totals.with(|t| format_money(t.divida_registrada))}</strong>
                </div>
            </div>

            {move || {
                if vm.is_loading.get() {
                    view! { <p class="app-loading">"Carregando..."</p> }.into_any()
                } else {
                    let rows = vm.rows();
                    if rows.is_empty() {
                        view! { <p class="hint">"Nenhum pedido encontrado."</p> }.into_any()
                    } else {
                        view! { <HistoryTable vm=vm rows=rows /> }.into_any()
                    }
                }
            }}

            {move || vm.details.get().map(|pedido| view! { <PedidoDetails vm=vm pedido=pedido /> })}

            <div class="pagination">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.page.get() <= 1)
                    on_click=move |_| vm.page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Anterior"
                </Button>
                <span class="pagination__info">
                    {move || {
                        let total = vm.pagination.with(|p| p.as_ref().map(|p| p.total).unwrap_or(0));
                        format!("Página {} de {} ({} pedidos)", vm.page.get(), vm.total_pages(), total)
                    }}
                </span>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.page.get() >= vm.total_pages())
                    on_click=move |_| vm.page.update(|p| *p += 1)
                >
                    "Próxima"
                </Button>
            </div>
        </PageFrame>
    }
}

#[component]
fn HistoryTable(vm: HistoryViewModel, rows: Vec<Pedido>) -> impl IntoView {
    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Pedido"</TableHeaderCell>
                    <TableHeaderCell>"Cliente"</TableHeaderCell>
                    <TableHeaderCell>"Data"</TableHeaderCell>
                    <TableHeaderCell>"Status"</TableHeaderCell>
                    <TableHeaderCell>"Total"</TableHeaderCell>
                    <TableHeaderCell>"Dívida"</TableHeaderCell>
                    <TableHeaderCell>""</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>
                {rows.into_iter().map(|p| {
                    let id = p.id;
                    let status = p.status;
                    let cliente_label = p.cliente_label();
                    view! {
                        <TableRow>
                            <TableCell><TableCellLayout>{format!("#{}", p.id)}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{cliente_label}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{format_opt_date(p.data_operacao)}</TableCellLayout></TableCell>
                            <TableCell>
                                <TableCellLayout>
                                    <span class=status_class(status)>{status.label()}</span>
                                </TableCellLayout>
                            </TableCell>
                            <TableCell><TableCellLayout>{format_money(p.total)}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{format_money(p.divida)}</TableCellLayout></TableCell>
                            <TableCell>
                                <TableCellLayout>
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| vm.show_details(id)
                                    >
                                        "Itens"
                                    </Button>
                                    {(status != PedidoStatus::Cancelado).then(|| view! {
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| vm.reprint(id, status)
                                        >
                                            {icon("download")}
                                            "Reimprimir"
                                        </Button>
                                    })}
                                </TableCellLayout>
                            </TableCell>
                        </TableRow>
                    }
                }).collect_view()}
            </TableBody>
        </Table>
    }
}

#[component]
fn PedidoDetails(vm: HistoryViewModel, pedido: Pedido) -> impl IntoView {
    let title = format!("{} - {}", pedido.title(), pedido.cliente_label());
    let observacoes = pedido.observacoes.clone().filter(|o| !o.trim().is_empty());

    view! {
        <div class="details-panel">
            <div class="details-panel__header">
                <h2>{title}</h2>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.details.set(None)>
                    "Fechar"
                </Button>
            </div>
            {observacoes.map(|o| view! { <p class="hint">{o}</p> })}
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Produto"</TableHeaderCell>
                        <TableHeaderCell>"Saída"</TableHeaderCell>
                        <TableHeaderCell>"Retorno"</TableHeaderCell>
                        <TableHeaderCell>"Vendido"</TableHeaderCell>
                        <TableHeaderCell>"Preço"</TableHeaderCell>
                        <TableHeaderCell>"Total"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {pedido.itens.into_iter().map(|item| {
                        let weight = item.looks_weight_based();
                        let sold = item
                            .quantidade_vendida
                            .unwrap_or(item.quantidade_saida - item.quantidade_retorno);
                        let total = item.valor_total.unwrap_or(sold * item.preco_unitario);
                        let nome = item.nome();
                        view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{nome}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_quantity(item.quantidade_saida, weight)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_quantity(item.quantidade_retorno, weight)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_quantity(sold, weight)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_money(item.preco_unitario)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{format_money(total)}</TableCellLayout></TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        </div>
    }
}

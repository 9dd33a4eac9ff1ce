use super::view_model::SettlementViewModel;
use crate::shared::date_utils::format_opt_date;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity, input_value};
use crate::shared::page_frame::{ErrorBox, Notice, PageFrame, PAGE_CAT_USECASE};
use crate::system::auth::context::use_auth;
use contracts::domain::a004_pedido::PedidoId;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u001_settlement::{
    RecordReturn, Settlement, SettlementAction, SettlementItem,
};
use leptos::prelude::*;
use thaw::*;

/// Retorno de produtos: quantities brought back, amount due.
#[component]
pub fn SettlementView() -> impl IntoView {
    let vm = SettlementViewModel::new(use_auth());
    vm.load_open_orders();

    let selected = Memo::new(move |_| vm.state.with(|s| s.pedido_id));

    view! {
        <PageFrame page_id="u001_settlement--usecase" category=PAGE_CAT_USECASE title=RecordReturn::display_name()>
            <ErrorBox message=vm.error />
            <Notice message=vm.notice />

            <div class="form-group">
                <label for="pedido">"Pedido em aberto"</label>
                <select
                    id="pedido"
                    prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                    prop:disabled=move || vm.is_submitting.get()
                    on:change=move |ev| {
                        let id = event_target_value(&ev).parse::<i64>().ok().map(PedidoId);
                        vm.select_order(id);
                    }
                >
                    <option value="">"Selecione um pedido..."</option>
                    {move || vm.open_orders.with(|orders| {
                        orders.iter().map(|p| {
                            let label = format!(
                                "{} - {} ({})",
                                p.title(),
                                p.cliente_label(),
                                format_opt_date(p.data_operacao),
                            );
                            view! { <option value=p.id.to_string()>{label}</option> }
                        }).collect_view()
                    })}
                </select>
                {move || (!vm.loading.get() && vm.open_orders.with(|o| o.is_empty())).then(|| view! {
                    <p class="hint">"Nenhum pedido aguardando retorno."</p>
                })}
            </div>

            {move || (vm.loading.get() || vm.is_loading_items()).then(|| view! { <p class="app-loading">"Carregando..."</p> })}

            {move || match selected.get() {
                Some(pedido_id) => view! { <SettlementForm vm=vm pedido_id=pedido_id /> }.into_any(),
                None => view! { <></> }.into_any(),
            }}

            {move || vm.last_settled.get().map(|id| view! {
                <div class="details-actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.download_receipt()>
                        {icon("download")}
                        {format!("Baixar nota do pedido #{}", id)}
                    </Button>
                </div>
            })}
        </PageFrame>
    }
}

/// Item grid, debt input and totals of one loaded order.
/// Remounted whenever another order is loaded, so inputs start clean.
#[component]
fn SettlementForm(vm: SettlementViewModel, pedido_id: PedidoId) -> impl IntoView {
    let items = vm.state.with_untracked(|s| s.items.clone());
    let summary = Memo::new(move |_| vm.summary());
    let initial_debt = vm.state.with_untracked(|s| s.debt_surcharge);

    view! {
        <div class="settlement" data-pedido=pedido_id.to_string()>
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
                    {items.into_iter().map(|item| view! {
                        <SettlementRow vm=vm item=item summary=summary />
                    }).collect_view()}
                </TableBody>
            </Table>

            <div class="form-group">
                <label for="divida">"Dívida a acrescentar (R$)"</label>
                <input
                    type="number"
                    id="divida"
                    min="0"
                    step="0.01"
                    value=input_value(initial_debt)
                    on:input=move |ev| vm.dispatch(SettlementAction::SetDebt(event_target_value(&ev)))
                    on:change=move |ev| {
                        let debt = vm.state.with_untracked(|s| s.debt_surcharge);
                        event_target::<web_sys::HtmlInputElement>(&ev).set_value(&input_value(debt));
                    }
                />
            </div>

            <div class="form-group">
                <label for="observacoes">"Observações"</label>
                <textarea
                    id="observacoes"
                    rows="2"
                    prop:value=move || vm.state.with(|s| s.observacoes.clone())
                    on:input=move |ev| vm.dispatch(SettlementAction::SetObservacoes(event_target_value(&ev)))
                />
            </div>

            <SettlementTotals summary=summary />

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !vm.can_submit())
                    on_click=move |_| vm.submit()
                >
                    {icon("undo")}
                    {move || if vm.is_submitting.get() { "Registrando..." } else { "Registrar retorno" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || vm.is_submitting.get())
                    on_click=move |_| vm.select_order(None)
                >
                    "Cancelar"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn SettlementRow(
    vm: SettlementViewModel,
    item: SettlementItem,
    summary: Memo<Settlement>,
) -> impl IntoView {
    let id = item.produto_id;
    let weight = item.weight_based;
    let enabled = vm.state.with_untracked(|s| s.return_input_enabled(id));
    let step = if weight { "0.001" } else { "1" };
    let sold = move || {
        summary.with(|s| {
            s.line(id)
                .map(|l| format_quantity(l.quantity_sold, weight))
                .unwrap_or_default()
        })
    };
    let total = move || {
        summary.with(|s| {
            s.line(id)
                .map(|l| format_money(l.line_total_display()))
                .unwrap_or_default()
        })
    };

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout>
                    {item.produto_nome.clone()}
                    {item.non_returnable.then(|| view! { <span class="badge">" não devolve"</span> })}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{format_quantity(item.quantity_issued, weight)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <input
                        type="number"
                        min="0"
                        max=input_value(item.quantity_issued)
                        step=step
                        value="0"
                        disabled=!enabled
                        on:input=move |ev| vm.dispatch(SettlementAction::SetReturn {
                            produto_id: id,
                            input: event_target_value(&ev),
                        })
                        on:change=move |ev| {
                            // show the clamped value once editing ends
                            let returned = vm.state.with_untracked(|s| s.returns.get(id));
                            event_target::<web_sys::HtmlInputElement>(&ev).set_value(&input_value(returned));
                        }
                    />
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{sold}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{format_money(item.unit_price)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{total}</TableCellLayout>
            </TableCell>
        </TableRow>
    }
}

#[component]
fn SettlementTotals(summary: Memo<Settlement>) -> impl IntoView {
    view! {
        <div class="settlement__totals">
            <div>
                <span>"Subtotal: "</span>
                <strong>{move || summary.with(|s| format_money(s.subtotal_display()))}</strong>
            </div>
            <div>
                <span>"Dívida: "</span>
                <strong>{move || summary.with(|s| format_money(s.debt_surcharge_display()))}</strong>
            </div>
            <div class="settlement__total-due">
                <span>"Total a pagar: "</span>
                <strong>{move || summary.with(|s| format_money(s.total_due_display()))}</strong>
            </div>
        </div>
    }
}

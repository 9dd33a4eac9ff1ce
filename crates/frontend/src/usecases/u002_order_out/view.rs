use super::view_model::OrderOutViewModel;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_quantity, input_value};
use crate::shared::page_frame::{ErrorBox, Notice, PageFrame, PAGE_CAT_USECASE};
use crate::system::auth::context::use_auth;
use contracts::domain::a001_cliente::ClienteId;
use contracts::domain::a002_categoria::CategoriaId;
use contracts::domain::a003_produto::Produto;
use contracts::shared::numeric::parse_or_zero;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u002_order_out::{CartLine, IssueOrder};
use leptos::prelude::*;
use rust_decimal::Decimal;
use thaw::*;

#[component]
pub fn OrderOutView() -> impl IntoView {
    let vm = OrderOutViewModel::new(use_auth());
    vm.load();

    view! {
        <PageFrame page_id="u002_order_out--usecase" category=PAGE_CAT_USECASE title=IssueOrder::display_name()>
            <ErrorBox message=vm.error />
            <Notice message=vm.notice />

            {move || vm.loading.get().then(|| view! { <p class="app-loading">"Carregando..."</p> })}

            <div class="order-out">
                <div class="order-out__catalog">
                    <div class="form-group">
                        <label for="categoria">"Categoria"</label>
                        <select
                            id="categoria"
                            on:change=move |ev| {
                                let id = event_target_value(&ev).parse::<i64>().ok().map(CategoriaId);
                                vm.categoria_filter.set(id);
                            }
                        >
                            <option value="">"Todas"</option>
                            {move || vm.categorias.with(|cats| cats.iter().map(|c| view! {
                                <option value=c.id.to_string()>{c.nome.clone()}</option>
                            }).collect_view())}
                        </select>
                    </div>

                    <div class="order-out__grid">
                        <For
                            each=move || vm.visible_produtos()
                            key=|p| p.id
                            children=move |produto| view! { <ProdutoCard vm=vm produto=produto /> }
                        />
                    </div>
                </div>

                <div class="order-out__cart">
                    <h2>"Carrinho de Saída"</h2>
                    <div class="form-group">
                        <label for="cliente">"Cliente"</label>
                        <select
                            id="cliente"
                            prop:value=move || vm.cart.with(|c| c.cliente_id.map(|id| id.to_string()).unwrap_or_default())
                            on:change=move |ev| {
                                let id = event_target_value(&ev).parse::<i64>().ok().map(ClienteId);
                                vm.cart.update(|c| c.select_cliente(id));
                            }
                        >
                            <option value="">"Selecione o cliente..."</option>
                            {move || vm.clientes.with(|list| list.iter().map(|c| view! {
                                <option value=c.id.to_string()>{c.nome.clone()}</option>
                            }).collect_view())}
                        </select>
                    </div>

                    <CartTable vm=vm />

                    <div class="form-group">
                        <label for="obs-saida">"Observações"</label>
                        <textarea
                            id="obs-saida"
                            rows="2"
                            prop:value=move || vm.cart.with(|c| c.observacoes.clone())
                            on:input=move |ev| {
                                let text = event_target_value(&ev);
                                vm.cart.update(|c| c.observacoes = text);
                            }
                        />
                    </div>

                    <div class="order-out__total">
                        <span>"Total: "</span>
                        <strong>{move || vm.cart.with(|c| format_money(c.total()))}</strong>
                    </div>

                    <div class="details-actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || !vm.can_submit())
                            on_click=move |_| vm.submit()
                        >
                            {icon("truck")}
                            {move || if vm.is_submitting.get() { "Registrando..." } else { "Finalizar Saída" }}
                        </Button>
                        {move || vm.last_issued.get().map(|id| view! {
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.download_receipt()>
                                {icon("download")}
                                {format!("Nota do pedido #{}", id)}
                            </Button>
                        })}
                    </div>
                </div>
            </div>
        </PageFrame>
    }
}

#[component]
fn ProdutoCard(vm: OrderOutViewModel, produto: Produto) -> impl IntoView {
    let id = produto.id;
    let weight = produto.is_weight_based();
    let low = produto.is_estoque_baixo();
    let amount = RwSignal::new(if weight { String::new() } else { "1".to_string() });
    let produto = StoredValue::new(produto);
    let in_cart = move || vm.quantity_in_cart(id);
    let (step, placeholder) = if weight { ("0.001", "kg") } else { ("1", "qtd") };

    view! {
        <div class="produto-card" class:produto-card--low=low>
            <div class="produto-card__title">{produto.with_value(|p| p.nome.clone())}</div>
            <div class="produto-card__meta">
                {produto.with_value(|p| format!("Estoque: {}", format_quantity(p.estoque, weight)))}
            </div>
            <div class="produto-card__price">{produto.with_value(|p| format_money(p.preco))}</div>
            <div class="produto-card__actions">
                <input
                    type="number"
                    min="0"
                    step=step
                    placeholder=placeholder
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| produto.with_value(|p| vm.add(p, &amount.get_untracked()))
                >
                    "+"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || in_cart() <= Decimal::ZERO)
                    on_click=move |_| {
                        let current = in_cart();
                        let typed = parse_or_zero(&amount.get_untracked());
                        let delta = match (weight, typed > Decimal::ZERO) {
                            (false, _) => Decimal::ONE,
                            (true, true) => typed,
                            (true, false) => current,
                        };
                        vm.set_quantity(id, current - delta);
                    }
                >
                    "-"
                </Button>
                <span class="produto-card__in-cart">{move || format_quantity(in_cart(), weight)}</span>
            </div>
        </div>
    }
}

#[component]
fn CartTable(vm: OrderOutViewModel) -> impl IntoView {
    let empty = Memo::new(move |_| vm.cart.with(|c| c.is_empty()));

    view! {
        {move || {
            if empty.get() {
                view! { <p class="hint">"Nenhum item adicionado."</p> }.into_any()
            } else {
                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Produto"</TableHeaderCell>
                                <TableHeaderCell>"Qtd"</TableHeaderCell>
                                <TableHeaderCell>"Preço"</TableHeaderCell>
                                <TableHeaderCell>"Total"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || vm.cart.with(|c| c.lines.clone())
                                key=|l| (l.produto_id, l.quantidade)
                                children=move |line| view! { <CartRow vm=vm line=line /> }
                            />
                        </TableBody>
                    </Table>
                }
                .into_any()
            }
        }}
    }
}

#[component]
fn CartRow(vm: OrderOutViewModel, line: CartLine) -> impl IntoView {
    let id = line.produto_id;
    let over_stock = line.exceeds_stock();
    let step = if line.weight_based { "0.001" } else { "1" };
    let valor_total = line.valor_total();

    view! {
        <TableRow>
            <TableCell>
                <TableCellLayout>
                    {line.produto_nome.clone()}
                    {over_stock.then(|| view! {
                        <span class="badge badge--warning">
                            {format!(" estoque: {}", format_quantity(line.estoque, line.weight_based))}
                        </span>
                    })}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <input
                        type="number"
                        min="0"
                        step=step
                        value=input_value(line.quantidade)
                        on:change=move |ev| vm.set_quantity(id, parse_or_zero(&event_target_value(&ev)))
                    />
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{format_money(line.preco_unitario)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{format_money(valor_total)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| vm.cart.update(|c| c.remove(id))
                    >
                        "Remover"
                    </Button>
                </TableCellLayout>
            </TableCell>
        </TableRow>
    }
}

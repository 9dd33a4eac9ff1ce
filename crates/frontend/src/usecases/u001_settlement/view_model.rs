use crate::domain::a003_produto::api as produto_api;
use crate::domain::a004_pedido::api as pedido_api;
use crate::shared::export::{download_bytes, receipt_filename, PDF_MIME};
use crate::shared::number_format::format_money;
use crate::system::auth::context::AuthContext;
use contracts::domain::a003_produto::Produto;
use contracts::domain::a004_pedido::PedidoId;
use contracts::usecases::u001_settlement::{
    ItemsRequest, OpenOrders, Settlement, SettlementAction, SettlementState,
};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// ViewModel of the return settlement screen
#[derive(Clone, Copy)]
pub struct SettlementViewModel {
    pub state: RwSignal<SettlementState>,
    pub open_orders: RwSignal<OpenOrders>,
    /// Full catalog, source of the non-returnable and weight flags
    pub catalog: RwSignal<Vec<Produto>>,
    /// Open orders and catalog being fetched
    pub loading: RwSignal<bool>,
    /// Item fetch of the selected order; stale responses are dropped
    pub items_request: RwSignal<ItemsRequest>,
    pub is_submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    /// Last settled order, offered for receipt download
    pub last_settled: RwSignal<Option<PedidoId>>,
    auth: AuthContext,
}

impl SettlementViewModel {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            state: RwSignal::new(SettlementState::new()),
            open_orders: RwSignal::new(OpenOrders::default()),
            catalog: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            items_request: RwSignal::new(ItemsRequest::default()),
            is_submitting: RwSignal::new(false),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            last_settled: RwSignal::new(None),
            auth,
        }
    }

    pub fn dispatch(&self, action: SettlementAction) {
        self.state
            .update(|s| *s = std::mem::take(s).reduce(action));
    }

    pub fn summary(&self) -> Settlement {
        self.state.with(SettlementState::summary)
    }

    pub fn is_loading_items(&self) -> bool {
        self.items_request.with(ItemsRequest::is_loading)
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting.get() && self.state.with(|s| s.is_loaded() && !s.items.is_empty())
    }

    /// Open orders and the product catalog
    pub fn load_open_orders(&self) {
        let vm = *self;
        let client = self.auth.client();
        vm.loading.set(true);
        spawn_local(async move {
            let orders = pedido_api::list_open(&client).await;
            let produtos = produto_api::list_all(&client).await;
            match (orders, produtos) {
                (Ok(orders), Ok(produtos)) => {
                    let orders = OpenOrders::from_list(orders);
                    log::debug!("Open orders loaded: {}", orders.len());
                    vm.open_orders.set(orders);
                    vm.catalog.set(produtos);
                }
                (Err(e), _) | (_, Err(e)) => {
                    vm.auth.handle_error(&e);
                    vm.error
                        .set(Some(format!("Erro ao carregar pedidos: {}", e.user_message())));
                }
            }
            vm.loading.set(false);
        });
    }

    /// Fetch the lines of the chosen order; `None` clears the form
    pub fn select_order(&self, pedido_id: Option<PedidoId>) {
        self.error.set(None);
        self.dispatch(SettlementAction::Reset);
        self.items_request.update(|r| r.begin(pedido_id));
        let Some(pedido_id) = pedido_id else {
            return;
        };

        let vm = *self;
        let client = self.auth.client();
        spawn_local(async move {
            let result = pedido_api::itens(&client, pedido_id).await;
            let mut current = false;
            vm.items_request.update(|r| current = r.finish(pedido_id));
            if !current {
                log::debug!("Dropping stale items of pedido {}", pedido_id);
                return;
            }
            match result {
                Ok(itens) => {
                    let items =
                        vm.catalog
                            .with_untracked(|produtos| SettlementState::items_from(&itens, produtos));
                    vm.dispatch(SettlementAction::Load { pedido_id, items });
                }
                Err(e) => {
                    vm.auth.handle_error(&e);
                    vm.error
                        .set(Some(format!("Erro ao carregar itens: {}", e.user_message())));
                }
            }
        });
    }

    pub fn submit(&self) {
        if self.is_submitting.get_untracked() {
            return;
        }
        self.error.set(None);

        let (pedido_id, request) = match self.state.with_untracked(SettlementState::to_request) {
            Ok(built) => built,
            Err(e) => {
                self.error.set(Some(e.to_string()));
                return;
            }
        };
        let total = self
            .state
            .with_untracked(|s| s.summary().total_due_display());
        log::info!("Registering return for pedido {} (total {})", pedido_id, total);

        let vm = *self;
        let client = self.auth.client();
        vm.is_submitting.set(true);
        spawn_local(async move {
            match pedido_api::registrar_retorno(&client, pedido_id, &request).await {
                Ok(response) => {
                    let message = response
                        .message
                        .clone()
                        .unwrap_or_else(|| "Retorno registrado com sucesso".to_string());
                    let message = match response.amount_due() {
                        Some(amount) => format!("{} Total: {}", message, format_money(amount)),
                        None => message,
                    };
                    vm.notice.set(Some(message));
                    vm.last_settled.set(Some(pedido_id));
                    vm.dispatch(SettlementAction::Reset);
                    vm.load_open_orders();
                }
                Err(e) => {
                    log::error!("Return for pedido {} failed: {}", pedido_id, e);
                    vm.auth.handle_error(&e);
                    vm.error.set(Some(e.user_message()));
                }
            }
            vm.is_submitting.set(false);
        });
    }

    pub fn download_receipt(&self) {
        let Some(pedido_id) = self.last_settled.get_untracked() else {
            return;
        };
        let vm = *self;
        let client = self.auth.client();
        spawn_local(async move {
            let result = pedido_api::imprimir_retorno(&client, pedido_id)
                .await
                .map_err(|e| {
                    vm.auth.handle_error(&e);
                    e.user_message()
                })
                .and_then(|bytes| {
                    download_bytes(&bytes, PDF_MIME, &receipt_filename("retorno", pedido_id.0))
                });
            if let Err(e) = result {
                log::error!("Receipt download failed: {}", e);
                vm.error.set(Some(format!("Erro ao gerar nota: {}", e)));
            }
        });
    }
}

use crate::domain::a001_cliente::api as cliente_api;
use crate::domain::a004_pedido::api as pedido_api;
use crate::shared::export::{download_bytes, receipt_filename, PDF_MIME};
use crate::system::auth::context::AuthContext;
use contracts::domain::a001_cliente::Cliente;
use contracts::domain::a004_pedido::{Pedido, PedidoId, PedidoStatus};
use contracts::shared::Pagination;
use contracts::usecases::u004_history::{HistoryFilter, StatusTotals};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub const PER_PAGE: u32 = 10;

#[derive(Clone, Copy)]
pub struct HistoryViewModel {
    pub filter: RwSignal<HistoryFilter>,
    pub page: RwSignal<u32>,
    /// Current server page, unfiltered
    pub pedidos: RwSignal<Vec<Pedido>>,
    pub pagination: RwSignal<Option<Pagination>>,
    pub clientes: RwSignal<Vec<Cliente>>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    /// Order opened in the details panel, items included
    pub details: RwSignal<Option<Pedido>>,
    auth: AuthContext,
}

impl HistoryViewModel {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            filter: RwSignal::new(HistoryFilter::default()),
            page: RwSignal::new(1),
            pedidos: RwSignal::new(Vec::new()),
            pagination: RwSignal::new(None),
            clientes: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            details: RwSignal::new(None),
            auth,
        }
    }

    /// Rows shown: server page narrowed by the local search
    pub fn rows(&self) -> Vec<Pedido> {
        let filter = self.filter.get();
        self.pedidos.with(|p| filter.apply(p))
    }

    pub fn totals(&self) -> StatusTotals {
        StatusTotals::from_pedidos(&self.rows())
    }

    pub fn total_pages(&self) -> u32 {
        self.pagination
            .with(|p| p.as_ref().map(|p| p.pages.max(1)).unwrap_or(1))
    }

    /// Change a filter and go back to the first page
    pub fn update_filter(&self, f: impl FnOnce(&mut HistoryFilter)) {
        self.filter.update(f);
        self.page.set(1);
    }

    pub fn load_clientes(&self) {
        let vm = *self;
        let client = self.auth.client();
        spawn_local(async move {
            match cliente_api::list_active(&client).await {
                Ok(list) => vm.clientes.set(list),
                Err(e) => {
                    vm.auth.handle_error(&e);
                    log::warn!("Clientes for history filter: {}", e);
                }
            }
        });
    }

    pub fn fetch(&self, page: u32) {
        let query = self.filter.with_untracked(|f| f.to_query(page, PER_PAGE));
        let vm = *self;
        let client = self.auth.client();
        vm.is_loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match pedido_api::list(&client, &query).await {
                Ok(response) => {
                    vm.pedidos.set(response.items);
                    vm.pagination.set(Some(response.pagination));
                }
                Err(e) => {
                    vm.auth.handle_error(&e);
                    vm.error.set(Some(format!(
                        "Erro ao carregar pedidos: {}",
                        e.user_message()
                    )));
                }
            }
            vm.is_loading.set(false);
        });
    }

    /// Toggle the details panel; the full order is fetched on open
    pub fn show_details(&self, pedido_id: PedidoId) {
        if self.details.with_untracked(|d| d.as_ref().map(|p| p.id)) == Some(pedido_id) {
            self.details.set(None);
            return;
        }
        let vm = *self;
        let client = self.auth.client();
        spawn_local(async move {
            match pedido_api::get(&client, pedido_id).await {
                Ok(pedido) => vm.details.set(Some(pedido)),
                Err(e) => {
                    vm.auth.handle_error(&e);
                    vm.error.set(Some(format!(
                        "Erro ao carregar pedido #{}: {}",
                        pedido_id,
                        e.user_message()
                    )));
                }
            }
        });
    }

    /// Finalizado orders get the settlement receipt, the rest the order-out one
    pub fn reprint(&self, pedido_id: PedidoId, status: PedidoStatus) {
        let vm = *self;
        let client = self.auth.client();
        spawn_local(async move {
            let (bytes, kind) = if status == PedidoStatus::Finalizado {
                (pedido_api::imprimir_retorno(&client, pedido_id).await, "retorno")
            } else {
                (pedido_api::imprimir_saida(&client, pedido_id).await, "saida")
            };
            let result = bytes
                .map_err(|e| {
                    vm.auth.handle_error(&e);
                    e.user_message()
                })
                .and_then(|bytes| {
                    download_bytes(&bytes, PDF_MIME, &receipt_filename(kind, pedido_id.0))
                });
            match result {
                Ok(()) => vm.notice.set(Some("Nota gerada com sucesso".to_string())),
                Err(e) => {
                    log::error!("Reprint of pedido {} failed: {}", pedido_id, e);
                    vm.error.set(Some(format!("Erro ao imprimir: {}", e)));
                }
            }
        });
    }
}

use crate::domain::a001_cliente::api as cliente_api;
use crate::domain::a002_categoria::api as categoria_api;
use crate::domain::a003_produto::api as produto_api;
use crate::domain::a004_pedido::api as pedido_api;
use crate::shared::export::{download_bytes, receipt_filename, PDF_MIME};
use crate::system::auth::context::AuthContext;
use contracts::domain::a001_cliente::Cliente;
use contracts::domain::a002_categoria::{Categoria, CategoriaId};
use contracts::domain::a003_produto::{Produto, ProdutoId};
use contracts::domain::a004_pedido::PedidoId;
use contracts::usecases::u002_order_out::OrderOutCart;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use rust_decimal::Decimal;

#[derive(Clone, Copy)]
pub struct OrderOutViewModel {
    pub cart: RwSignal<OrderOutCart>,
    pub clientes: RwSignal<Vec<Cliente>>,
    pub categorias: RwSignal<Vec<Categoria>>,
    pub produtos: RwSignal<Vec<Produto>>,
    pub categoria_filter: RwSignal<Option<CategoriaId>>,
    pub loading: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub last_issued: RwSignal<Option<PedidoId>>,
    auth: AuthContext,
}

impl OrderOutViewModel {
    pub fn new(auth: AuthContext) -> Self {
        Self {
            cart: RwSignal::new(OrderOutCart::new()),
            clientes: RwSignal::new(Vec::new()),
            categorias: RwSignal::new(Vec::new()),
            produtos: RwSignal::new(Vec::new()),
            categoria_filter: RwSignal::new(None),
            loading: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            last_issued: RwSignal::new(None),
            auth,
        }
    }

    /// Active products of the selected category
    pub fn visible_produtos(&self) -> Vec<Produto> {
        let filter = self.categoria_filter.get();
        self.produtos.with(|produtos| {
            produtos
                .iter()
                .filter(|p| p.active)
                .filter(|p| filter.is_none() || p.categoria_id == filter)
                .cloned()
                .collect()
        })
    }

    pub fn quantity_in_cart(&self, produto_id: ProdutoId) -> Decimal {
        self.cart.with(|c| {
            c.lines
                .iter()
                .find(|l| l.produto_id == produto_id)
                .map(|l| l.quantidade)
                .unwrap_or(Decimal::ZERO)
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting.get() && self.cart.with(|c| c.validate().is_ok())
    }

    pub fn load(&self) {
        let vm = *self;
        let client = self.auth.client();
        vm.loading.set(true);
        spawn_local(async move {
            let clientes = cliente_api::list_active(&client).await;
            let categorias = categoria_api::list_active(&client).await;
            let produtos = produto_api::list_all(&client).await;
            match (clientes, categorias, produtos) {
                (Ok(clientes), Ok(categorias), Ok(produtos)) => {
                    vm.clientes.set(clientes);
                    vm.categorias.set(categorias);
                    vm.produtos.set(produtos);
                }
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                    vm.auth.handle_error(&e);
                    vm.error.set(Some(format!(
                        "Não foi possível carregar clientes e produtos: {}",
                        e.user_message()
                    )));
                }
            }
            vm.loading.set(false);
        });
    }

    pub fn add(&self, produto: &Produto, input: &str) {
        self.cart.update(|c| c.add_item_from_input(produto, input));
    }

    pub fn set_quantity(&self, produto_id: ProdutoId, quantidade: Decimal) {
        self.cart.update(|c| c.update_quantity(produto_id, quantidade));
    }

    pub fn submit(&self) {
        if self.is_submitting.get_untracked() {
            return;
        }
        self.error.set(None);

        let request = match self.cart.with_untracked(OrderOutCart::to_request) {
            Ok(request) => request,
            Err(e) => {
                self.error.set(Some(e.to_string()));
                return;
            }
        };
        log::info!(
            "Issuing order for cliente {} ({} items)",
            request.cliente_id,
            request.itens.len()
        );

        let vm = *self;
        let client = self.auth.client();
        vm.is_submitting.set(true);
        spawn_local(async move {
            match pedido_api::registrar_saida(&client, &request).await {
                Ok(response) => {
                    vm.notice.set(Some(
                        response
                            .message
                            .clone()
                            .unwrap_or_else(|| "Pedido de saída registrado com sucesso!".to_string()),
                    ));
                    vm.last_issued.set(Some(response.pedido.id));
                    vm.cart.set(OrderOutCart::new());
                    // stock changed on the server
                    vm.load();
                }
                Err(e) => {
                    log::error!("Order out failed: {}", e);
                    vm.auth.handle_error(&e);
                    vm.error.set(Some(e.user_message()));
                }
            }
            vm.is_submitting.set(false);
        });
    }

    pub fn download_receipt(&self) {
        let Some(pedido_id) = self.last_issued.get_untracked() else {
            return;
        };
        let vm = *self;
        let client = self.auth.client();
        spawn_local(async move {
            let result = pedido_api::imprimir_saida(&client, pedido_id)
                .await
                .map_err(|e| {
                    vm.auth.handle_error(&e);
                    e.user_message()
                })
                .and_then(|bytes| {
                    download_bytes(&bytes, PDF_MIME, &receipt_filename("saida", pedido_id.0))
                });
            if let Err(e) = result {
                log::error!("Receipt download failed: {}", e);
                vm.error.set(Some(format!("Erro ao gerar nota: {}", e)));
            }
        });
    }
}

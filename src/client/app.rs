//! 客户端应用控制器
//!
//! 状态（记录列表、待删除项）显式保存在 [`ClientState`] 中，
//! 每次变更成功后重新拉取列表，不做增量更新。

use tracing::{debug, error};

use super::api::ProductsApi;
use super::render::product_card;
use super::view::{
    CancelReason, ConnectionStatus, Key, ListState, Notification, PendingDelete, ProductCard, View,
};
use crate::app::produtos::model::{NewProduct, Product};

/// 创建表单的原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ProductForm {
    /// 客户端校验，失败时返回提示信息
    pub fn parse(&self) -> Result<NewProduct, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Por favor, informe o nome do produto".to_string());
        }

        let price = self
            .price
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| "Por favor, informe um preço válido".to_string())?;

        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(NewProduct {
            name: name.to_string(),
            price,
            description,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    /// 最近一次成功拉取的记录
    pub records: Vec<Product>,
    pub pending_delete: Option<PendingDelete>,
}

pub struct ClientApp<A, V> {
    api: A,
    view: V,
    state: ClientState,
}

impl<A: ProductsApi, V: View> ClientApp<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            state: ClientState::default(),
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 页面加载：探测连接，然后拉取列表
    pub async fn start(&mut self) {
        self.probe_connection().await;
        self.refresh().await;
    }

    pub async fn probe_connection(&mut self) -> ConnectionStatus {
        self.view.show_connection(ConnectionStatus::Loading);

        let status = match self.api.health().await {
            Ok(()) => ConnectionStatus::Online,
            Err(err) => {
                error!("API indisponível: {}", err);
                self.view
                    .notify(Notification::error("Não foi possível conectar ao servidor"));
                ConnectionStatus::Offline
            }
        };
        self.view.show_connection(status);
        if status.auto_hides() {
            self.view.hide_connection();
        }
        status
    }

    /// 拉取列表；失败时保留上次的记录，界面回到空状态
    pub async fn refresh(&mut self) -> bool {
        self.view.show_list_state(ListState::Loading);

        match self.api.list().await {
            Ok(records) => {
                debug!("carregados {} produtos", records.len());
                self.state.records = records;
                self.render();
                true
            }
            Err(err) => {
                self.view
                    .notify(Notification::error(format!("Erro ao carregar produtos: {}", err)));
                self.view.render_cards(&[]);
                self.view.show_list_state(ListState::Empty);
                false
            }
        }
    }

    pub fn render(&mut self) {
        if self.state.records.is_empty() {
            self.view.render_cards(&[]);
            self.view.show_list_state(ListState::Empty);
            return;
        }

        let cards: Vec<ProductCard> = self.state.records.iter().map(product_card).collect();
        self.view.render_cards(&cards);
        self.view.show_list_state(ListState::Populated);
    }

    /// 校验失败时不发请求
    pub async fn submit(&mut self, form: &ProductForm) -> bool {
        let product = match form.parse() {
            Ok(product) => product,
            Err(message) => {
                self.view.notify(Notification::warning(message));
                return false;
            }
        };

        self.view.set_submitting(true);
        let result = self.api.create(&product).await;
        self.view.set_submitting(false);

        match result {
            Ok(created) => {
                self.view.notify(Notification::success(format!(
                    "Produto \"{}\" adicionado com sucesso!",
                    created.name
                )));
                self.view.reset_form();
                self.refresh().await;
                true
            }
            Err(err) => {
                self.view
                    .notify(Notification::error(format!("Erro ao adicionar produto: {}", err)));
                false
            }
        }
    }

    /// 确认提示用的名称：优先本地记录，其次静默查询列表，都没有时用 `#id`
    ///
    /// 不触碰视图，查询失败也不阻止后续删除。
    pub async fn display_name(&self, id: i64) -> String {
        if let Some(product) = self.state.records.iter().find(|p| p.id == id) {
            return product.name.clone();
        }

        match self.api.list().await {
            Ok(records) => records
                .into_iter()
                .find(|p| p.id == id)
                .map(|p| p.name)
                .unwrap_or_else(|| format!("#{}", id)),
            Err(err) => {
                debug!("nome do produto {} indisponível: {}", id, err);
                format!("#{}", id)
            }
        }
    }

    pub fn request_delete(&mut self, id: i64, name: impl Into<String>) {
        let pending = PendingDelete {
            id,
            name: name.into(),
        };
        self.view.show_confirmation(&pending);
        self.state.pending_delete = Some(pending);
    }

    /// 没有待删除项时什么也不做
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(pending) = self.state.pending_delete.take() else {
            return false;
        };
        self.view.hide_confirmation();

        match self.api.delete(pending.id).await {
            Ok(_) => {
                self.view.notify(Notification::success(format!(
                    "Produto \"{}\" deletado com sucesso!",
                    pending.name
                )));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.view
                    .notify(Notification::error(format!("Erro ao deletar produto: {}", err)));
                false
            }
        }
    }

    pub fn cancel_delete(&mut self, reason: CancelReason) {
        if let Some(pending) = self.state.pending_delete.take() {
            debug!("exclusão de {} cancelada ({:?})", pending.id, reason);
            self.view.hide_confirmation();
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Escape => self.cancel_delete(CancelReason::EscapeKey),
        }
    }

    /// 页面级捕获的未处理错误
    pub fn report_uncaught(&mut self, detail: &str) {
        error!("erro não tratado: {}", detail);
        self.view
            .notify(Notification::error("Ocorreu um erro inesperado. Tente novamente."));
    }
}

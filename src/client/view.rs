//! 视图绑定
//!
//! 控制器只通过 [`View`] 操作界面，具体实现（终端、测试记录器）在构造时注入。

/// 连接状态横幅
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Loading,
    /// 显示后自动隐藏
    Online,
    /// 一直显示
    Offline,
}

impl ConnectionStatus {
    /// 为真时控制器在显示后立即调用 [`View::hide_connection`]
    pub fn auto_hides(self) -> bool {
        matches!(self, ConnectionStatus::Online)
    }
}

/// 列表区域的显示状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Empty,
    Populated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
}

/// 短暂显示的通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }
}

/// 一张产品卡片的显示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub created_at: String,
}

/// 等待用户确认的删除
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: i64,
    pub name: String,
}

/// 取消删除确认的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Button,
    Backdrop,
    EscapeKey,
}

/// 确认框打开时关心的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
}

pub trait View {
    fn show_connection(&mut self, status: ConnectionStatus);
    fn hide_connection(&mut self);
    fn show_list_state(&mut self, state: ListState);
    fn render_cards(&mut self, cards: &[ProductCard]);
    fn notify(&mut self, notification: Notification);
    /// 提交按钮的禁用/加载状态
    fn set_submitting(&mut self, busy: bool);
    fn reset_form(&mut self);
    fn show_confirmation(&mut self, pending: &PendingDelete);
    fn hide_confirmation(&mut self);
}

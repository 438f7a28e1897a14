//! 终端视图

use std::io::{self, BufRead, Write};

use super::view::{
    ConnectionStatus, ListState, Notification, NotificationKind, PendingDelete, ProductCard, View,
};

/// 把界面状态打印到终端，通知写到 stderr
#[derive(Debug, Default)]
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self
    }

    /// 读取一行确认输入；空行或 `n` 视为取消
    pub fn read_confirmation(&self, input: &mut impl BufRead) -> io::Result<bool> {
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(is_affirmative(&line))
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

impl View for TerminalView {
    fn show_connection(&mut self, status: ConnectionStatus) {
        match status {
            ConnectionStatus::Loading => {}
            ConnectionStatus::Online => println!("🟢 API online"),
            ConnectionStatus::Offline => println!("🔴 API offline"),
        }
    }

    fn hide_connection(&mut self) {}

    fn show_list_state(&mut self, state: ListState) {
        match state {
            ListState::Loading => {}
            ListState::Empty => println!("📦 Nenhum produto cadastrado"),
            ListState::Populated => {}
        }
    }

    fn render_cards(&mut self, cards: &[ProductCard]) {
        for card in cards {
            println!("#{:<5} {}  {}", card.id, card.name, card.price);
            if let Some(description) = &card.description {
                println!("       {}", description);
            }
            println!("       criado em {}", card.created_at);
        }
    }

    fn notify(&mut self, notification: Notification) {
        let icon = match notification.kind {
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
            NotificationKind::Warning => "⚠️",
        };
        eprintln!("{} {}", icon, notification.message);
    }

    fn set_submitting(&mut self, _busy: bool) {}

    fn reset_form(&mut self) {}

    fn show_confirmation(&mut self, pending: &PendingDelete) {
        print!("Deletar o produto \"{}\" (#{})? [s/N] ", pending.name, pending.id);
        let _ = io::stdout().flush();
    }

    fn hide_confirmation(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn only_explicit_yes_confirms() {
        let view = TerminalView::new();
        assert!(view.read_confirmation(&mut Cursor::new("sim\n")).unwrap());
        assert!(view.read_confirmation(&mut Cursor::new("Y\n")).unwrap());
        assert!(!view.read_confirmation(&mut Cursor::new("\n")).unwrap());
        assert!(!view.read_confirmation(&mut Cursor::new("n\n")).unwrap());
        assert!(!view.read_confirmation(&mut Cursor::new("")).unwrap());
    }
}

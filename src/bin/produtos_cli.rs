//! 产品管理终端客户端

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use produtos_api::client::{
    view::{CancelReason, ConnectionStatus},
    ApiClient, ClientApp, ProductForm, TerminalView,
};
use produtos_api::infrastructure::Logger;

#[derive(Debug, Parser)]
#[command(name = "produtos-cli", about = "Cliente de terminal da API de produtos")]
struct Cli {
    /// API 地址
    #[arg(long, env = "PRODUTOS_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 检查 API 连接
    Status,
    /// 列出所有产品
    List,
    /// 新增产品
    Add {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        preco: String,
        #[arg(long, default_value = "")]
        descricao: String,
    },
    /// 删除产品（需要确认）
    Delete {
        id: i64,
        /// 跳过确认
        #[arg(long)]
        yes: bool,
    },
}

type App = ClientApp<ApiClient, TerminalView>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = Logger::init_console(&cli.log_level) {
        eprintln!("日志初始化失败: {}", e);
    }

    let mut app = ClientApp::new(ApiClient::new(&cli.api_url), TerminalView::new());

    match run(&mut app, cli.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            app.report_uncaught(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &mut App, command: Command) -> anyhow::Result<bool> {
    let ok = match command {
        Command::Status => app.probe_connection().await == ConnectionStatus::Online,
        Command::List => app.refresh().await,
        Command::Add {
            nome,
            preco,
            descricao,
        } => {
            let form = ProductForm {
                name: nome,
                price: preco,
                description: descricao,
            };
            app.submit(&form).await
        }
        Command::Delete { id, yes } => {
            let name = app.display_name(id).await;
            app.request_delete(id, name);
            if yes {
                println!();
            }
            let confirmed = yes || app.view().read_confirmation(&mut io::stdin().lock())?;
            if confirmed {
                app.confirm_delete().await
            } else {
                app.cancel_delete(CancelReason::Button);
                println!("Exclusão cancelada");
                true
            }
        }
    };

    Ok(ok)
}

//! 产品 API 服务入口

use std::sync::Arc;

use produtos_api::{
    build_router,
    config::StoreBackend,
    core::error::AVAILABLE_ROUTES,
    infrastructure::{
        store::{MemoryStore, ProductStore, SupabaseStore},
        Logger,
    },
    AppState, Config,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 缺少存储凭据时直接退出
    let config = Config::load()?;
    let _guard = Logger::init(&config.logging)?;

    info!("启动产品 API 服务...");

    let store: Arc<dyn ProductStore> = match config.store.backend {
        StoreBackend::Supabase => {
            let store = SupabaseStore::new(&config.store)?;
            info!("存储: {}", store.endpoint());
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("使用内存存储，重启后数据会丢失");
            Arc::new(MemoryStore::new())
        }
    };

    let app = build_router(AppState::new(store));

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 产品 API 运行在 http://{}", addr);
    for route in AVAILABLE_ROUTES {
        info!("   {}", route);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("无法监听 Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，正在退出...");
}

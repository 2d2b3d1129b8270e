use sales_method_dashboard::{api, AppConfig, AppError, DashboardService, DatasetCache};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 加载数据集 (进程内只读取一次, 失败直接退出)
    let dataset = DatasetCache::global().get_or_load(&config.dataset.path)?;
    info!("Dataset ready: {} records", dataset.len());

    let service = Arc::new(DashboardService::new(dataset));
    let app = api::router(service);

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/filters    - filter options");
    info!("  POST /api/dashboard  - KPIs and summaries for a selection");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

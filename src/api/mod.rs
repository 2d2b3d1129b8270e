pub mod handlers;

pub use handlers::{dashboard, filter_options, health_check, DashboardRequest, DashboardResponse};

use crate::service::DashboardService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// 构建路由
pub fn router(service: Arc<DashboardService>) -> Router {
    let dashboard_routes = Router::new()
        .route("/api/filters", get(filter_options))
        .route("/api/dashboard", post(dashboard))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(dashboard_routes)
        .layer(ServiceBuilder::new())
}

use crate::models::{
    DashboardSnapshot, DateInterval, FilterSelection, RegionFilter, SalesMethod,
    UnknownSalesMethod,
};
use crate::service::{DashboardService, FilterOptions};
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// 请求体: 省略的字段使用默认筛选
#[derive(Debug, Default, Deserialize)]
pub struct DashboardRequest {
    /// 缺省、null 或 "All" 表示全部地区
    pub region: Option<String>,
    pub retailers: Option<BTreeSet<String>>,
    pub channels: Option<Vec<String>>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DashboardRequest {
    /// 与默认筛选合并为完整的 FilterSelection
    pub fn into_selection(
        self,
        defaults: &FilterSelection,
    ) -> Result<FilterSelection, UnknownSalesMethod> {
        let region = match self.region {
            Some(r) if !r.eq_ignore_ascii_case("all") => RegionFilter::Only(r),
            _ => RegionFilter::All,
        };

        let channels = match self.channels {
            Some(names) => names
                .iter()
                .map(|n| n.parse::<SalesMethod>())
                .collect::<Result<BTreeSet<_>, _>>()?,
            None => defaults.channels.clone(),
        };

        Ok(FilterSelection {
            region,
            retailers: self.retailers.unwrap_or_else(|| defaults.retailers.clone()),
            channels,
            date_interval: DateInterval::new(
                self.start.unwrap_or(defaults.date_interval.start),
                self.end.unwrap_or(defaults.date_interval.end),
            ),
        })
    }
}

/// 响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub message: String,
    pub snapshot: Option<DashboardSnapshot>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 筛选面板可选项
pub async fn filter_options(State(service): State<Arc<DashboardService>>) -> Json<FilterOptions> {
    Json(service.filter_options())
}

/// 按筛选条件计算看板数据
pub async fn dashboard(
    State(service): State<Arc<DashboardService>>,
    Json(req): Json<DashboardRequest>,
) -> Response {
    match req.into_selection(service.default_selection()) {
        Ok(selection) => {
            let snapshot = service.evaluate(&selection);
            let response = DashboardResponse {
                success: true,
                message: format!("Matched {} records", snapshot.row_count),
                snapshot: Some(snapshot),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::warn!("Rejected dashboard request: {}", e);
            let response = DashboardResponse {
                success: false,
                message: format!("Error: {}", e),
                snapshot: None,
            };
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
    }
}

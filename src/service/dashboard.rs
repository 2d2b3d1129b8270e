use crate::models::{
    Dataset, DashboardSnapshot, Dimension, FilterSelection, QueryWarning,
};
use crate::service::{aggregate, filter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 筛选面板的可选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub retailers: Vec<String>,
    pub channels: Vec<String>,
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

/// 看板服务: 每次筛选变化做一次完整的 筛选 -> 聚合
///
/// 数据集只读共享, 各请求之间没有可变状态。
pub struct DashboardService {
    dataset: Arc<Dataset>,
    default_selection: FilterSelection,
}

impl DashboardService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let default_selection = FilterSelection::everything(&dataset);
        Self {
            dataset,
            default_selection,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// 初始筛选: 全部地区/零售商/销售方式, 完整日期范围
    pub fn default_selection(&self) -> &FilterSelection {
        &self.default_selection
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            regions: filter::available_values(&self.dataset, Dimension::Region),
            retailers: filter::available_values(&self.dataset, Dimension::Retailer),
            channels: filter::available_values(&self.dataset, Dimension::Channel),
            date_bounds: self.dataset.date_bounds(),
        }
    }

    pub fn evaluate(&self, selection: &FilterSelection) -> DashboardSnapshot {
        let start_time = std::time::Instant::now();
        let subset = filter::apply(&self.dataset, selection);

        let mut warnings = Vec::new();
        if selection.date_interval.is_inverted() {
            tracing::warn!(
                "Date interval inverted ({} > {}), treating as empty",
                selection.date_interval.start,
                selection.date_interval.end
            );
            warnings.push(QueryWarning::InvertedInterval);
        }
        if subset.is_empty() {
            tracing::warn!("筛选结果为空: {:?}", selection);
            warnings.push(QueryWarning::EmptyResult);
        }

        let snapshot = aggregate::snapshot(&subset, warnings);
        tracing::debug!(
            "Dashboard evaluated: {}/{} records matched, 耗时: {:?}",
            snapshot.row_count,
            self.dataset.len(),
            start_time.elapsed()
        );
        snapshot
    }
}

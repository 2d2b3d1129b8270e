use crate::models::{Dataset, SalesMethod};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 可筛选的维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Region,
    Retailer,
    Channel,
}

/// 地区筛选: 全部地区 或 指定一个地区
///
/// JSON 中 `null` 表示全部地区。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum RegionFilter {
    #[default]
    All,
    Only(String),
}

impl RegionFilter {
    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(wanted) => wanted == region,
        }
    }
}

impl From<Option<String>> for RegionFilter {
    fn from(value: Option<String>) -> Self {
        value.map_or(RegionFilter::All, RegionFilter::Only)
    }
}

impl From<RegionFilter> for Option<String> {
    fn from(value: RegionFilter) -> Self {
        match value {
            RegionFilter::All => None,
            RegionFilter::Only(region) => Some(region),
        }
    }
}

/// 闭区间 [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// start > end 时区间为空
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// 当前生效的筛选条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub region: RegionFilter,
    pub retailers: BTreeSet<String>,
    pub channels: BTreeSet<SalesMethod>,
    pub date_interval: DateInterval,
}

impl FilterSelection {
    /// 默认筛选: 全部地区、全部零售商、全部销售方式、数据的完整日期范围
    ///
    /// 空数据集时日期区间退化为 `NaiveDate::MIN..=NaiveDate::MAX`。
    pub fn everything(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));

        Self {
            region: RegionFilter::All,
            retailers: dataset.records().iter().map(|r| r.retailer.clone()).collect(),
            channels: dataset.records().iter().map(|r| r.channel).collect(),
            date_interval: DateInterval::new(start, end),
        }
    }
}

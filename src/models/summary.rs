use crate::models::SalesMethod;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 按销售方式汇总的销售额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSales {
    pub channel: SalesMethod,
    pub total_sales: BigDecimal,
}

/// 按 月份 x 销售方式 汇总的销售额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyChannelSales {
    pub month: NaiveDate,
    pub channel: SalesMethod,
    pub total_sales: BigDecimal,
}

/// 按销售方式的平均营业利润率 (简单平均)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMargin {
    pub channel: SalesMethod,
    pub average_margin: BigDecimal,
}

/// 按 产品 x 销售方式 汇总的销售额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductChannelSales {
    pub product: String,
    pub channel: SalesMethod,
    pub total_sales: BigDecimal,
}

/// KPI 指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_sales: BigDecimal,
    pub total_profit: BigDecimal,
    /// 无数据时为 None (不是 0)
    pub average_margin: Option<BigDecimal>,
}

/// 非致命的查询提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryWarning {
    EmptyResult,
    InvertedInterval,
}

/// 一次筛选对应的全部看板数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub row_count: usize,
    pub kpis: KpiSummary,
    pub sales_by_channel: Vec<ChannelSales>,
    pub monthly_sales_by_channel: Vec<MonthlyChannelSales>,
    pub margin_by_channel: Vec<ChannelMargin>,
    pub sales_by_product_and_channel: Vec<ProductChannelSales>,
    pub warnings: Vec<QueryWarning>,
}

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 销售方式 (Sales Method)
///
/// 变体声明顺序与显示名称的字典序一致，`Ord` 即字典序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SalesMethod {
    #[serde(rename = "In-store")]
    InStore,
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "Outlet")]
    Outlet,
}

impl SalesMethod {
    pub const ALL: [SalesMethod; 3] = [SalesMethod::InStore, SalesMethod::Online, SalesMethod::Outlet];

    pub fn as_str(&self) -> &'static str {
        match self {
            SalesMethod::InStore => "In-store",
            SalesMethod::Online => "Online",
            SalesMethod::Outlet => "Outlet",
        }
    }
}

impl fmt::Display for SalesMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的销售方式名称
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSalesMethod(pub String);

impl fmt::Display for UnknownSalesMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sales method '{}'", self.0)
    }
}

impl std::error::Error for UnknownSalesMethod {}

impl FromStr for SalesMethod {
    type Err = UnknownSalesMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SalesMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSalesMethod(trimmed.to_string()))
    }
}

/// 单条销售记录 (一行交易)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub region: String,
    pub retailer: String,
    pub channel: SalesMethod,
    pub product: String,
    pub invoice_date: NaiveDate,
    pub total_sales: BigDecimal,
    pub operating_profit: BigDecimal,
    pub operating_margin: BigDecimal, // 小数形式, 0.35 = 35%
    pub month_bucket: NaiveDate,      // 加载时由 invoice_date 派生
}

impl SalesRecord {
    /// 构建记录并派生月份桶
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        region: impl Into<String>,
        retailer: impl Into<String>,
        channel: SalesMethod,
        product: impl Into<String>,
        invoice_date: NaiveDate,
        total_sales: BigDecimal,
        operating_profit: BigDecimal,
        operating_margin: BigDecimal,
    ) -> Self {
        Self {
            region: region.into(),
            retailer: retailer.into(),
            channel,
            product: product.into(),
            invoice_date,
            total_sales,
            operating_profit,
            operating_margin,
            month_bucket: month_bucket(invoice_date),
        }
    }
}

/// 截断到当月第一天
pub fn month_bucket(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 内存数据集，加载后不可变
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 最早与最晚的发票日期, 空数据集返回 None
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.invoice_date).min()?;
        let max = self.records.iter().map(|r| r.invoice_date).max()?;
        Some((min, max))
    }
}

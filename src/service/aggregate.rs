//! 聚合计算: KPI 与四张分组汇总表
//!
//! 所有函数都是 `FilteredSubset` 的纯函数。分组只为子集中实际出现的键生成行,
//! 每条记录只计入一个分组。分组键按 `BTreeMap` 排序输出, 多次调用顺序一致。

use crate::models::{
    ChannelMargin, ChannelSales, DashboardSnapshot, KpiSummary, MonthlyChannelSales,
    ProductChannelSales, QueryWarning, SalesMethod, SalesRecord,
};
use crate::service::filter::FilteredSubset;
use bigdecimal::{BigDecimal, Zero};
use std::collections::BTreeMap;

/// 简单平均的累加器
#[derive(Debug, Default)]
struct MeanAcc {
    sum: BigDecimal,
    count: i64,
}

impl MeanAcc {
    fn push(&mut self, value: &BigDecimal) {
        self.sum = &self.sum + value;
        self.count += 1;
    }

    fn mean(self) -> Option<BigDecimal> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / BigDecimal::from(self.count))
    }
}

fn sum_by<'a, F>(subset: &FilteredSubset<'a>, field: F) -> BigDecimal
where
    F: Fn(&'a SalesRecord) -> &'a BigDecimal,
{
    subset
        .iter()
        .fold(BigDecimal::zero(), |acc, r| acc + field(r))
}

fn group_sales<'a, K, F>(subset: &FilteredSubset<'a>, key: F) -> BTreeMap<K, BigDecimal>
where
    K: Ord,
    F: Fn(&'a SalesRecord) -> K,
{
    let mut groups: BTreeMap<K, BigDecimal> = BTreeMap::new();
    for record in subset.iter() {
        let entry = groups.entry(key(record)).or_insert_with(BigDecimal::zero);
        *entry = &*entry + &record.total_sales;
    }
    groups
}

/// 销售额合计, 空子集为 0
pub fn total_sales(subset: &FilteredSubset<'_>) -> BigDecimal {
    sum_by(subset, |r| &r.total_sales)
}

/// 营业利润合计, 空子集为 0
pub fn total_profit(subset: &FilteredSubset<'_>) -> BigDecimal {
    sum_by(subset, |r| &r.operating_profit)
}

/// 营业利润率的简单平均 (非按销售额加权)
///
/// 空子集返回 `None`: "没有数据" 与 "利润率为 0" 含义不同。
pub fn average_margin(subset: &FilteredSubset<'_>) -> Option<BigDecimal> {
    let mut acc = MeanAcc::default();
    for record in subset.iter() {
        acc.push(&record.operating_margin);
    }
    acc.mean()
}

pub fn sales_by_channel(subset: &FilteredSubset<'_>) -> Vec<ChannelSales> {
    group_sales(subset, |r| r.channel)
        .into_iter()
        .map(|(channel, total_sales)| ChannelSales { channel, total_sales })
        .collect()
}

/// 按月份升序, 同月按销售方式排序
pub fn monthly_sales_by_channel(subset: &FilteredSubset<'_>) -> Vec<MonthlyChannelSales> {
    group_sales(subset, |r| (r.month_bucket, r.channel))
        .into_iter()
        .map(|((month, channel), total_sales)| MonthlyChannelSales {
            month,
            channel,
            total_sales,
        })
        .collect()
}

pub fn margin_by_channel(subset: &FilteredSubset<'_>) -> Vec<ChannelMargin> {
    let mut groups: BTreeMap<SalesMethod, MeanAcc> = BTreeMap::new();
    for record in subset.iter() {
        groups
            .entry(record.channel)
            .or_default()
            .push(&record.operating_margin);
    }

    // 分组来自已有记录, count 至少为 1
    groups
        .into_iter()
        .filter_map(|(channel, acc)| {
            acc.mean().map(|average_margin| ChannelMargin {
                channel,
                average_margin,
            })
        })
        .collect()
}

pub fn sales_by_product_and_channel(subset: &FilteredSubset<'_>) -> Vec<ProductChannelSales> {
    group_sales(subset, |r| (r.product.as_str(), r.channel))
        .into_iter()
        .map(|((product, channel), total_sales)| ProductChannelSales {
            product: product.to_string(),
            channel,
            total_sales,
        })
        .collect()
}

pub fn kpis(subset: &FilteredSubset<'_>) -> KpiSummary {
    KpiSummary {
        total_sales: total_sales(subset),
        total_profit: total_profit(subset),
        average_margin: average_margin(subset),
    }
}

/// 一次性计算看板所需的全部汇总
pub fn snapshot(subset: &FilteredSubset<'_>, warnings: Vec<QueryWarning>) -> DashboardSnapshot {
    DashboardSnapshot {
        row_count: subset.len(),
        kpis: kpis(subset),
        sales_by_channel: sales_by_channel(subset),
        monthly_sales_by_channel: monthly_sales_by_channel(subset),
        margin_by_channel: margin_by_channel(subset),
        sales_by_product_and_channel: sales_by_product_and_channel(subset),
        warnings,
    }
}

use crate::models::{Dataset, Dimension, FilterSelection, SalesRecord};
use std::collections::BTreeSet;

/// 筛选结果: 借用数据集中满足全部条件的记录, 保持原始顺序
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredSubset<'a> {
    records: Vec<&'a SalesRecord>,
}

impl<'a> FilteredSubset<'a> {
    pub fn new(records: Vec<&'a SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 某维度下去重并按字典序排序的可选值
pub fn available_values(dataset: &Dataset, dimension: Dimension) -> Vec<String> {
    let values: BTreeSet<&str> = dataset
        .records()
        .iter()
        .map(|r| match dimension {
            Dimension::Region => r.region.as_str(),
            Dimension::Retailer => r.retailer.as_str(),
            Dimension::Channel => r.channel.as_str(),
        })
        .collect();
    values.into_iter().map(str::to_string).collect()
}

/// 单条记录是否满足全部筛选条件
pub fn matches(selection: &FilterSelection, record: &SalesRecord) -> bool {
    selection.region.matches(&record.region)
        && selection.retailers.contains(&record.retailer)
        && selection.channels.contains(&record.channel)
        && selection.date_interval.contains(record.invoice_date)
}

/// 应用筛选; 无匹配或区间倒置时返回空结果
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredSubset<'a> {
    if selection.date_interval.is_inverted() {
        return FilteredSubset::default();
    }

    FilteredSubset::new(
        dataset
            .records()
            .iter()
            .filter(|r| matches(selection, r))
            .collect(),
    )
}

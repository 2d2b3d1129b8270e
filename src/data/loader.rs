//! CSV 销售数据加载
//!
//! 必需列 (列名区分大小写):
//!   State, Retailer, Sales Method, Product, Invoice Date,
//!   Total Sales, Operating Profit, Operating Margin
//! 其他列忽略。任何一行出错即拒绝整个加载。

use crate::error::LoadError;
use crate::models::{Dataset, SalesMethod, SalesRecord};
use bigdecimal::{BigDecimal, Zero};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

pub const COL_REGION: &str = "State";
pub const COL_RETAILER: &str = "Retailer";
pub const COL_CHANNEL: &str = "Sales Method";
pub const COL_PRODUCT: &str = "Product";
pub const COL_INVOICE_DATE: &str = "Invoice Date";
pub const COL_TOTAL_SALES: &str = "Total Sales";
pub const COL_OPERATING_PROFIT: &str = "Operating Profit";
pub const COL_OPERATING_MARGIN: &str = "Operating Margin";

pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_REGION,
    COL_RETAILER,
    COL_CHANNEL,
    COL_PRODUCT,
    COL_INVOICE_DATE,
    COL_TOTAL_SALES,
    COL_OPERATING_PROFIT,
    COL_OPERATING_MARGIN,
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];

/// CSV 原始行, 数值先按字符串读取以保证十进制精度
#[derive(Debug, Deserialize)]
struct RawSalesRow {
    #[serde(rename = "State")]
    region: String,
    #[serde(rename = "Retailer")]
    retailer: String,
    #[serde(rename = "Sales Method")]
    channel: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Invoice Date")]
    invoice_date: String,
    #[serde(rename = "Total Sales")]
    total_sales: String,
    #[serde(rename = "Operating Profit")]
    operating_profit: String,
    #[serde(rename = "Operating Margin")]
    operating_margin: String,
}

impl RawSalesRow {
    fn into_record(self, line: u64) -> Result<SalesRecord, LoadError> {
        let channel = SalesMethod::from_str(&self.channel).map_err(|e| LoadError::UnknownChannel {
            line,
            value: e.0,
        })?;
        let invoice_date = parse_date(&self.invoice_date).ok_or_else(|| LoadError::InvalidDate {
            line,
            value: self.invoice_date.clone(),
        })?;
        let total_sales = parse_decimal(&self.total_sales, COL_TOTAL_SALES, line)?;
        if total_sales < BigDecimal::zero() {
            return Err(LoadError::NegativeSales {
                line,
                value: self.total_sales,
            });
        }
        let operating_profit = parse_decimal(&self.operating_profit, COL_OPERATING_PROFIT, line)?;
        let operating_margin = parse_decimal(&self.operating_margin, COL_OPERATING_MARGIN, line)?;

        Ok(SalesRecord::new(
            self.region,
            self.retailer,
            channel,
            self.product,
            invoice_date,
            total_sales,
            operating_profit,
            operating_margin,
        ))
    }
}

/// 解析发票日期, 带时间的格式丢弃时间部分
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_decimal(value: &str, column: &'static str, line: u64) -> Result<BigDecimal, LoadError> {
    BigDecimal::from_str(value.trim()).map_err(|_| LoadError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    })
}

/// 从任意 reader 加载数据集
pub fn load_dataset<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| LoadError::Csv { line: 1, source })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let fallback_line = idx as u64 + 2;
        let row = result.map_err(|source| LoadError::Csv {
            line: source.position().map_or(fallback_line, |p| p.line()),
            source,
        })?;
        let line = row.position().map_or(fallback_line, |p| p.line());
        let raw: RawSalesRow = row
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Csv { line, source })?;
        records.push(raw.into_record(line)?);
    }

    Ok(Dataset::new(records))
}

/// 从文件路径加载数据集
pub fn load_dataset_file(path: &Path) -> Result<Dataset, LoadError> {
    let start_time = std::time::Instant::now();
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = load_dataset(std::io::BufReader::new(file))?;
    tracing::info!(
        "Loaded {} sales records from {}, 耗时: {:?}",
        dataset.len(),
        path.display(),
        start_time.elapsed()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Retailer,Region,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin,Sales Method
Walmart,Northeast,New York,Men's Street Footwear,2021-01-15,100,40.5,0.5,Online
Foot Locker,South,Texas,Women's Apparel,01/20/2021,50.25,-5,-0.1,Outlet
Walmart,Northeast,New York,Men's Street Footwear,2021-02-10 00:00:00,200,80,0.4,In-store
";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn load_sample_csv() {
        let dataset = load_dataset(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);

        let first = &dataset.records()[0];
        assert_eq!(first.region, "New York");
        assert_eq!(first.retailer, "Walmart");
        assert_eq!(first.channel, SalesMethod::Online);
        assert_eq!(first.invoice_date, date(2021, 1, 15));
        assert_eq!(first.month_bucket, date(2021, 1, 1));
        assert_eq!(first.operating_profit, BigDecimal::from_str("40.5").unwrap());

        let second = &dataset.records()[1];
        assert_eq!(second.invoice_date, date(2021, 1, 20));
        assert_eq!(second.total_sales, BigDecimal::from_str("50.25").unwrap());
        assert_eq!(second.operating_margin, BigDecimal::from_str("-0.1").unwrap());

        let third = &dataset.records()[2];
        assert_eq!(third.channel, SalesMethod::InStore);
        assert_eq!(third.month_bucket, date(2021, 2, 1));
    }

    #[test]
    fn missing_column_rejects_load() {
        let csv_data = "\
Retailer,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin
Walmart,Ohio,Apparel,2021-01-15,100,40,0.4
";
        let err = load_dataset(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Sales Method")));
    }

    #[test]
    fn bad_date_rejects_whole_load() {
        let csv_data = "\
Retailer,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin,Sales Method
Walmart,Ohio,Apparel,2021-01-15,100,40,0.4,Online
Walmart,Ohio,Apparel,not-a-date,100,40,0.4,Online
";
        match load_dataset(csv_data.as_bytes()) {
            Err(LoadError::InvalidDate { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn bad_number_and_unknown_channel_are_rejected() {
        let bad_number = "\
Retailer,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin,Sales Method
Walmart,Ohio,Apparel,2021-01-15,$100,40,0.4,Online
";
        assert!(matches!(
            load_dataset(bad_number.as_bytes()),
            Err(LoadError::InvalidNumber { column: "Total Sales", .. })
        ));

        let bad_channel = "\
Retailer,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin,Sales Method
Walmart,Ohio,Apparel,2021-01-15,100,40,0.4,Catalog
";
        assert!(matches!(
            load_dataset(bad_channel.as_bytes()),
            Err(LoadError::UnknownChannel { line: 2, .. })
        ));
    }

    #[test]
    fn negative_sales_are_rejected() {
        let csv_data = "\
Retailer,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin,Sales Method
Walmart,Ohio,Apparel,2021-01-15,-1,40,0.4,Online
";
        assert!(matches!(
            load_dataset(csv_data.as_bytes()),
            Err(LoadError::NegativeSales { line: 2, .. })
        ));
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let csv_data = "Retailer,State,Product,Invoice Date,Total Sales,Operating Profit,Operating Margin,Sales Method\n";
        let dataset = load_dataset(csv_data.as_bytes()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = load_dataset_file(Path::new("/nonexistent/data_clean.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

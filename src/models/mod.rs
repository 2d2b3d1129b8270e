pub mod record;
pub mod selection;
pub mod summary;

pub use record::{month_bucket, Dataset, SalesMethod, SalesRecord, UnknownSalesMethod};
pub use selection::{DateInterval, Dimension, FilterSelection, RegionFilter};
pub use summary::{
    ChannelMargin, ChannelSales, DashboardSnapshot, KpiSummary, MonthlyChannelSales,
    ProductChannelSales, QueryWarning,
};

pub mod aggregate;
pub mod dashboard;
pub mod filter;

pub use dashboard::{DashboardService, FilterOptions};
pub use filter::{apply, available_values, FilteredSubset};

pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod service;

pub use config::AppConfig;
pub use data::DatasetCache;
pub use error::{AppError, LoadError};
pub use service::DashboardService;

pub mod cache;
pub mod loader;

pub use cache::DatasetCache;
pub use loader::{load_dataset, load_dataset_file, REQUIRED_COLUMNS};

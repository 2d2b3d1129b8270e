use crate::data::loader;
use crate::error::LoadError;
use crate::models::Dataset;
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

static GLOBAL_CACHE: OnceLock<DatasetCache> = OnceLock::new();

/// 数据集缓存: 同一数据源只读取一次, 进程生命周期内有效
///
/// 条目写入后不再修改也不淘汰; 加载失败不会写入缓存。
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: DashMap<PathBuf, Arc<Dataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级共享实例
    pub fn global() -> &'static DatasetCache {
        GLOBAL_CACHE.get_or_init(DatasetCache::new)
    }

    /// 获取已缓存的数据集, 未命中时从文件加载
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let key = cache_key(path);
        if let Some(hit) = self.entries.get(&key) {
            tracing::debug!("Dataset cache hit: {}", key.display());
            return Ok(Arc::clone(hit.value()));
        }

        // 读取文件时不持有分片锁
        let dataset = Arc::new(loader::load_dataset_file(path)?);

        // 并发加载同一数据源时以先写入者为准
        let entry = self.entries.entry(key).or_insert(dataset);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            dataset: DatasetConfig {
                path: PathBuf::from("data_clean.csv"),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> dashboard.{toml,yaml,json} (可选) -> 环境变量
    ///
    /// 环境变量形如 `DASHBOARD__SERVER__PORT=9000`、`DASHBOARD__DATASET__PATH=...`。
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::build(config::Environment::with_prefix("DASHBOARD").separator("__"))
    }

    fn build(env: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("dataset.path", defaults.dataset.path.display().to_string())?
            .add_source(config::File::with_name("dashboard").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

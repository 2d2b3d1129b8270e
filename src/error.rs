use thiserror::Error;

/// 数据集加载失败, 整个加载被拒绝 (不返回部分数据)
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: unparseable invoice date '{value}'")]
    InvalidDate { line: u64, value: String },

    #[error("line {line}: column '{column}' has unparseable number '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: unknown sales method '{value}'")]
    UnknownChannel { line: u64, value: String },

    #[error("line {line}: negative total sales '{value}'")]
    NegativeSales { line: u64, value: String },
}

/// 服务启动阶段的错误
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Dataset error: {0}")]
    Load(#[from] LoadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

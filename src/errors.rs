use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendRankError {
    /// Input table does not conform to the expected shape. Fatal for the run.
    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl TrendRankError {
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the error aborts a run and requires upstream data to be fixed.
    pub const fn is_schema_violation(&self) -> bool {
        matches!(self, Self::Schema(_) | Self::Serialization(_))
    }
}

pub type Result<T> = std::result::Result<T, TrendRankError>;

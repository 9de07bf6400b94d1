pub type RaceResult<T> = Result<T, RaceError>;

#[derive(thiserror::Error, Debug)]
pub enum RaceError {
    #[error("data load error: {0}")]
    DataLoad(String),

    #[error("lookup error: generation {generation} is not in the index")]
    Lookup { generation: u32 },

    #[error("config error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaceError {
    pub fn data_load(msg: impl Into<String>) -> Self {
        Self::DataLoad(msg.into())
    }

    pub fn lookup(generation: u32) -> Self {
        Self::Lookup { generation }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

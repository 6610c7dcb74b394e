#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("invalid map input: {0}")]
    InvalidInput(#[from] serde_json::Error),
    #[error("map input contains no trees")]
    EmptyHierarchy,
    #[error("invalid layout config: {0}")]
    InvalidConfig(String),
    #[error("malformed node id: `{0}`")]
    MalformedNodeId(String),
}

pub type Result<T> = std::result::Result<T, MapError>;

pub type ScrawlResult<T> = Result<T, ScrawlError>;

#[derive(thiserror::Error, Debug)]
pub enum ScrawlError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("sampling error: {0}")]
    Sampling(String),

    #[error("material error: {0}")]
    Material(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrawlError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn sampling(msg: impl Into<String>) -> Self {
        Self::Sampling(msg.into())
    }

    pub fn material(msg: impl Into<String>) -> Self {
        Self::Material(msg.into())
    }
}

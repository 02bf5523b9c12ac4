pub type FadeloopResult<T> = Result<T, FadeloopError>;

#[derive(thiserror::Error, Debug)]
pub enum FadeloopError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("empty gallery: {0}")]
    EmptyGallery(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FadeloopError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn empty_gallery(msg: impl Into<String>) -> Self {
        Self::EmptyGallery(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

use thiserror::Error;

pub type DrawResult<T> = Result<T, DrawError>;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Invalid axis or series configuration detected at construction time.
    #[error("domain error: {0}")]
    Domain(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl DrawError {
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }
}

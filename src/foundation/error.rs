pub type CakewalkResult<T> = Result<T, CakewalkError>;

#[derive(thiserror::Error, Debug)]
pub enum CakewalkError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("fill error: {0}")]
    Fill(String),

    #[error("color error: {0}")]
    Color(String),

    #[error("text error: {0}")]
    Text(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CakewalkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn fill(msg: impl Into<String>) -> Self {
        Self::Fill(msg.into())
    }

    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

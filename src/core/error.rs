use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid board status: {0:?} (expected \"PUBLIC\" or \"PRIVATE\")")]
    InvalidStatus(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Process exit code for the binary (sysexits.h values).
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidStatus(_)
            | AppError::InvalidRequest(_)
            | AppError::Serialization(_) => 65,
            AppError::Io(_) => 74,
            AppError::Config(_) => 78,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BbnError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Domain error: {what} = {value} lies outside the valid domain")]
    DomainError { what: String, value: f64 },

    #[error("Solver failure: {0}")]
    SolverFailure(String),

    #[error("Linear algebra error: {0}")]
    LinAlg(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BbnResult<T> = Result<T, BbnError>;

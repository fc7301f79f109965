use thiserror::Error;

/// Failures raised by a [`PhysicsBackend`](crate::physics::PhysicsBackend).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("unknown site `{0}`")]
    UnknownSite(String),
    #[error("{what}: expected {expected} values, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
}

#[derive(Error, Debug)]
pub enum ReacherError {
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReacherError>;

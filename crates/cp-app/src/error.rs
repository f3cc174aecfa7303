//! Error types for the cp-app service layer.

/// Application error type that wraps errors from the backend crates
/// behind one interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Project(String),

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for cp-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<cp_project::ProjectError> for AppError {
    fn from(err: cp_project::ProjectError) -> Self {
        match err {
            cp_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<cp_project::ValidationError> for AppError {
    fn from(err: cp_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<cp_sim::SimError> for AppError {
    fn from(err: cp_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<cp_results::ResultsError> for AppError {
    fn from(err: cp_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

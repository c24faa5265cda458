use crate::backend::BackendError;
use crate::metrics::EvalError;

/// Errors surfaced by the service facade.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The service could not be constructed from the given parts.
    #[error("build error: {0}")]
    BuildError(String),
    /// The request failed validation before any prediction ran. Transports
    /// should map this to a 422-class client error.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// The primary sentiment backend failed for this request.
    #[error("prediction error: {0}")]
    Prediction(#[from] BackendError),
    /// The evaluation run had no usable samples left.
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

impl ServiceError {
    /// Whether the caller, not the service, is at fault. Transports map
    /// client errors to 422 and everything else to 500.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::Evaluation(EvalError::InsufficientInput)
        )
    }
}

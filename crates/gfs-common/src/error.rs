//! Error taxonomy for the viewer pipeline.

use thiserror::Error;

/// Result type alias using ViewerError.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Primary error type for one viewer interaction.
///
/// Every variant is terminal for the current interaction only: it is
/// reported to the user and the shell stays ready for the next input.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Error loading dataset: {0}")]
    DataUnavailable(String),

    #[error("Forecast step {requested} is beyond the available range (0..{available})")]
    IndexOutOfRange { requested: usize, available: usize },

    #[error("The bounding box selects no grid points: {0}")]
    EmptySelection(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("No valid parameter was chosen: {0}")]
    UnrecognizedParameter(String),

    #[error("Invalid value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },
}

impl ViewerError {
    /// HTTP status the shell reports this error with.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ViewerError::InvalidParameter { .. }
            | ViewerError::UnrecognizedParameter(_)
            | ViewerError::IndexOutOfRange { .. }
            | ViewerError::EmptySelection(_) => 400,

            ViewerError::DataUnavailable(_) => 502,

            ViewerError::RenderError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ViewerError::UnrecognizedParameter("x".into()).http_status_code(),
            400
        );
        assert_eq!(
            ViewerError::DataUnavailable("timeout".into()).http_status_code(),
            502
        );
        assert_eq!(
            ViewerError::RenderError("shape".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_messages_name_the_failure() {
        let e = ViewerError::IndexOutOfRange {
            requested: 300,
            available: 241,
        };
        assert!(e.to_string().contains("300"));
        assert!(e.to_string().contains("241"));
    }
}

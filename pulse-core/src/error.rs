use thiserror::Error;

/// Shown for every upload failure; the underlying cause only goes to the log.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please check the CSV format.";

/// Rejected before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a CSV file")]
    NoFileSelected,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Request never produced a response (network, CORS, DNS, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// Response body was not an analysis result.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Aborted by the user or superseded by a newer upload.
    #[error("upload cancelled")]
    Cancelled,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PulseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl PulseError {
    /// Inline message for the upload form. Cancellation is silent.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Validation(e) => Some(e.to_string()),
            Self::Upload(UploadError::Cancelled) => None,
            Self::Upload(_) => Some(UPLOAD_FAILED_MESSAGE.to_string()),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Upload(UploadError::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let missing = PulseError::from(ValidationError::NoFileSelected);
        assert_eq!(missing.user_message().as_deref(), Some("Please select a CSV file"));

        for err in [
            UploadError::Status(500),
            UploadError::Transport("connection refused".into()),
            UploadError::Decode("expected value at line 1".into()),
        ] {
            assert_eq!(
                PulseError::from(err).user_message().as_deref(),
                Some(UPLOAD_FAILED_MESSAGE)
            );
        }

        let cancelled = PulseError::from(UploadError::Cancelled);
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.user_message(), None);
    }
}

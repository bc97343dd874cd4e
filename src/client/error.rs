use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Upload cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Upload timed out")]
    Timeout,

    #[error("File too large")]
    FileTooLarge,

    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unknown upload error: {0}")]
    Unknown(String),
}

impl UploadError {
    /// Text shown next to the upload field.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Cancelled => "Upload was cancelled.".to_string(),
            UploadError::Network(_) => {
                "Network error. Check your connection and try again.".to_string()
            }
            UploadError::Timeout => {
                "The upload took too long and timed out. Please try again.".to_string()
            }
            UploadError::FileTooLarge => "File is too large.".to_string(),
            UploadError::Rejected { message, .. } if !message.trim().is_empty() => {
                message.clone()
            }
            UploadError::Rejected { .. } => "The server rejected the upload.".to_string(),
            UploadError::Unknown(_) => "Upload failed. Please try again.".to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        !matches!(self, UploadError::FileTooLarge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_error_has_distinct_user_text() {
        let errors = [
            UploadError::Cancelled,
            UploadError::Network("reset".into()),
            UploadError::Timeout,
            UploadError::FileTooLarge,
            UploadError::Rejected {
                status: 415,
                message: "Only image and video files are allowed".into(),
            },
            UploadError::Unknown("bad json".into()),
        ];

        let mut messages: Vec<String> = errors.iter().map(|e| e.user_message()).collect();
        assert!(messages.iter().all(|m| !m.is_empty()));
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn rejected_without_message_falls_back() {
        let err = UploadError::Rejected {
            status: 500,
            message: "  ".into(),
        };
        assert_eq!(err.user_message(), "The server rejected the upload.");
    }
}

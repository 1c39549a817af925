use thiserror::Error;

/// Errors that prevent a verification attempt from completing.
///
/// A criteria mismatch is not an error; it is a normal outcome variant
/// (see `models::VerificationStatus::Mismatch`).
#[derive(Debug, Error)]
pub enum VisaError {
    #[error("Missing visa upload data: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),
}

impl VisaError {
    /// Message safe to return to the caller. Internal detail stays in the
    /// Display impl and the logs.
    pub fn public_message(&self) -> String {
        match self {
            VisaError::MissingFields(missing) => {
                format!("Missing visa upload data: {}", missing.join(", "))
            }
            VisaError::Storage(_) => "Failed to save uploaded file".to_string(),
            VisaError::EngineUnavailable(_) => {
                "Server configuration error: OCR engine not found.".to_string()
            }
            VisaError::UnsupportedFormat(_) => {
                "Uploaded file is not a valid or supported image format.".to_string()
            }
            VisaError::Extraction(_) => {
                "OCR processing failed or other internal error occurred.".to_string()
            }
        }
    }

    /// HTTP status the surrounding transport layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            VisaError::MissingFields(_) | VisaError::UnsupportedFormat(_) => 400,
            VisaError::Storage(_) | VisaError::EngineUnavailable(_) | VisaError::Extraction(_) => {
                500
            }
        }
    }
}

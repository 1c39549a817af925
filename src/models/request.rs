use crate::utils::VisaError;

/// The uploaded visa document: raw bytes plus the filename the client sent.
/// The filename is untrusted; `storage` sanitizes it before use.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(filename: Option<String>, bytes: Vec<u8>) -> Self {
        DocumentUpload { filename, bytes }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Expected-identity fields plus the document to verify them against.
/// All five text fields are opaque strings taken from the booking form.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub name: String,
    pub email: String,
    pub company: String,
    pub destination: String,
    pub phone: String,
    pub document: Option<DocumentUpload>,
}

impl VerificationRequest {
    /// Checks that every required input is present and non-empty.
    ///
    /// Collects ALL missing field names before failing so the caller can fix
    /// the whole form in one round trip.
    pub fn validate(&self) -> Result<(), VisaError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name".to_string());
        }
        if self.email.trim().is_empty() {
            missing.push("email".to_string());
        }
        if self.company.trim().is_empty() {
            missing.push("company".to_string());
        }
        if self.destination.trim().is_empty() {
            missing.push("destination".to_string());
        }
        if self.phone.trim().is_empty() {
            missing.push("phone number".to_string());
        }
        match &self.document {
            Some(doc) if !doc.is_empty() => {}
            _ => missing.push("visa file".to_string()),
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(VisaError::MissingFields(missing))
        }
    }
}

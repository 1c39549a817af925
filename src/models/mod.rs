pub mod outcome;
pub mod request;

pub use outcome::{FieldMatchResult, VerificationOutcome, VerificationResponse, VerificationStatus};
pub use request::{DocumentUpload, VerificationRequest};

use log::{error, info, warn};

use crate::models::{VerificationOutcome, VerificationRequest};
use crate::processing::TextExtractor;
use crate::storage::DocumentStore;
use crate::utils::VisaError;
use crate::verification::criteria;

/// Orchestrates a verification attempt: validate, store, extract, match,
/// decide. Holds its collaborators explicitly; nothing here is process-wide.
pub struct VisaVerifier<E: TextExtractor> {
    store: DocumentStore,
    extractor: E,
}

impl<E: TextExtractor> VisaVerifier<E> {
    pub fn new(store: DocumentStore, extractor: E) -> Self {
        VisaVerifier { store, extractor }
    }

    /// Runs the full verification procedure. Never panics and never leaves
    /// the stored document behind: the file is removed on every exit path
    /// (removal failure is logged, not propagated).
    pub fn verify(&self, request: &VerificationRequest) -> VerificationOutcome {
        match self.try_verify(request) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Visa verification error: {}", e);
                VerificationOutcome::from_error(&e)
            }
        }
    }

    fn try_verify(&self, request: &VerificationRequest) -> Result<VerificationOutcome, VisaError> {
        // Local validation happens before any file I/O.
        request.validate()?;

        let document = request
            .document
            .as_ref()
            .ok_or_else(|| VisaError::MissingFields(vec!["visa file".to_string()]))?;

        // Scoped: the file is deleted when `stored` drops, on every path out
        // of this function.
        let stored = self.store.store(document)?;

        let text = self.extractor.extract(stored.path())?;

        let result = criteria::evaluate(request, &text);
        if result.all_passed() {
            let age = result.age.unwrap_or_default();
            info!(
                "Visa verification SUCCESS for name='{}', destination='{}', age={}",
                request.name, request.destination, age
            );
            Ok(VerificationOutcome::success(age))
        } else {
            let failed = criteria::failed_criteria(request, &result);
            warn!(
                "Visa verification FAILED for name='{}', destination='{}': {}",
                request.name,
                request.destination,
                failed.join(", ")
            );
            Ok(VerificationOutcome::mismatch(failed, result.age))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use crate::models::{DocumentUpload, VerificationStatus};

    /// Extractor returning canned text, or a canned error.
    struct FixedExtractor(Result<String, &'static str>);

    impl TextExtractor for FixedExtractor {
        fn extract(&self, _path: &Path) -> Result<String, VisaError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(msg) => Err(VisaError::EngineUnavailable(msg.to_string())),
            }
        }
    }

    /// Extractor that echoes the stored file's bytes back as text, for
    /// checking that each request reads its own document.
    struct EchoExtractor;

    impl TextExtractor for EchoExtractor {
        fn extract(&self, path: &Path) -> Result<String, VisaError> {
            let bytes = fs::read(path).map_err(|e| VisaError::Extraction(e.to_string()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }

    fn request() -> VerificationRequest {
        VerificationRequest {
            name: "John Smith".to_string(),
            email: "john@corp.com".to_string(),
            company: "Corp Inc".to_string(),
            destination: "Paris".to_string(),
            phone: "555-123-4567".to_string(),
            document: Some(DocumentUpload::new(
                Some("visa.png".to_string()),
                b"placeholder".to_vec(),
            )),
        }
    }

    fn verifier(
        dir: &tempfile::TempDir,
        extractor: FixedExtractor,
    ) -> VisaVerifier<FixedExtractor> {
        VisaVerifier::new(DocumentStore::new(dir.path()).unwrap(), extractor)
    }

    #[test]
    fn test_success_with_all_fields_and_age() {
        let dir = tempfile::tempdir().unwrap();
        let text = "JOHN SMITH john@corp.com Corp Inc Paris (555) 123-4567\nAge: 34";
        let v = verifier(&dir, FixedExtractor(Ok(text.to_string())));

        let outcome = v.verify(&request());
        assert_eq!(outcome.status, VerificationStatus::Success);
        assert_eq!(outcome.age, Some(34));
        assert!(outcome.failed_criteria.is_empty());
        assert_eq!(outcome.http_status(), 200);
    }

    #[test]
    fn test_mismatch_lists_only_destination() {
        let dir = tempfile::tempdir().unwrap();
        let text = "JOHN SMITH john@corp.com Corp Inc Berlin (555) 123-4567\nAge: 34";
        let v = verifier(&dir, FixedExtractor(Ok(text.to_string())));

        let outcome = v.verify(&request());
        assert_eq!(outcome.status, VerificationStatus::Mismatch);
        assert_eq!(outcome.failed_criteria, vec!["destination (Paris)"]);
        assert_eq!(outcome.http_status(), 403);
    }

    #[test]
    fn test_mismatch_when_age_pattern_absent() {
        let dir = tempfile::tempdir().unwrap();
        let text = "JOHN SMITH john@corp.com Corp Inc Paris (555) 123-4567";
        let v = verifier(&dir, FixedExtractor(Ok(text.to_string())));

        let outcome = v.verify(&request());
        assert_eq!(outcome.status, VerificationStatus::Mismatch);
        assert_eq!(
            outcome.failed_criteria,
            vec!["age (expected format 'Age: XX')"]
        );
    }

    #[test]
    fn test_validation_failure_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let v = verifier(&dir, FixedExtractor(Ok(String::new())));

        let mut req = request();
        req.email = String::new();
        req.document = None;

        let outcome = v.verify(&req);
        assert_eq!(outcome.status, VerificationStatus::Error);
        assert!(outcome.message.contains("email"));
        assert!(outcome.message.contains("visa file"));
        assert_eq!(outcome.http_status(), 400);
        // No file was ever written.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_engine_failure_yields_error_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let v = verifier(&dir, FixedExtractor(Err("tesseract not installed")));

        let outcome = v.verify(&request());
        assert_eq!(outcome.status, VerificationStatus::Error);
        assert_eq!(
            outcome.message,
            "Server configuration error: OCR engine not found."
        );
        assert_eq!(outcome.http_status(), 500);
    }

    #[test]
    fn test_stored_file_removed_on_every_outcome() {
        let dir = tempfile::tempdir().unwrap();

        // Success path.
        let text = "JOHN SMITH john@corp.com Corp Inc Paris (555) 123-4567\nAge: 34";
        let v = verifier(&dir, FixedExtractor(Ok(text.to_string())));
        v.verify(&request());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        // Mismatch path.
        let v = verifier(&dir, FixedExtractor(Ok("nothing matches".to_string())));
        v.verify(&request());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        // Error path.
        let v = verifier(&dir, FixedExtractor(Err("boom")));
        v.verify(&request());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_concurrent_same_filename_requests_read_own_bytes() {
        use std::sync::Arc;
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        let v = Arc::new(VisaVerifier::new(
            DocumentStore::new(dir.path()).unwrap(),
            EchoExtractor,
        ));

        let handles: Vec<_> = ["Paris", "Berlin", "Tokyo", "Lima"]
            .into_iter()
            .map(|destination| {
                let v = Arc::clone(&v);
                thread::spawn(move || {
                    // Document text embeds this request's own destination;
                    // same original filename across all threads.
                    let text = format!(
                        "JOHN SMITH john@corp.com Corp Inc {} 555-123-4567 Age: 34",
                        destination
                    );
                    let mut req = request();
                    req.destination = destination.to_string();
                    req.document = Some(DocumentUpload::new(
                        Some("visa.png".to_string()),
                        text.into_bytes(),
                    ));

                    let outcome = v.verify(&req);
                    assert_eq!(outcome.status, VerificationStatus::Success);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

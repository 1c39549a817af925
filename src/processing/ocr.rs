use std::path::Path;

use log::{debug, warn};
use tesseract::Tesseract;

use crate::utils::VisaError;

/// Text-extraction capability over a stored document. Passed into the
/// verification engine explicitly so tests can substitute a canned
/// implementation and so no process-wide engine state is assumed.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, VisaError>;
}

/// Tesseract-backed extractor.
///
/// Raster images are decoded first so corrupt uploads fail with a distinct
/// "your file is bad" error before the engine runs. Container formats (pdf)
/// take a best-effort path: the file is handed to tesseract directly, and an
/// extraction failure there degrades to empty text instead of aborting.
pub struct TesseractExtractor {
    lang: String,
}

impl TesseractExtractor {
    pub fn new(lang: &str) -> Self {
        TesseractExtractor {
            lang: lang.to_string(),
        }
    }

    fn is_container_format(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false)
    }

    fn run_ocr(&self, path: &Path) -> Result<String, VisaError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| VisaError::Extraction("Non-UTF8 document path".to_string()))?;

        let mut tess = Tesseract::new(None, Some(self.lang.as_str()))
            .map_err(|e| VisaError::EngineUnavailable(format!("Tesseract init error: {}", e)))?
            .set_image(path_str)
            .map_err(|e| VisaError::Extraction(format!("Tesseract set image error: {}", e)))?;

        tess.get_text()
            .map_err(|e| VisaError::Extraction(format!("Tesseract error: {}", e)))
    }
}

impl Default for TesseractExtractor {
    fn default() -> Self {
        TesseractExtractor::new("eng")
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract(&self, path: &Path) -> Result<String, VisaError> {
        if Self::is_container_format(path) {
            warn!(
                "Container document {:?}: attempting best-effort OCR, text may be partial",
                path.file_name().unwrap_or_default()
            );
            return match self.run_ocr(path) {
                Ok(text) => Ok(text),
                // A missing engine is a server problem either way.
                Err(VisaError::EngineUnavailable(e)) => Err(VisaError::EngineUnavailable(e)),
                Err(e) => {
                    warn!("Best-effort OCR on container document failed: {}", e);
                    Ok(String::new())
                }
            };
        }

        // Decode check before OCR so undecodable bytes surface as a client
        // error rather than an opaque engine failure.
        image::open(path)
            .map_err(|e| VisaError::UnsupportedFormat(format!("Cannot decode image: {}", e)))?;

        let text = self.run_ocr(path)?;
        let sample: String = text.chars().take(500).collect();
        debug!("OCR output sample: {}", sample.replace('\n', "\\n"));
        Ok(text)
    }
}

pub mod extractors;
pub mod normalize;
pub mod ocr;

pub use extractors::extract_age;
pub use normalize::{normalize_phone, normalize_text};
pub use ocr::{TesseractExtractor, TextExtractor};

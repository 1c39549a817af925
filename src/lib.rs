pub mod models;
pub mod processing;
pub mod storage;
pub mod utils;
pub mod verification;

pub use verification::VisaVerifier;

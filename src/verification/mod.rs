pub mod criteria;
pub mod engine;

pub use engine::VisaVerifier;

pub mod error;

pub use error::VisaError;

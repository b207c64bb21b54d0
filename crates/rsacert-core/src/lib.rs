pub mod config;
pub mod error;
pub mod types;

pub use error::{CertError, CertResult, DecodeFailure, KeyFormatError};
pub use types::{KeyEncoding, KeySlot};

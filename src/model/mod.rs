pub mod decoder;
pub mod matrix;
pub mod scorer;
pub mod stats;
pub mod subtypes;
pub mod thresholds;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{capability}: {message}")]
pub struct CapabilityError {
    pub capability: &'static str,
    pub message: String,
}

impl CapabilityError {
    pub fn new(capability: &'static str, message: impl Into<String>) -> Self {
        Self {
            capability,
            message: message.into(),
        }
    }
}

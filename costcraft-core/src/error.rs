use thiserror::Error;

#[derive(Debug, Error)]
pub enum CostcraftError {
    #[error("Material '{0}' not found in the catalog")]
    MaterialNotFound(String),

    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Storage error for key '{0}': {1}")]
    Storage(String, #[source] std::io::Error),

    // Serialization failures surface through the same error type so the
    // store boundary stays a single fallible seam.
    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),
}

impl CostcraftError {
    /// Shorthand for a field-level validation failure.
    pub fn validation(field: &str, message: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

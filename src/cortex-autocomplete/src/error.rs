//! Error types for cortex-autocomplete.

use thiserror::Error;

/// Autocomplete error types.
///
/// The interaction logic itself never fails; these cover the imperative
/// input surface and configuration loading.
#[derive(Debug, Error)]
pub enum AutocompleteError {
    /// The input element does not exist (not rendered yet, or unmounted).
    #[error("Autocomplete input is not mounted")]
    NotMounted,

    /// A text range whose start lies after its end.
    #[error("Index size error: range start {start} is after end {end}")]
    IndexSize { start: usize, end: usize },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse autocomplete config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type for autocomplete operations.
pub type Result<T> = std::result::Result<T, AutocompleteError>;

//! JSON configuration files.

use std::path::Path;

use sentiarc_types::{ArcConfig, Result, SentimentError};
use tracing::debug;

/// Parses and validates a JSON config document.
///
/// Omitted fields keep their defaults; unknown fields are rejected.
///
/// # Errors
/// `SentimentError::InvalidConfiguration` for malformed JSON or values out
/// of range.
pub fn parse_config(json: &str) -> Result<ArcConfig> {
    let config: ArcConfig =
        serde_json::from_str(json).map_err(|e| SentimentError::InvalidConfiguration {
            reason: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}

/// Loads a JSON config file.
///
/// # Errors
/// I/O errors, plus everything [`parse_config`] rejects.
pub fn load_config(path: impl AsRef<Path>) -> Result<ArcConfig> {
    let path = path.as_ref();
    let config = parse_config(&std::fs::read_to_string(path)?)?;
    debug!(path = %path.display(), ?config, "loaded config");
    Ok(config)
}

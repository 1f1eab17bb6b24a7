//! JSON payload extraction from free-form model output.
//!
//! Models are asked to answer with a single JSON object, but in practice
//! wrap it in markdown fences or prose. Extraction tries a strict parse
//! first and then falls back to the span between the first `{` and the
//! last `}`. Failures come back as values, never as panics.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why no payload could be recovered from the response text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The text contains no `{...}` span at all
    #[error("response contains no JSON object")]
    NoObject,
    /// A candidate span was found but did not parse
    #[error("response JSON failed to parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Extract the JSON object embedded in `text`.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ExtractError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    // Strict parse first; most responses are already plain JSON.
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(cleaned) {
        if value.is_object() {
            return Ok(value);
        }
    }

    let start = cleaned.find('{').ok_or(ExtractError::NoObject)?;
    let end = cleaned.rfind('}').ok_or(ExtractError::NoObject)?;
    if end < start {
        return Err(ExtractError::NoObject);
    }

    Ok(serde_json::from_str(&cleaned[start..=end])?)
}

/// Extract and deserialize the embedded JSON object into `T`.
pub fn extract_payload<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    let value = extract_json(text)?;
    Ok(serde_json::from_value(value)?)
}

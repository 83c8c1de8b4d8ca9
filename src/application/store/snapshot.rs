// SPDX-License-Identifier: MPL-2.0
//! Byte form of the settings document.
//!
//! The persisted blob is compact JSON and exported snapshots are indented
//! JSON; both use the [`SettingsDocument`] layout. Decoding only checks that
//! the bytes are a UTF-8 JSON object and leaves field validation to the
//! merge.

use serde_json::Value;

use crate::domain::settings::Settings;

use super::document::SettingsDocument;

/// Compact bytes for the persisted slot.
///
/// # Errors
///
/// Returns the `serde_json` error if the document cannot be serialized.
pub fn encode(settings: &Settings) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&SettingsDocument::from_settings(settings))
}

/// Indented bytes for exported snapshots, ending with a newline.
///
/// # Errors
///
/// Returns the `serde_json` error if the document cannot be serialized.
pub fn encode_pretty(settings: &Settings) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(&SettingsDocument::from_settings(settings))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parses bytes into a document.
///
/// # Errors
///
/// Returns a short reason when the bytes are not UTF-8, not JSON, or not a
/// JSON object.
pub fn decode(bytes: &[u8]) -> Result<SettingsDocument, String> {
    let text = std::str::from_utf8(bytes).map_err(|err| format!("not UTF-8 text: {err}"))?;
    let text = text.trim_start_matches('\u{feff}');
    let root = match serde_json::from_str::<Value>(text) {
        Ok(root @ Value::Object(_)) => root,
        Ok(_) => return Err("expected a JSON object at the top level".to_string()),
        Err(err) => return Err(format!("not valid JSON: {err}")),
    };
    serde_json::from_value(root).map_err(|err| format!("not a settings document: {err}"))
}

//! Base64 decoding for share links
//!
//! Subscription content and ss:// userinfo appear in several Base64
//! variants; try them in order of likelihood, padding if needed.

use anyhow::{bail, Result};
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use tracing::trace;

/// Decodes Base64 content, trying multiple variants
///
/// Whitespace in the input is removed before decoding.
pub fn decode_base64(content: &str) -> Result<Vec<u8>> {
    let cleaned: String = content.chars().filter(|c| !c.is_whitespace()).collect();

    if let Ok(decoded) = STANDARD.decode(&cleaned) {
        trace!("decoded using standard Base64");
        return Ok(decoded);
    }
    if let Ok(decoded) = URL_SAFE.decode(&cleaned) {
        trace!("decoded using URL-safe Base64");
        return Ok(decoded);
    }
    if let Ok(decoded) = URL_SAFE_NO_PAD.decode(&cleaned) {
        trace!("decoded using URL-safe Base64 without padding");
        return Ok(decoded);
    }

    let padded = add_base64_padding(&cleaned);
    if let Ok(decoded) = STANDARD.decode(&padded) {
        trace!("decoded using standard Base64 with added padding");
        return Ok(decoded);
    }
    if let Ok(decoded) = URL_SAFE.decode(&padded) {
        trace!("decoded using URL-safe Base64 with added padding");
        return Ok(decoded);
    }

    bail!("content is not valid Base64")
}

/// Decodes Base64 that must contain UTF-8 text.
pub fn decode_base64_text(content: &str) -> Result<String> {
    let bytes = decode_base64(content)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encodes with the URL-safe alphabet and no padding, the variant share
/// links are written with.
pub fn encode_base64_url(content: &str) -> String {
    URL_SAFE_NO_PAD.encode(content.as_bytes())
}

fn add_base64_padding(content: &str) -> String {
    let mut padded = content.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

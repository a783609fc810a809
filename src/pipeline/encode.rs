//! Image payload encoding: bytes ↔ base64 data URIs.
//!
//! Code renderers hand images back as `data:image/<fmt>;base64,<payload>`
//! strings. Before an image can be written to disk the format prefix is
//! stripped and the payload decoded back to raw bytes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_DATA_URI_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/([A-Za-z0-9.+-]+);base64,").unwrap());

/// An image decoded from a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Format named in the URI prefix (`gif`, `png`, …), if there was one.
    pub format: Option<String>,
    pub bytes: Vec<u8>,
}

/// Wrap raw image bytes as a base64 data URI of the given format.
pub fn encode_data_uri(bytes: &[u8], format: &str) -> String {
    let b64 = STANDARD.encode(bytes);
    debug!("Encoded {} image → {} bytes base64", format, b64.len());
    format!("data:image/{format};base64,{b64}")
}

/// Strip the `data:image/<fmt>;base64,` prefix and decode the payload.
///
/// A string without the prefix is decoded as bare base64.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, base64::DecodeError> {
    let (format, payload) = match RE_DATA_URI_PREFIX.captures(uri) {
        Some(caps) => {
            let prefix_len = caps.get(0).map_or(0, |m| m.end());
            (Some(caps[1].to_ascii_lowercase()), &uri[prefix_len..])
        }
        None => (None, uri),
    };
    let bytes = STANDARD.decode(payload.trim())?;
    Ok(DecodedImage { format, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_strips_gif_prefix() {
        let uri = format!("data:image/gif;base64,{}", STANDARD.encode(b"GIF89a..."));
        let img = decode_data_uri(&uri).expect("valid data uri");
        assert_eq!(img.format.as_deref(), Some("gif"));
        assert_eq!(img.bytes, b"GIF89a...");
    }

    #[test]
    fn decode_accepts_bare_base64() {
        let img = decode_data_uri(&STANDARD.encode([0u8, 1, 2, 255])).unwrap();
        assert_eq!(img.format, None);
        assert_eq!(img.bytes, vec![0u8, 1, 2, 255]);
    }

    #[test]
    fn decoded_length_matches_payload() {
        // base64 of N bytes decodes to exactly N bytes, one per character of
        // the binary string.
        let raw: Vec<u8> = (0..=255u8).collect();
        let uri = encode_data_uri(&raw, "gif");
        let img = decode_data_uri(&uri).unwrap();
        assert_eq!(img.bytes.len(), 256);
        assert_eq!(img.bytes, raw);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_data_uri("data:image/gif;base64,@@not-base64@@").is_err());
    }

    #[test]
    fn encode_uses_format_prefix() {
        assert!(encode_data_uri(b"x", "png").starts_with("data:image/png;base64,"));
    }
}

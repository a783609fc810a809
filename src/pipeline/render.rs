//! Code rendering: identifier → QR image as a data URI.
//!
//! ## Why spawn_blocking?
//!
//! QR encoding plus GIF quantisation is pure CPU work; a 500 px code takes
//! long enough to stall a Tokio worker. [`render_code`] moves each call onto
//! the blocking pool and awaits it before the next sticker starts, so the
//! pipeline stays strictly sequential.

use crate::error::StickerError;
use crate::pipeline::encode::encode_data_uri;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Turns a payload string into an embedded image.
///
/// Returns a `data:image/<fmt>;base64,…` string; see
/// [`crate::pipeline::encode::decode_data_uri`].
pub trait CodeRenderer: Send + Sync {
    /// Render `payload` as a code whose edges are at least `size` pixels.
    fn render(&self, payload: &str, size: u32) -> Result<String, StickerError>;
}

/// QR codes encoded as GIF.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrRenderer;

impl CodeRenderer for QrRenderer {
    fn render(&self, payload: &str, size: u32) -> Result<String, StickerError> {
        let generation_error = |detail: String| StickerError::Generation {
            identifier: payload.to_string(),
            detail,
        };

        let code = QrCode::new(payload.as_bytes()).map_err(|e| generation_error(e.to_string()))?;
        let luma = code
            .render::<Luma<u8>>()
            .min_dimensions(size, size)
            .build();
        debug!(
            "Rendered QR for '{}' → {}x{} px",
            payload,
            luma.width(),
            luma.height()
        );

        // The GIF encoder only accepts RGB(A) input.
        let rgba = DynamicImage::ImageLuma8(luma).to_rgba8();
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Gif)
            .map_err(|e| generation_error(format!("GIF encoding failed: {e}")))?;

        Ok(encode_data_uri(&buf, "gif"))
    }
}

/// Run `renderer` on the blocking pool and wait for the result.
pub async fn render_code(
    renderer: &Arc<dyn CodeRenderer>,
    payload: &str,
    size: u32,
) -> Result<String, StickerError> {
    let renderer = Arc::clone(renderer);
    let payload = payload.to_string();

    tokio::task::spawn_blocking(move || renderer.render(&payload, size))
        .await
        .map_err(|e| StickerError::Internal(format!("Render task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encode::decode_data_uri;

    #[test]
    fn qr_renderer_emits_gif_data_uri() {
        let uri = QrRenderer.render("hello", 100).expect("render should succeed");
        assert!(uri.starts_with("data:image/gif;base64,"));

        let img = decode_data_uri(&uri).expect("valid base64");
        assert_eq!(img.format.as_deref(), Some("gif"));
        assert!(img.bytes.starts_with(b"GIF8"), "not a GIF header");
    }

    #[test]
    fn qr_renderer_honours_min_size() {
        let uri = QrRenderer.render("3f2504e0-4f89-41d3-9a0c-0305e82c3301", 200).unwrap();
        let bytes = decode_data_uri(&uri).unwrap().bytes;
        let img = image::load_from_memory_with_format(&bytes, ImageFormat::Gif)
            .expect("decodable gif");
        assert!(img.width() >= 200);
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn qr_renderer_rejects_oversized_payload() {
        // Larger than the 2953-byte capacity of a version 40 code.
        let payload = "x".repeat(5000);
        let err = QrRenderer.render(&payload, 100).unwrap_err();
        assert!(matches!(err, StickerError::Generation { .. }));
    }

    #[tokio::test]
    async fn render_code_runs_on_blocking_pool() {
        let renderer: Arc<dyn CodeRenderer> = Arc::new(QrRenderer);
        let uri = render_code(&renderer, "abc", 60).await.unwrap();
        assert!(uri.starts_with("data:image/gif;base64,"));
    }
}

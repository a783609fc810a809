//! Sticker generation: identifier → code image → file on disk.
//!
//! Stickers are produced one at a time. The first failure stops the loop and
//! is returned as-is; images written before it stay in the workspace.

use crate::config::SheetConfig;
use crate::error::StickerError;
use crate::output::Sticker;
use crate::pipeline::encode::decode_data_uri;
use crate::pipeline::identifier::{display_label, IdGenerator};
use crate::pipeline::render::{render_code, CodeRenderer};
use std::sync::Arc;
use tracing::info;

/// Generate `config.count` stickers, writing each image into `config.images_dir`.
pub async fn generate_stickers(
    config: &SheetConfig,
    ids: &Arc<dyn IdGenerator>,
    renderer: &Arc<dyn CodeRenderer>,
) -> Result<Vec<Sticker>, StickerError> {
    let total = config.count;
    let mut stickers = Vec::with_capacity(total);

    for index in 1..=total {
        let sticker = generate_one(config, ids.next_id(), renderer).await?;

        info!("QR code generated: {}", sticker.image_path.display());
        if let Some(ref cb) = config.progress_callback {
            cb.on_sticker_complete(index, total, &sticker.image_path);
        }
        stickers.push(sticker);
    }

    Ok(stickers)
}

/// Render, decode, and write a single sticker image.
async fn generate_one(
    config: &SheetConfig,
    identifier: String,
    renderer: &Arc<dyn CodeRenderer>,
) -> Result<Sticker, StickerError> {
    let uri = render_code(renderer, &identifier, config.code_size).await?;

    let image = decode_data_uri(&uri).map_err(|e| StickerError::Generation {
        identifier: identifier.clone(),
        detail: format!("renderer returned an undecodable payload: {e}"),
    })?;

    let image_path = config.image_path_for(&identifier);
    tokio::fs::write(&image_path, &image.bytes)
        .await
        .map_err(|e| StickerError::io(&image_path, e))?;

    Ok(Sticker {
        label: display_label(&identifier),
        identifier,
        image_path,
    })
}

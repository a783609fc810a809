//! Sheet entry points: run the whole pipeline once.

use crate::config::SheetConfig;
use crate::error::StickerError;
use crate::output::{SheetOutput, SheetStats};
use crate::pipeline::compile::{self, CompilerOptions};
use crate::pipeline::identifier::{IdGenerator, UuidGenerator};
use crate::pipeline::render::{CodeRenderer, QrRenderer};
use crate::pipeline::{generate, layout, workspace};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Generate a sticker sheet.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(SheetOutput)` once every image and the layout source are on disk,
/// even if the compiler failed (check `output.compile.error`, or call
/// [`SheetOutput::into_result`]).
///
/// # Errors
/// Returns `Err(StickerError)` only for fatal errors:
/// - The workspace cannot be created or cleared
/// - A code image cannot be rendered or written
/// - The layout source cannot be written
///
/// Files written before the failure are left in place.
pub async fn create_sheet(config: &SheetConfig) -> Result<SheetOutput, StickerError> {
    let total_start = Instant::now();
    info!("Starting sheet: {} stickers", config.count);

    let ids: Arc<dyn IdGenerator> = config
        .id_generator
        .clone()
        .unwrap_or_else(|| Arc::new(UuidGenerator));
    let renderer: Arc<dyn CodeRenderer> = config
        .renderer
        .clone()
        .unwrap_or_else(|| Arc::new(QrRenderer));

    // ── Step 1: Prepare workspace ────────────────────────────────────────
    let removed = workspace::prepare(&config.images_dir).await?;
    debug!("Workspace ready: {}", config.images_dir.display());

    if let Some(ref cb) = config.progress_callback {
        cb.on_sheet_start(config.count);
    }

    // ── Step 2: Generate identifiers and images ──────────────────────────
    let generate_start = Instant::now();
    let stickers = generate::generate_stickers(config, &ids, &renderer).await?;
    let generate_duration_ms = generate_start.elapsed().as_millis() as u64;
    info!(
        "Generated {} stickers in {}ms",
        stickers.len(),
        generate_duration_ms
    );

    // ── Step 3: Build layout ─────────────────────────────────────────────
    let document = layout::build_layout(&stickers, &config.geometry, config.source_dir());

    // ── Step 4: Write layout and compile ─────────────────────────────────
    let report = compile::write_and_compile(
        &document,
        &config.source_path,
        &config.output_path,
        &CompilerOptions::from(config),
        config.progress_callback.as_ref(),
    )
    .await?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_sheet_complete(stickers.len(), report.succeeded());
    }

    let stats = SheetStats {
        requested: config.count,
        generated: stickers.len(),
        removed_stale_files: removed,
        generate_duration_ms,
        compile_duration_ms: report.duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Sheet complete: {} stickers, compiled={}, {}ms total",
        stats.generated,
        report.succeeded(),
        stats.total_duration_ms
    );

    Ok(SheetOutput {
        stickers,
        layout: document,
        compile: report,
        stats,
    })
}

/// Synchronous wrapper around [`create_sheet`].
///
/// Creates a temporary tokio runtime internally.
pub fn create_sheet_sync(config: &SheetConfig) -> Result<SheetOutput, StickerError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| StickerError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(create_sheet(config))
}

//! # qr-stickers
//!
//! Generate a printable sheet of QR-code stickers. Each sticker pairs a
//! unique identifier (a random UUID by default) with a QR code encoding it
//! and a short label; the sheet is laid out as a Typst document and compiled
//! to PDF by the external `typst` binary.
//!
//! ## Pipeline Overview
//!
//! ```text
//! images/ ──┐
//!           ├─ 1. Workspace  create the image directory, delete stale files
//!           ├─ 2. Generate   UUID → QR → GIF data URI → images/QR_<uuid>.gif
//!           ├─ 3. Layout     fold stickers into qr_codes_stickers.typ
//!           └─ 4. Compile    typst compile qr_codes_stickers.typ qr_codes_stickers.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qr_stickers::{create_sheet, SheetConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SheetConfig::builder().count(24).build()?;
//!     let output = create_sheet(&config).await?;
//!     for sticker in &output.stickers {
//!         println!("{} → {}", sticker.label, sticker.image_path.display());
//!     }
//!     if let Some(err) = &output.compile.error {
//!         eprintln!("typst failed: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `qr-stickers` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod sheet;
pub mod template;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PageGeometry, SheetConfig, SheetConfigBuilder};
pub use error::{CompileError, StickerError};
pub use output::{CompileReport, SheetOutput, SheetStats, Sticker};
pub use pipeline::identifier::{IdGenerator, UuidGenerator};
pub use pipeline::layout::LayoutDocument;
pub use pipeline::render::{CodeRenderer, QrRenderer};
pub use progress::{NoopProgressCallback, ProgressCallback, SheetProgressCallback};
pub use sheet::{create_sheet, create_sheet_sync};

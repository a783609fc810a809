//! Progress-callback trait for per-sticker generation events.
//!
//! Inject an [`Arc<dyn SheetProgressCallback>`] via
//! [`crate::config::SheetConfigBuilder::progress_callback`] to receive events
//! as the pipeline writes each sticker and runs the compiler.
//!
//! # Example
//!
//! ```rust
//! use qr_stickers::{SheetConfig, SheetProgressCallback};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     written: AtomicUsize,
//! }
//!
//! impl SheetProgressCallback for CountingCallback {
//!     fn on_sticker_complete(&self, index: usize, total: usize, path: &Path) {
//!         self.written.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Sticker {}/{} → {}", index, total, path.display());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { written: AtomicUsize::new(0) });
//!
//! let config = SheetConfig::builder()
//!     .progress_callback(counter as Arc<dyn SheetProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the sheet pipeline as it moves through its stages.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait SheetProgressCallback: Send + Sync {
    /// Called once after the workspace is prepared, before any sticker is generated.
    ///
    /// # Arguments
    /// * `total` — number of stickers that will be generated
    fn on_sheet_start(&self, total: usize) {
        let _ = total;
    }

    /// Called after a sticker's image file has been written.
    ///
    /// # Arguments
    /// * `index` — 1-indexed sticker number
    /// * `total` — total stickers in this run
    /// * `path`  — the image file just written
    fn on_sticker_complete(&self, index: usize, total: usize, path: &Path) {
        let _ = (index, total, path);
    }

    /// Called once the layout source has been written to disk.
    fn on_layout_written(&self, path: &Path) {
        let _ = path;
    }

    /// Called just before the external compiler is launched.
    fn on_compile_start(&self, program: &str) {
        let _ = program;
    }

    /// Called once after the compiler step, whatever its outcome.
    ///
    /// # Arguments
    /// * `total`    — stickers on the sheet
    /// * `compiled` — whether the compiler produced the final document
    fn on_sheet_complete(&self, total: usize, compiled: bool) {
        let _ = (total, compiled);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl SheetProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::SheetConfig`].
pub type ProgressCallback = Arc<dyn SheetProgressCallback>;

//! Result types returned by a sheet run.

use crate::error::{CompileError, StickerError};
use crate::pipeline::layout::LayoutDocument;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One printable sticker: an identifier, its code image, and a short label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    pub identifier: String,
    pub image_path: PathBuf,
    /// The last characters of `identifier`, printed under the code.
    pub label: String,
}

/// Outcome of the external compiler step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReport {
    pub program: String,
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub duration_ms: u64,
    /// `None` when the compiler exited successfully.
    pub error: Option<CompileError>,
}

impl CompileReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Counters and timings for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetStats {
    pub requested: usize,
    pub generated: usize,
    /// Stale files removed from the workspace before generation.
    pub removed_stale_files: usize,
    pub generate_duration_ms: u64,
    pub compile_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetOutput {
    /// Stickers in generation order.
    pub stickers: Vec<Sticker>,
    #[serde(skip)]
    pub layout: LayoutDocument,
    pub compile: CompileReport,
    pub stats: SheetStats,
}

impl SheetOutput {
    /// Treat a compiler failure as an error.
    pub fn into_result(self) -> Result<SheetOutput, StickerError> {
        match self.compile.error {
            Some(ref e) => Err(StickerError::Compile(e.clone())),
            None => Ok(self),
        }
    }
}

//! Error types for the qr-stickers library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`StickerError`] — **Fatal**: the sheet cannot be produced at all
//!   (workspace not writable, a QR code could not be rendered). Returned as
//!   `Err(StickerError)` from the top-level `create_sheet*` functions. Files
//!   already written stay on disk so the failed run can be inspected.
//!
//! * [`CompileError`] — **Non-fatal**: every image and the layout source were
//!   written, but the external compiler could not turn them into a PDF. Stored
//!   inside [`crate::output::CompileReport`] so the caller still gets the
//!   stickers and can re-run the compiler by hand.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// All fatal errors returned by the qr-stickers library.
///
/// Compiler failures use [`CompileError`] and are stored in
/// [`crate::output::CompileReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum StickerError {
    // ── I/O errors ────────────────────────────────────────────────────────
    /// A filesystem operation (stat, mkdir, remove, write) failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workspace path exists but is not a directory.
    #[error("Workspace '{path}' exists but is not a directory")]
    NotADirectory { path: PathBuf },

    // ── Generation errors ─────────────────────────────────────────────────
    /// The code renderer failed to produce an image for an identifier.
    #[error("Failed to generate code image for '{identifier}': {detail}")]
    Generation { identifier: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Returned by [`crate::output::SheetOutput::into_result`] when the
    /// caller wants to treat a compiler failure as an error.
    #[error(transparent)]
    Compile(#[from] CompileError),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StickerError {
    /// Attach a path to an `std::io::Error`.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StickerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A non-fatal failure of the external document compiler.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum CompileError {
    /// The compiler process could not be started at all.
    #[error("Could not launch '{program}': {detail}\nIs it installed and on your PATH?")]
    Launch { program: String, detail: String },

    /// The compiler ran and exited with a nonzero status.
    #[error("'{program}' failed to compile the layout (exit code {code:?}):\n{diagnostics}")]
    Failed {
        program: String,
        code: Option<i32>,
        diagnostics: String,
    },

    /// The compiler did not finish in time and was killed.
    #[error("'{program}' timed out after {timeout:?} and was killed")]
    TimedOut { program: String, timeout: Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_display() {
        let e = StickerError::Generation {
            identifier: "abc".into(),
            detail: "data too long".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("abc"), "got: {msg}");
        assert!(msg.contains("data too long"), "got: {msg}");
    }

    #[test]
    fn io_display_includes_path() {
        let e = StickerError::io(
            "images/QR_1.gif",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(e.to_string().contains("images/QR_1.gif"));
    }

    #[test]
    fn launch_and_failed_messages_differ() {
        let launch = CompileError::Launch {
            program: "typst".into(),
            detail: "No such file or directory".into(),
        };
        let failed = CompileError::Failed {
            program: "typst".into(),
            code: Some(1),
            diagnostics: "error: unknown variable".into(),
        };
        assert!(launch.to_string().contains("Could not launch"));
        assert!(failed.to_string().contains("failed to compile"));
        assert!(failed.to_string().contains("unknown variable"));
        assert!(!launch.to_string().contains("failed to compile"));
    }

    #[test]
    fn compile_error_converts_into_sticker_error() {
        let e: StickerError = CompileError::TimedOut {
            program: "typst".into(),
            timeout: Duration::from_secs(5),
        }
        .into();
        assert!(e.to_string().contains("timed out after 5s"));
    }

    #[test]
    fn sub_second_timeout_keeps_its_unit() {
        let e = CompileError::TimedOut {
            program: "typst".into(),
            timeout: Duration::from_millis(200),
        };
        assert!(e.to_string().contains("timed out after 200ms"), "got: {e}");
    }
}

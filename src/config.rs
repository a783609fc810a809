//! Configuration types for sticker-sheet generation.
//!
//! All run behaviour is controlled through [`SheetConfig`], built via its
//! [`SheetConfigBuilder`]. The defaults reproduce the classic sheet: 24
//! stickers, images under `images/`, `qr_codes_stickers.typ` compiled by
//! `typst` into `qr_codes_stickers.pdf` in the working directory.

use crate::error::StickerError;
use crate::pipeline::identifier::IdGenerator;
use crate::pipeline::render::CodeRenderer;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Default number of stickers on a sheet.
pub const DEFAULT_COUNT: usize = 24;
/// Default directory holding generated code images.
pub const DEFAULT_IMAGES_DIR: &str = "images";
/// Default layout source file name.
pub const DEFAULT_SOURCE_PATH: &str = "qr_codes_stickers.typ";
/// Default compiled document file name.
pub const DEFAULT_OUTPUT_PATH: &str = "qr_codes_stickers.pdf";
/// Default external compiler.
pub const DEFAULT_COMPILER: &str = "typst";

/// Configuration for one sticker-sheet run.
///
/// Built via [`SheetConfig::builder()`] or using [`SheetConfig::default()`].
///
/// # Example
/// ```rust
/// use qr_stickers::SheetConfig;
///
/// let config = SheetConfig::builder()
///     .count(12)
///     .images_dir("out/images")
///     .source_path("out/sheet.typ")
///     .output_path("out/sheet.pdf")
///     .build()
///     .unwrap();
/// assert_eq!(config.count, 12);
/// ```
#[derive(Clone)]
pub struct SheetConfig {
    /// Number of stickers to generate. Default: 24.
    pub count: usize,

    /// Workspace directory for code images. Every plain file inside it is
    /// deleted at the start of a run. Default: `images`.
    pub images_dir: PathBuf,

    /// File-name prefix for each image, followed by the identifier. Default: `QR_`.
    pub file_prefix: String,

    /// Image file extension, without the dot. Default: `gif`.
    pub image_extension: String,

    /// Where the Typst layout source is written. Default: `qr_codes_stickers.typ`.
    pub source_path: PathBuf,

    /// Where the compiler writes the final document. Default: `qr_codes_stickers.pdf`.
    pub output_path: PathBuf,

    /// Compiler program, resolved through `PATH`. Default: `typst`.
    pub compiler: String,

    /// Minimum edge length of each rendered code, in pixels. Range: 50–4000. Default: 500.
    pub code_size: u32,

    /// Seconds the compiler may run before it is killed. Default: 120.
    pub compile_timeout_secs: u64,

    /// Page and grid geometry written into the layout header.
    pub geometry: PageGeometry,

    /// Identifier source. If None, random UUIDv4 strings are used.
    pub id_generator: Option<Arc<dyn IdGenerator>>,

    /// Code renderer. If None, [`crate::pipeline::render::QrRenderer`] is used.
    pub renderer: Option<Arc<dyn CodeRenderer>>,

    /// Progress events receiver. If None, no events are emitted.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            file_prefix: "QR_".to_string(),
            image_extension: "gif".to_string(),
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            compiler: DEFAULT_COMPILER.to_string(),
            code_size: 500,
            compile_timeout_secs: 120,
            geometry: PageGeometry::default(),
            id_generator: None,
            renderer: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for SheetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfig")
            .field("count", &self.count)
            .field("images_dir", &self.images_dir)
            .field("file_prefix", &self.file_prefix)
            .field("image_extension", &self.image_extension)
            .field("source_path", &self.source_path)
            .field("output_path", &self.output_path)
            .field("compiler", &self.compiler)
            .field("code_size", &self.code_size)
            .field("compile_timeout_secs", &self.compile_timeout_secs)
            .field("geometry", &self.geometry)
            .field("id_generator", &self.id_generator.as_ref().map(|_| "<dyn IdGenerator>"))
            .field("renderer", &self.renderer.as_ref().map(|_| "<dyn CodeRenderer>"))
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn SheetProgressCallback>"),
            )
            .finish()
    }
}

impl SheetConfig {
    /// Create a new builder for `SheetConfig`.
    pub fn builder() -> SheetConfigBuilder {
        SheetConfigBuilder {
            config: Self::default(),
        }
    }

    /// Path of the image file for `identifier` inside the workspace.
    pub fn image_path_for(&self, identifier: &str) -> PathBuf {
        self.images_dir.join(format!(
            "{}{}.{}",
            self.file_prefix, identifier, self.image_extension
        ))
    }

    /// Directory the layout source lives in; image references are made relative to it.
    pub fn source_dir(&self) -> &Path {
        self.source_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Builder for [`SheetConfig`].
pub struct SheetConfigBuilder {
    config: SheetConfig,
}

impl fmt::Debug for SheetConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl SheetConfigBuilder {
    pub fn count(mut self, n: usize) -> Self {
        self.config.count = n;
        self
    }

    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.images_dir = dir.into();
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.file_prefix = prefix.into();
        self
    }

    pub fn image_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.image_extension = ext.into();
        self
    }

    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_path = path.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    pub fn compiler(mut self, program: impl Into<String>) -> Self {
        self.config.compiler = program.into();
        self
    }

    pub fn code_size(mut self, px: u32) -> Self {
        self.config.code_size = px;
        self
    }

    pub fn compile_timeout_secs(mut self, secs: u64) -> Self {
        self.config.compile_timeout_secs = secs.max(1);
        self
    }

    pub fn geometry(mut self, geometry: PageGeometry) -> Self {
        self.config.geometry = geometry;
        self
    }

    pub fn id_generator(mut self, generator: Arc<dyn IdGenerator>) -> Self {
        self.config.id_generator = Some(generator);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn CodeRenderer>) -> Self {
        self.config.renderer = Some(renderer);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SheetConfig, StickerError> {
        let c = &self.config;
        if !(50..=4000).contains(&c.code_size) {
            return Err(StickerError::InvalidConfig(format!(
                "Code size must be 50–4000 px, got {}",
                c.code_size
            )));
        }
        if c.image_extension.is_empty() || c.image_extension.contains(['.', '/', '\\']) {
            return Err(StickerError::InvalidConfig(format!(
                "Image extension must be a bare extension like 'gif', got '{}'",
                c.image_extension
            )));
        }
        if c.file_prefix.contains(['/', '\\']) {
            return Err(StickerError::InvalidConfig(format!(
                "File prefix must not contain path separators, got '{}'",
                c.file_prefix
            )));
        }
        if c.compiler.trim().is_empty() {
            return Err(StickerError::InvalidConfig(
                "Compiler program must not be empty".into(),
            ));
        }
        if c.source_path == c.output_path {
            return Err(StickerError::InvalidConfig(format!(
                "Layout source and output must differ, both are '{}'",
                c.source_path.display()
            )));
        }
        if c.geometry.columns == 0 {
            return Err(StickerError::InvalidConfig(
                "Grid must have at least 1 column".into(),
            ));
        }

        // The compiler only reads files under the layout source's directory.
        let images =
            resolve_path(&c.images_dir).map_err(|e| StickerError::io(&c.images_dir, e))?;
        let source_dir =
            resolve_path(c.source_dir()).map_err(|e| StickerError::io(&c.source_path, e))?;
        if !images.starts_with(&source_dir) {
            return Err(StickerError::InvalidConfig(format!(
                "Images directory '{}' must be inside the layout source's directory '{}'",
                c.images_dir.display(),
                source_dir.display()
            )));
        }
        Ok(self.config)
    }
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
///
/// An empty path means the current directory. Symlinks are not followed.
pub(crate) fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let mut resolved = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other),
        }
    }
    Ok(resolved)
}

// ── Geometry ─────────────────────────────────────────────────────────────

/// Page and grid geometry for the layout header.
///
/// Lengths are Typst length literals (`8.5in`, `210mm`, `12pt`) and are
/// written into the document verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: String,
    pub height: String,
    pub margin: String,
    pub columns: u32,
    pub rows: u32,
    pub gutter: String,
    /// Font size of the short label printed under each code.
    pub label_size: String,
}

impl Default for PageGeometry {
    /// US Letter, half-inch margins, two columns.
    fn default() -> Self {
        Self {
            width: "8.5in".into(),
            height: "11in".into(),
            margin: "0.5in".into(),
            columns: 2,
            rows: 2,
            gutter: "0.5in".into(),
            label_size: "12pt".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_sheet() {
        let c = SheetConfig::default();
        assert_eq!(c.count, 24);
        assert_eq!(c.images_dir, PathBuf::from("images"));
        assert_eq!(c.source_path, PathBuf::from("qr_codes_stickers.typ"));
        assert_eq!(c.output_path, PathBuf::from("qr_codes_stickers.pdf"));
        assert_eq!(c.compiler, "typst");
        assert_eq!(c.code_size, 500);
    }

    #[test]
    fn image_path_is_prefix_id_extension() {
        let c = SheetConfig::default();
        assert_eq!(
            c.image_path_for("1234"),
            PathBuf::from("images").join("QR_1234.gif")
        );
    }

    #[test]
    fn source_dir_of_bare_file_is_empty() {
        let c = SheetConfig::default();
        assert_eq!(c.source_dir(), Path::new(""));
    }

    #[test]
    fn zero_count_is_valid() {
        let c = SheetConfig::builder().count(0).build().unwrap();
        assert_eq!(c.count, 0);
    }

    #[test]
    fn rejects_tiny_code_size() {
        let err = SheetConfig::builder().code_size(10).build().unwrap_err();
        assert!(matches!(err, StickerError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_dotted_extension() {
        let err = SheetConfig::builder()
            .image_extension(".gif")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("bare extension"));
    }

    #[test]
    fn rejects_prefix_with_separator() {
        assert!(SheetConfig::builder().file_prefix("a/b").build().is_err());
    }

    #[test]
    fn rejects_same_source_and_output() {
        assert!(SheetConfig::builder()
            .source_path("x.typ")
            .output_path("x.typ")
            .build()
            .is_err());
    }

    #[test]
    fn timeout_is_at_least_one_second() {
        let c = SheetConfig::builder().compile_timeout_secs(0).build().unwrap();
        assert_eq!(c.compile_timeout_secs, 1);
    }

    #[test]
    fn rejects_images_outside_source_dir() {
        let err = SheetConfig::builder()
            .source_path("out/sheet.typ")
            .build()
            .unwrap_err();
        assert!(matches!(err, StickerError::InvalidConfig(_)));
        assert!(err.to_string().contains("must be inside"));
    }

    #[test]
    fn accepts_images_beneath_source_dir() {
        let c = SheetConfig::builder()
            .images_dir("out/./images")
            .source_path("out/sheet.typ")
            .build()
            .unwrap();
        assert_eq!(c.images_dir, PathBuf::from("out/./images"));
    }

    #[test]
    fn dotdot_paths_are_folded_before_comparison() {
        assert!(SheetConfig::builder()
            .images_dir("out/../images")
            .build()
            .is_ok());
        assert!(SheetConfig::builder()
            .images_dir("out/images")
            .source_path("out/../out/sheet.typ")
            .build()
            .is_ok());
    }

    #[test]
    fn resolve_path_folds_dots() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_path(Path::new("")).unwrap(), cwd);
        assert_eq!(resolve_path(Path::new("a/./b/../c")).unwrap(), cwd.join("a").join("c"));
    }

    #[test]
    fn debug_hides_trait_objects() {
        let c = SheetConfig::default();
        let s = format!("{c:?}");
        assert!(s.contains("SheetConfig"));
        assert!(s.contains("count: 24"));
    }
}

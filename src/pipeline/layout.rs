//! Layout assembly: fold the ordered stickers into one Typst document.
//!
//! Pure string work, no I/O. The document is built once and handed to
//! [`crate::pipeline::compile`] unchanged.

use crate::config::{resolve_path, PageGeometry};
use crate::output::Sticker;
use crate::template;
use std::path::{Component, Path};

/// A finished layout source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutDocument {
    content: String,
    placements: usize,
}

impl LayoutDocument {
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Number of sticker placements in the grid.
    pub fn placement_count(&self) -> usize {
        self.placements
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

/// Build the layout for `stickers`, in order.
///
/// Image paths are referenced relative to `source_dir` (the directory the
/// layout source will be written to) so the compiler resolves them from the
/// document's own location.
pub fn build_layout(stickers: &[Sticker], geometry: &PageGeometry, source_dir: &Path) -> LayoutDocument {
    let body = stickers.iter().fold(template::header(geometry), |mut doc, sticker| {
        let image = image_ref(&sticker.image_path, source_dir);
        doc.push_str(&template::placement(&sticker.label, &image));
        doc
    });

    LayoutDocument {
        content: body + template::GRID_CLOSE,
        placements: stickers.len(),
    }
}

/// Render `path` for use inside the document: relative to `source_dir`,
/// always with `/` separators.
///
/// Both paths are resolved against the working directory first, so a
/// relative workspace next to a nested source becomes `../images/...`.
pub fn image_ref(path: &Path, source_dir: &Path) -> String {
    let target = resolve_path(path).unwrap_or_else(|_| path.to_path_buf());
    let base = resolve_path(source_dir).unwrap_or_else(|_| source_dir.to_path_buf());

    let shared = target
        .components()
        .zip(base.components())
        .take_while(|(a, b)| a == b)
        .count();
    if shared == 0 {
        return join_components(&target);
    }

    let ups = base.components().count() - shared;
    let mut parts: Vec<String> = std::iter::repeat("..".to_string()).take(ups).collect();
    parts.extend(
        target
            .components()
            .skip(shared)
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

fn join_components(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut absolute = false;
    for component in path.components() {
        match component {
            Component::RootDir => absolute = true,
            Component::CurDir => {}
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

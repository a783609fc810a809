//! Typst fragments used to assemble the sticker-sheet layout.
//!
//! Every piece of markup the layout builder emits lives here so the look of
//! the sheet can be changed in one place, and tests can inspect the fragments
//! without touching the filesystem.

use crate::config::PageGeometry;

/// Name of the Typst function that places one sticker.
pub const STICKER_FN: &str = "qr-sticker";

/// Closes the `#grid(` opened by [`header`].
pub const GRID_CLOSE: &str = ")";

/// Build the layout preamble: the sticker function, page setup, and the
/// opening of the grid that every placement is an argument of.
pub fn header(geometry: &PageGeometry) -> String {
    format!(
        r#"
#let {STICKER_FN}(uuid, qr-filename) = {{
  align(center)[
    #box()[
      #image(qr-filename, fit: "cover")
      #v(2mm)
      #text(size: {label_size}, uuid)
      #v(2mm)
    ]
  ]
}}

#set page(width: {width}, height: {height}, margin: {margin})
#grid(
  columns: {columns},
  rows: {rows},
  gutter: {gutter},
  "#,
        label_size = geometry.label_size,
        width = geometry.width,
        height = geometry.height,
        margin = geometry.margin,
        columns = geometry.columns,
        rows = geometry.rows,
        gutter = geometry.gutter,
    )
}

/// One grid cell: `qr-sticker("<label>", "<image>"),` on its own line.
pub fn placement(label: &str, image_ref: &str) -> String {
    format!(
        "{STICKER_FN}(\"{}\", \"{}\"),\n",
        escape_string(label),
        escape_string(image_ref)
    )
}

/// Escape text for use inside a Typst string literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

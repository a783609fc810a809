//! Pipeline stages for sticker-sheet generation.
//!
//! Each submodule implements exactly one step. Stages run strictly in order
//! and every I/O step is awaited before the next begins.
//!
//! ## Data Flow
//!
//! ```text
//! workspace ──▶ generate ──▶ layout ──▶ compile
//! (mkdir/clear) (id + QR)    (Typst)    (typst compile)
//! ```
//!
//! 1. [`workspace`]  — ensure the image directory exists and holds no stale files
//! 2. [`generate`]   — per sticker: [`identifier`] → [`render`] → [`encode`]
//!    (data URI → bytes) → image file
//! 3. [`layout`]     — pure fold of the stickers into a Typst document
//! 4. [`compile`]    — write the document and run the external compiler
//!    under a timeout

pub mod compile;
pub mod encode;
pub mod generate;
pub mod identifier;
pub mod layout;
pub mod render;
pub mod workspace;

//! Image handling, pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` → RGBA8, SHA-256 of the source bytes |
//! | **Overlap** | integer Porter-Duff "over" per pixel |
//! | **Horizontal** | `imageops::replace` (direct copy) |
//! | **Encode** | PNG via `RgbaImage::save_with_format` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for canvas geometry (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Pixel drawing for each composition strategy

pub mod backend;
mod calculations;
pub mod operations;
pub mod rust_backend;

pub use backend::{BackendError, Decoded, Dimensions, ImageBackend, hash_bytes};
pub use calculations::{HorizontalLayout, horizontal_layout, overlap_canvas};
pub use operations::{stack_layers, tile_horizontally};
pub use rust_backend::{RustBackend, is_supported_image, save_png};

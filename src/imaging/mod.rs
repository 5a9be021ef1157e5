//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize → JPEG** | Lanczos3 + `JpegEncoder` at a fixed quality |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for long-edge math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{LongEdge, calculate_long_edge_dimensions, mb_to_bytes, next_long_edge};
pub use operations::{get_dimensions, resize_to_long_edge};
pub use params::{Quality, ResizeParams};
pub use rust_backend::{RustBackend, is_supported, supported_input_extensions};

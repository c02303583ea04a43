//! Image processing: pure Rust, no external programs.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image` decoder dimensions, orientation-corrected |
//! | **Thumbnail** | fit into a fixed box (cover / contain / fill / inside / outside) → JPEG |
//! | **Large** | downscale above `max_size`, otherwise re-encode → JPEG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::{VariantStatus, create_large, create_thumbnail, get_dimensions};
pub use params::{Quality, ResizeParams, ThumbnailParams};
pub use rust_backend::RustBackend;

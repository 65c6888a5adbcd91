// SPDX-License-Identifier: LGPL-3.0-only

//! # Render Error Types
//!
//! Errors raised at the boundaries where tessera talks to the outside world:
//! raw pixel buffers, surfaces and backends. Geometry and recording never
//! fail; see [tessera_geometry::validate!] for how their preconditions are
//! checked instead.

use thiserror::Error;

/// Errors that can occur while creating or flushing drawing surfaces.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A pixel buffer does not match the dimensions it was declared with.
    #[error("Image data has {actual} bytes, expected {expected} for {width}x{height} RGBA8")]
    InvalidImageData {
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// Byte count implied by the dimensions
        expected: usize,
        /// Byte count actually supplied
        actual: usize,
    },

    /// A surface was requested with a zero dimension.
    #[error("Cannot create a {width}x{height} surface")]
    InvalidSurfaceSize {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// The configured backend has no implementation in this build.
    #[error("Renderer backend '{name}' is not supported")]
    UnsupportedBackend {
        /// Name of the requested backend
        name: String,
    },

    /// Handing a finished scene to its consumer failed.
    #[error("Failed to flush surface: {source}")]
    FlushFailed {
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type alias for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    /// Create an invalid image data error.
    pub fn invalid_image_data(width: u32, height: u32, expected: usize, actual: usize) -> Self {
        Self::InvalidImageData {
            width,
            height,
            expected,
            actual,
        }
    }

    /// Create an invalid surface size error.
    pub fn invalid_surface_size(width: u32, height: u32) -> Self {
        Self::InvalidSurfaceSize { width, height }
    }

    /// Create an unsupported backend error.
    pub fn unsupported_backend(name: impl Into<String>) -> Self {
        Self::UnsupportedBackend { name: name.into() }
    }

    /// Create a flush error from any error type.
    pub fn flush_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::FlushFailed {
            source: Box::new(source),
        }
    }
}

// SPDX-License-Identifier: LGPL-3.0-only

#![warn(missing_docs)]

//! Core library for tessera => See `tessera` crate.
//!
//! Contains the canvas abstraction, display list recording and replay, and
//! the vello backend.

pub use vello as vg;

/// Contains the [Canvas](canvas::Canvas) trait every receiver implements.
pub mod canvas;

/// Contains the [Paint](paint::Paint) value and its enums.
pub mod paint;

/// Contains vector paths.
pub mod path;

/// Contains image handles and nine-slice layout.
pub mod image;

/// Contains the text engine interfaces.
pub mod text;

/// Contains the closed set of recordable operations.
pub mod op;

/// Contains the [DisplayListBuilder](builder::DisplayListBuilder).
pub mod builder;

/// Contains the immutable [DisplayList](display_list::DisplayList).
pub mod display_list;

/// Contains the bounds-computing canvas.
pub mod bounds;

/// Contains display list statistics and dispatch profiling.
pub mod diagnostics;

/// Contains the [RenderConfig](config::RenderConfig) struct.
pub mod config;

/// Contains the [RenderError](error::RenderError) type.
pub mod error;

/// Contains the vector graphics interface
///
/// This module connects canvases to real surfaces and holds the vello
/// implementation.
pub mod vgi;

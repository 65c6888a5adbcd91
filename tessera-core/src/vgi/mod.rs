// SPDX-License-Identifier: LGPL-3.0-only

//! Vector Graphics Interface.
//!
//! Connects the backend-neutral [Canvas](crate::canvas::Canvas) to concrete
//! drawing surfaces. Only vello is built in; other backends plug in through
//! [Renderer](renderer::Renderer).

/// Backend selection.
pub mod backend;
/// Renderer factories.
pub mod renderer;
/// The vello scene canvas.
pub mod vello_canvas;

pub use backend::Backend;
pub use renderer::{Renderer, VelloRenderer};
pub use vello_canvas::{SceneSink, VelloCanvas};

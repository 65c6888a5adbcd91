// SPDX-License-Identifier: LGPL-3.0-only

#![warn(missing_docs)]

//! Geometry primitives and 4×4 transform math used by the tessera display lists.
//!
//! All types are plain `Copy` values. Operations never fail: degenerate inputs
//! such as negative sizes, infinities or NaN flow through and show up in the
//! results. Preconditions on constructors are asserted by [validate!] in debug
//! builds, or in any build with the `validation` feature.

/// Numeric scalar abstraction.
pub mod scalar;

/// 2D offsets and points.
pub mod offset;

/// 2D sizes.
pub mod size;

/// Axis-aligned rectangles.
pub mod rect;

/// Elliptical corner radii.
pub mod radius;

/// Rounded rectangles.
pub mod rrect;

/// 4×4 transform utilities.
pub mod transform;

pub use offset::{Offset, Point};
pub use radius::Radius;
pub use rect::Rect;
pub use rrect::RoundedRect;
pub use scalar::Scalar;
pub use size::Size;
pub use transform::{Matrix4, TransformKind};

/// Assert a precondition when validation is enabled.
///
/// Active in debug builds and whenever the `validation` feature of the crate
/// invoking it is on. Compiles to nothing otherwise, so release builds pass
/// the bad values through.
#[macro_export]
macro_rules! validate {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "validation")) {
            assert!($cond, $($arg)+);
        }
    };
}

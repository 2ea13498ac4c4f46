//! Coordinate and geometry value types shared by paths, canvas and rasterizer.
//!
//! Canonical space:
//! - device pixels after the canvas matrix is applied
//! - origin top-left
//! - +X right, +Y down
//!
//! Angles are in degrees, 0° on the positive x-axis, growing clockwise on screen.

mod matrix;
mod point;
mod rect;

pub use matrix::Matrix;
pub use point::Point;
pub use rect::{IntRect, Rect};

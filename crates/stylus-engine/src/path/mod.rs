//! Vector path model.
//!
//! - `builder` : verb list and builder operations
//! - `flatten` : curve subdivision into polylines
//! - `stroke`  : outline generation for pens

mod builder;
mod flatten;
mod stroke;

pub use builder::{FillType, Path, PathCmd, PathDirection, Verb};
pub use flatten::{arc_to_cubics, flatten, Contour};
pub use stroke::{dot_polygon, stroke_contours, Polygon, StrokeStyle};

//! Canvas: pen/brush attachment state, transform/clip stack and draw dispatch.

mod base;
mod draw;
mod state;

pub use base::Canvas;
pub use draw::PointMode;
pub use state::AttachMode;

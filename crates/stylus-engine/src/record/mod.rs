//! Recorded draw streams.
//!
//! Responsibilities:
//! - capture canvas operations as plain data
//! - replay them in insertion order onto any canvas

mod cmd;
mod list;

pub use cmd::DrawCmd;
pub use list::Recording;

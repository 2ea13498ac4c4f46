//! Error taxonomy for the drawing engine.
//!
//! Each class surfaces at a specific boundary:
//! - [`ValidationError`]: setters and constructors, at the call that introduced the bad value
//! - [`GeometryError`]: draw calls, when path data cannot be rasterized
//! - [`SurfaceError`]: draw calls and pixel access, when the bound buffer is unusable
//! - [`EncodingError`]: text blob creation
//!
//! [`DrawError`] wraps all of them for canvas entry points.

use thiserror::Error;

/// Rejected parameter value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("stroke width must be finite and non-negative, got {0}")]
    NegativeStrokeWidth(f32),

    #[error("miter limit must be finite and non-negative, got {0}")]
    InvalidMiterLimit(f32),

    #[error("{channel} channel value {value} is outside 0..=255")]
    ChannelOutOfRange { channel: &'static str, value: i64 },

    #[error("unknown {kind} value {value}")]
    UnknownEnumValue { kind: &'static str, value: u32 },

    #[error("text size must be finite and non-negative, got {0}")]
    InvalidTextSize(f32),

    #[error("anti-alias sample count must be within 1..=16, got {0}")]
    InvalidSampleCount(u8),

    #[error("flattening tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f32),
}

/// Malformed geometry handed to a draw call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("non-finite coordinate in {context} (verb index {index})")]
    NonFinite { context: &'static str, index: usize },

    #[error("non-finite value passed to {0}")]
    NonFiniteArgument(&'static str),
}

/// Unusable pixel buffer binding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("canvas is not bound to a pixel buffer")]
    Unbound,

    #[error("pixel buffer has been released")]
    Released,

    #[error("invalid pixel buffer dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    #[error("pixel data length {actual} does not match expected {expected}")]
    DataLength { expected: usize, actual: usize },
}

/// Text bytes that do not decode under the requested encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("invalid UTF-8 sequence at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("unpaired UTF-16 surrogate at byte {offset}")]
    UnpairedSurrogate { offset: usize },

    #[error("invalid UTF-32 code point {value:#x} at byte {offset}")]
    InvalidCodePoint { value: u32, offset: usize },

    #[error("{encoding} input length {len} is not a multiple of {unit}")]
    Truncated { encoding: &'static str, len: usize, unit: usize },
}

/// Any failure of a canvas draw call.
///
/// A failed draw aborts only that call; canvas and path state remain usable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Result type for draw operations.
pub type Result<T> = std::result::Result<T, DrawError>;

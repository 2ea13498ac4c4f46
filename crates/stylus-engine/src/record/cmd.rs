use std::sync::Arc;

use crate::canvas::PointMode;
use crate::coords::{Point, Rect};
use crate::paint::{BlendMode, Brush, Color, Pen};
use crate::path::Path;
use crate::surface::Image;
use crate::text::TextBlob;

/// One recorded canvas operation.
///
/// Extending the recorder:
/// - add a variant here
/// - add the matching recording helper on `Recording`
/// - dispatch it in `Recording::playback`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    AttachPen(Pen),
    DetachPen,
    AttachBrush(Brush),
    DetachBrush,

    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    Scale { sx: f32, sy: f32 },
    Rotate { degrees: f32, px: f32, py: f32 },
    ClipRect(Rect),

    Rect(Rect),
    RoundRect { rect: Rect, rx: f32, ry: f32 },
    Circle { center: Point, radius: f32 },
    Oval(Rect),
    Arc { oval: Rect, start_angle: f32, sweep_angle: f32 },
    Line { from: Point, to: Point },
    Point(Point),
    Points { mode: PointMode, points: Arc<[Point]> },
    /// Shared so the same path can be recorded many times without copying.
    Path(Arc<Path>),
    Color { color: Color, mode: BlendMode },
    Clear(Color),
    TextBlob { blob: TextBlob, origin: Point },
    Image { image: Image, dst: Rect },
}

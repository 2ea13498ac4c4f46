use crate::coords::{Matrix, Point, Rect};
use crate::error::GeometryError;

use super::flatten::{arc_point, arc_to_cubics, flatten, winding_at};

/// Path construction instruction kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Verb {
    Move,
    Line,
    Quad,
    Cubic,
    Arc,
    Close,
}

/// A verb with its control points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    /// Elliptical arc inscribed in `oval`; angles in degrees.
    ArcTo { oval: Rect, start_angle: f32, sweep_angle: f32 },
    Close,
}

impl PathCmd {
    #[inline]
    pub fn verb(&self) -> Verb {
        match self {
            PathCmd::MoveTo(_) => Verb::Move,
            PathCmd::LineTo(_) => Verb::Line,
            PathCmd::QuadTo { .. } => Verb::Quad,
            PathCmd::CubicTo { .. } => Verb::Cubic,
            PathCmd::ArcTo { .. } => Verb::Arc,
            PathCmd::Close => Verb::Close,
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            PathCmd::MoveTo(p) | PathCmd::LineTo(p) => p.is_finite(),
            PathCmd::QuadTo { ctrl, to } => ctrl.is_finite() && to.is_finite(),
            PathCmd::CubicTo { ctrl1, ctrl2, to } => ctrl1.is_finite() && ctrl2.is_finite() && to.is_finite(),
            PathCmd::ArcTo { oval, start_angle, sweep_angle } => {
                oval.is_finite() && start_angle.is_finite() && sweep_angle.is_finite()
            }
            PathCmd::Close => true,
        }
    }

    fn map_points(self, f: impl Fn(Point) -> Point) -> PathCmd {
        match self {
            PathCmd::MoveTo(p) => PathCmd::MoveTo(f(p)),
            PathCmd::LineTo(p) => PathCmd::LineTo(f(p)),
            PathCmd::QuadTo { ctrl, to } => PathCmd::QuadTo { ctrl: f(ctrl), to: f(to) },
            PathCmd::CubicTo { ctrl1, ctrl2, to } => PathCmd::CubicTo { ctrl1: f(ctrl1), ctrl2: f(ctrl2), to: f(to) },
            PathCmd::ArcTo { oval, start_angle, sweep_angle } => {
                let lt = f(Point::new(oval.left, oval.top));
                let rb = f(Point::new(oval.right, oval.bottom));
                PathCmd::ArcTo { oval: Rect::new(lt.x, lt.y, rb.x, rb.y), start_angle, sweep_angle }
            }
            PathCmd::Close => PathCmd::Close,
        }
    }
}

/// Rule deciding which regions of a self-overlapping path are inside.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum FillType {
    /// Non-zero winding number.
    #[default]
    Winding,
    /// Odd crossing count.
    EvenOdd,
}

impl FillType {
    #[inline]
    pub(crate) fn is_inside(self, winding: i32) -> bool {
        match self {
            FillType::Winding => winding != 0,
            FillType::EvenOdd => winding & 1 != 0,
        }
    }
}

/// Contour orientation for the `add_*` shape helpers.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PathDirection {
    /// Clockwise on screen (y down).
    #[default]
    Cw,
    Ccw,
}

/// Mutable, append-only vector path.
///
/// Every construction call appends exactly one verb, and `close` appends two:
/// a `LineTo` back to the contour start followed by `Close`.
///
/// `line_to`, `quad_to` and `cubic_to` with no open contour start one
/// implicitly without storing a `MoveTo`: at [`Path::origin`] for a fresh path,
/// or at the previous contour's start after `close`. `arc_to` with no open
/// contour starts at the arc's own start point. `close` with no open contour
/// seals an empty contour at the current start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    cmds: Vec<PathCmd>,
    fill_type: FillType,
    /// Current point while a contour is open.
    current: Option<Point>,
    /// Start of the most recent contour.
    last_move: Point,
    /// Start of a contour opened before any `move_to`.
    origin: Point,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    // ── construction ──────────────────────────────────────────────────────

    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        let p = Point::new(x, y);
        self.cmds.push(PathCmd::MoveTo(p));
        self.current = Some(p);
        self.last_move = p;
        self
    }

    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.open_contour();
        let p = Point::new(x, y);
        self.cmds.push(PathCmd::LineTo(p));
        self.current = Some(p);
        self
    }

    pub fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) -> &mut Self {
        self.open_contour();
        let to = Point::new(x, y);
        self.cmds.push(PathCmd::QuadTo { ctrl: Point::new(cx, cy), to });
        self.current = Some(to);
        self
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> &mut Self {
        self.open_contour();
        let to = Point::new(x, y);
        self.cmds.push(PathCmd::CubicTo {
            ctrl1: Point::new(c1x, c1y),
            ctrl2: Point::new(c2x, c2y),
            to,
        });
        self.current = Some(to);
        self
    }

    /// Appends an elliptical arc inscribed in `(left, top, right, bottom)`.
    ///
    /// A straight segment joins the current point to the arc start when they differ.
    /// Sweeps beyond ±360° are drawn as one full revolution.
    pub fn arc_to(
        &mut self,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
        start_angle: f32,
        sweep_angle: f32,
    ) -> &mut Self {
        let oval = Rect::new(left, top, right, bottom);
        if self.current.is_none() {
            self.last_move = arc_point(oval, start_angle);
        }
        self.cmds.push(PathCmd::ArcTo { oval, start_angle, sweep_angle });
        self.current = Some(arc_point(oval, start_angle + sweep_angle.clamp(-360.0, 360.0)));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.cmds.push(PathCmd::LineTo(self.last_move));
        self.cmds.push(PathCmd::Close);
        self.current = None;
        self
    }

    /// Discards all verbs and returns to the freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ── relative construction ─────────────────────────────────────────────

    pub fn r_move_to(&mut self, dx: f32, dy: f32) -> &mut Self {
        let p = self.pen();
        self.move_to(p.x + dx, p.y + dy)
    }

    pub fn r_line_to(&mut self, dx: f32, dy: f32) -> &mut Self {
        let p = self.pen();
        self.line_to(p.x + dx, p.y + dy)
    }

    pub fn r_quad_to(&mut self, dcx: f32, dcy: f32, dx: f32, dy: f32) -> &mut Self {
        let p = self.pen();
        self.quad_to(p.x + dcx, p.y + dcy, p.x + dx, p.y + dy)
    }

    pub fn r_cubic_to(&mut self, dc1x: f32, dc1y: f32, dc2x: f32, dc2y: f32, dx: f32, dy: f32) -> &mut Self {
        let p = self.pen();
        self.cubic_to(p.x + dc1x, p.y + dc1y, p.x + dc2x, p.y + dc2y, p.x + dx, p.y + dy)
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Adds a closed rectangle contour starting at the top-left corner.
    pub fn add_rect(&mut self, rect: Rect, dir: PathDirection) -> &mut Self {
        let Rect { left, top, right, bottom } = rect;
        self.move_to(left, top);
        match dir {
            PathDirection::Cw => self.line_to(right, top).line_to(right, bottom).line_to(left, bottom),
            PathDirection::Ccw => self.line_to(left, bottom).line_to(right, bottom).line_to(right, top),
        };
        self.close()
    }

    /// Adds a closed ellipse inscribed in `oval`, starting at its rightmost point.
    pub fn add_oval(&mut self, oval: Rect, dir: PathDirection) -> &mut Self {
        let sweep = match dir {
            PathDirection::Cw => 360.0,
            PathDirection::Ccw => -360.0,
        };
        let start = arc_point(oval, 0.0);
        self.move_to(start.x, start.y);
        self.cmds.push(PathCmd::ArcTo { oval, start_angle: 0.0, sweep_angle: sweep });
        self.current = Some(start);
        self.close()
    }

    /// Adds a circle. Non-positive radii add nothing.
    pub fn add_circle(&mut self, cx: f32, cy: f32, radius: f32, dir: PathDirection) -> &mut Self {
        if radius > 0.0 {
            self.add_oval(Rect::new(cx - radius, cy - radius, cx + radius, cy + radius), dir);
        }
        self
    }

    /// Adds an open arc as a new contour.
    pub fn add_arc(&mut self, oval: Rect, start_angle: f32, sweep_angle: f32) -> &mut Self {
        let start = arc_point(oval, start_angle);
        self.move_to(start.x, start.y);
        self.arc_to(oval.left, oval.top, oval.right, oval.bottom, start_angle, sweep_angle)
    }

    /// Adds a clockwise rounded rectangle. Radii are clamped to half the side lengths.
    pub fn add_round_rect(&mut self, rect: Rect, rx: f32, ry: f32) -> &mut Self {
        let r = rect.sorted();
        let rx = rx.max(0.0).min(r.width() * 0.5);
        let ry = ry.max(0.0).min(r.height() * 0.5);
        if rx <= 0.0 || ry <= 0.0 {
            return self.add_rect(r, PathDirection::Cw);
        }
        let (l, t, rt, b) = (r.left, r.top, r.right, r.bottom);
        let (dx, dy) = (rx * 2.0, ry * 2.0);
        self.move_to(l + rx, t)
            .line_to(rt - rx, t)
            .arc_to(rt - dx, t, rt, t + dy, 270.0, 90.0)
            .line_to(rt, b - ry)
            .arc_to(rt - dx, b - dy, rt, b, 0.0, 90.0)
            .line_to(l + rx, b)
            .arc_to(l, b - dy, l + dx, b, 90.0, 90.0)
            .line_to(l, t + ry)
            .arc_to(l, t, l + dx, t + dy, 180.0, 90.0)
            .close()
    }

    /// Appends every verb of `other`.
    ///
    /// A leading contour of `other` that starts implicitly gets an explicit
    /// `MoveTo` to its start, so it never joins the open contour of `self`.
    pub fn add_path(&mut self, other: &Path) -> &mut Self {
        let Some(&first) = other.cmds.first() else {
            return self;
        };
        match first {
            PathCmd::MoveTo(_) => {}
            PathCmd::ArcTo { oval, start_angle, .. } => self.cmds.push(PathCmd::MoveTo(arc_point(oval, start_angle))),
            _ => self.cmds.push(PathCmd::MoveTo(other.origin)),
        }
        self.cmds.extend_from_slice(&other.cmds);
        self.current = other.current;
        self.last_move = other.last_move;
        self
    }

    // ── transforms ────────────────────────────────────────────────────────

    pub fn offset(&mut self, dx: f32, dy: f32) {
        let shift = |p: Point| Point::new(p.x + dx, p.y + dy);
        for cmd in &mut self.cmds {
            *cmd = cmd.map_points(shift);
        }
        self.current = self.current.map(shift);
        self.last_move = shift(self.last_move);
        self.origin = shift(self.origin);
    }

    /// Maps every point through `m`. Arcs are converted to cubics first since a
    /// general affine transform does not keep them axis-aligned.
    pub fn transform(&mut self, m: &Matrix) {
        let mut out = Vec::with_capacity(self.cmds.len());
        let mut current = self.origin;
        let mut open = false;
        for &cmd in &self.cmds {
            match cmd {
                PathCmd::ArcTo { oval, start_angle, sweep_angle } => {
                    let (start, cubics) = arc_to_cubics(oval, start_angle, sweep_angle);
                    if !open {
                        out.push(PathCmd::MoveTo(m.map_point(start)));
                    } else if start != current {
                        out.push(PathCmd::LineTo(m.map_point(start)));
                    }
                    current = start;
                    open = true;
                    for [c1, c2, to] in cubics {
                        out.push(PathCmd::CubicTo {
                            ctrl1: m.map_point(c1),
                            ctrl2: m.map_point(c2),
                            to: m.map_point(to),
                        });
                        current = to;
                    }
                }
                other => {
                    if let Some(p) = end_point(&other) {
                        current = p;
                    }
                    open = other != PathCmd::Close;
                    out.push(other.map_points(|p| m.map_point(p)));
                }
            }
        }
        self.cmds = out;
        self.current = self.current.map(|p| m.map_point(p));
        self.last_move = m.map_point(self.last_move);
        self.origin = m.map_point(self.origin);
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn cmds(&self) -> &[PathCmd] {
        &self.cmds
    }

    pub fn verbs(&self) -> impl Iterator<Item = Verb> + '_ {
        self.cmds.iter().map(PathCmd::verb)
    }

    #[inline]
    pub fn verb_count(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    #[inline]
    pub fn fill_type(&self) -> FillType {
        self.fill_type
    }

    #[inline]
    pub fn set_fill_type(&mut self, fill_type: FillType) {
        self.fill_type = fill_type;
    }

    /// End point of the last verb, `None` for an empty path.
    pub fn last_point(&self) -> Option<Point> {
        if self.cmds.is_empty() {
            return None;
        }
        Some(self.pen())
    }

    /// Start point used by a contour opened before any `move_to`.
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Bounds of all control points, with arcs contributing their Bezier hull
    /// and implicitly started contours their start point.
    pub fn bounds(&self) -> Option<Rect> {
        let mut pts = Vec::with_capacity(self.cmds.len() * 3);
        let mut last = self.origin;
        let mut open = false;
        for cmd in &self.cmds {
            if !open && matches!(cmd.verb(), Verb::Line | Verb::Quad | Verb::Cubic) {
                pts.push(last);
            }
            match *cmd {
                PathCmd::MoveTo(p) | PathCmd::LineTo(p) => pts.push(p),
                PathCmd::QuadTo { ctrl, to } => pts.extend([ctrl, to]),
                PathCmd::CubicTo { ctrl1, ctrl2, to } => pts.extend([ctrl1, ctrl2, to]),
                PathCmd::ArcTo { oval, start_angle, sweep_angle } => {
                    let (start, cubics) = arc_to_cubics(oval, start_angle, sweep_angle);
                    pts.push(start);
                    pts.extend(cubics.into_iter().flatten());
                }
                PathCmd::Close => {}
            }
            if let Some(p) = end_point(cmd) {
                last = p;
            }
            open = *cmd != PathCmd::Close;
        }
        Rect::from_points(pts)
    }

    /// Hit test honoring the fill type.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.validate().is_err() {
            return false;
        }
        let contours = flatten(self, &Matrix::identity(), 0.25);
        self.fill_type.is_inside(winding_at(&contours, Point::new(x, y)))
    }

    /// Fails on the first non-finite coordinate or angle.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self.cmds.iter().position(|c| !c.is_finite()) {
            Some(index) => Err(GeometryError::NonFinite { context: "path", index }),
            None => Ok(()),
        }
    }
}

fn end_point(cmd: &PathCmd) -> Option<Point> {
    match *cmd {
        PathCmd::MoveTo(p) | PathCmd::LineTo(p) => Some(p),
        PathCmd::QuadTo { to, .. } | PathCmd::CubicTo { to, .. } => Some(to),
        PathCmd::ArcTo { .. } | PathCmd::Close => None,
    }
}

impl Path {
    fn open_contour(&mut self) {
        if self.current.is_none() {
            self.current = Some(self.last_move);
        }
    }

    /// Point the next relative verb is measured from.
    fn pen(&self) -> Point {
        self.current.unwrap_or(self.last_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── verb accounting ───────────────────────────────────────────────────

    #[test]
    fn verb_count_is_calls_plus_one_per_close() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .quad_to(20.0, 0.0, 20.0, 10.0)
            .cubic_to(20.0, 20.0, 10.0, 20.0, 0.0, 20.0)
            .close();
        // 5 calls + 1 implicit closing line
        assert_eq!(p.verb_count(), 6);
        assert_eq!(
            p.verbs().collect::<Vec<_>>(),
            vec![Verb::Move, Verb::Line, Verb::Quad, Verb::Cubic, Verb::Line, Verb::Close]
        );

        p.move_to(50.0, 50.0).line_to(60.0, 60.0).close();
        assert_eq!(p.verb_count(), 6 + 4);
    }

    #[test]
    fn line_before_move_starts_at_origin() {
        let mut p = Path::new();
        p.line_to(5.0, 5.0);
        assert_eq!(p.cmds(), &[PathCmd::LineTo(Point::new(5.0, 5.0))]);
        assert_eq!(p.bounds(), Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn verb_after_close_restarts_at_contour_start() {
        let mut p = Path::new();
        p.move_to(3.0, 4.0).line_to(10.0, 4.0).close().line_to(10.0, 10.0);
        assert_eq!(p.verb_count(), 5);
        assert_eq!(p.cmds()[4], PathCmd::LineTo(Point::new(10.0, 10.0)));

        let cs = flatten(&p, &Matrix::identity(), 0.25);
        assert_eq!(cs.len(), 2);
        assert_eq!(cs[1].points, vec![Point::new(3.0, 4.0), Point::new(10.0, 10.0)]);
    }

    #[test]
    fn close_without_open_contour_seals_at_start() {
        let mut p = Path::new();
        p.close();
        assert_eq!(p.cmds(), &[PathCmd::LineTo(Point::zero()), PathCmd::Close]);

        p.move_to(2.0, 2.0).line_to(8.0, 2.0).close().close();
        assert_eq!(p.verb_count(), 2 + 4 + 2);
        assert_eq!(p.cmds()[6], PathCmd::LineTo(Point::new(2.0, 2.0)));
    }

    #[test]
    fn every_leading_verb_counts_once() {
        let mut p = Path::new();
        p.quad_to(1.0, 1.0, 2.0, 0.0);
        p.reset();
        p.cubic_to(1.0, 1.0, 2.0, 1.0, 3.0, 0.0).line_to(4.0, 4.0);
        assert_eq!(p.verbs().collect::<Vec<_>>(), vec![Verb::Cubic, Verb::Line]);
    }

    #[test]
    fn relative_verbs_follow_the_implicit_start() {
        let mut p = Path::new();
        p.r_line_to(2.0, 3.0);
        assert_eq!(p.last_point(), Some(Point::new(2.0, 3.0)));
        p.close().r_line_to(1.0, 1.0);
        assert_eq!(p.last_point(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn reset_equals_fresh_path() {
        let mut p = Path::new();
        p.move_to(1.0, 2.0).line_to(3.0, 4.0).close();
        p.set_fill_type(FillType::EvenOdd);
        p.reset();
        assert_eq!(p, Path::new());
        assert_eq!(p.bounds(), None);
        assert_eq!(p.last_point(), None);
    }

    // ── arcs ──────────────────────────────────────────────────────────────

    #[test]
    fn arc_to_on_empty_path_starts_at_arc_start() {
        let mut p = Path::new();
        p.arc_to(0.0, 0.0, 100.0, 100.0, 0.0, 90.0);
        assert_eq!(p.verb_count(), 1);
        let end = p.last_point().unwrap();
        assert!((end.x - 50.0).abs() < 1e-3 && (end.y - 100.0).abs() < 1e-3);

        let cs = flatten(&p, &Matrix::identity(), 0.25);
        assert_eq!(cs[0].points[0], Point::new(100.0, 50.0));

        p.close();
        assert_eq!(p.cmds()[1], PathCmd::LineTo(Point::new(100.0, 50.0)));
    }

    #[test]
    fn circle_bounds_match_radius() {
        let mut p = Path::new();
        p.add_circle(50.0, 50.0, 10.0, PathDirection::Cw);
        let b = p.bounds().unwrap();
        assert!((b.left - 40.0).abs() < 1e-3 && (b.right - 60.0).abs() < 1e-3);
        assert!((b.top - 40.0).abs() < 1e-3 && (b.bottom - 60.0).abs() < 1e-3);
    }

    // ── hit testing ───────────────────────────────────────────────────────

    #[test]
    fn contains_respects_fill_type() {
        let mut p = Path::new();
        p.add_rect(Rect::new(0.0, 0.0, 100.0, 100.0), PathDirection::Cw);
        p.add_rect(Rect::new(25.0, 25.0, 75.0, 75.0), PathDirection::Cw);
        assert!(p.contains(50.0, 50.0));
        p.set_fill_type(FillType::EvenOdd);
        assert!(!p.contains(50.0, 50.0));
        assert!(p.contains(10.0, 10.0));
        assert!(!p.contains(150.0, 10.0));
    }

    #[test]
    fn opposite_winding_cuts_a_hole() {
        let mut p = Path::new();
        p.add_rect(Rect::new(0.0, 0.0, 100.0, 100.0), PathDirection::Cw);
        p.add_rect(Rect::new(25.0, 25.0, 75.0, 75.0), PathDirection::Ccw);
        assert!(!p.contains(50.0, 50.0));
    }

    // ── validation / transforms ───────────────────────────────────────────

    #[test]
    fn validate_reports_first_non_finite_verb() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0).line_to(f32::NAN, 1.0);
        assert_eq!(p.validate(), Err(GeometryError::NonFinite { context: "path", index: 1 }));
    }

    #[test]
    fn offset_moves_bounds() {
        let mut p = Path::new();
        p.add_rect(Rect::new(0.0, 0.0, 10.0, 10.0), PathDirection::Cw);
        p.offset(5.0, -5.0);
        assert_eq!(p.bounds(), Some(Rect::new(5.0, -5.0, 15.0, 5.0)));
    }

    #[test]
    fn offset_moves_implicit_start() {
        let mut p = Path::new();
        p.line_to(10.0, 0.0);
        p.offset(5.0, 5.0);
        assert_eq!(p.origin(), Point::new(5.0, 5.0));
        let cs = flatten(&p, &Matrix::identity(), 0.25);
        assert_eq!(cs[0].points, vec![Point::new(5.0, 5.0), Point::new(15.0, 5.0)]);
    }

    #[test]
    fn add_path_pins_implicit_start() {
        let mut inner = Path::new();
        inner.line_to(4.0, 0.0);
        let mut p = Path::new();
        p.move_to(10.0, 10.0).line_to(20.0, 10.0);
        p.add_path(&inner);
        assert_eq!(p.cmds()[2], PathCmd::MoveTo(Point::zero()));
        assert_eq!(flatten(&p, &Matrix::identity(), 0.25).len(), 2);
    }

    #[test]
    fn transform_of_detached_arc_opens_at_arc_start() {
        let mut p = Path::new();
        p.arc_to(0.0, 0.0, 10.0, 10.0, 0.0, 90.0);
        p.transform(&Matrix::translate(5.0, 0.0));
        assert_eq!(p.cmds()[0], PathCmd::MoveTo(Point::new(15.0, 5.0)));
    }

    #[test]
    fn transform_replaces_arcs_with_cubics() {
        let mut p = Path::new();
        p.add_circle(0.0, 0.0, 10.0, PathDirection::Cw);
        p.transform(&Matrix::rotate(45.0, 0.0, 0.0));
        assert!(p.verbs().all(|v| v != Verb::Arc));
        let b = p.bounds().unwrap();
        assert!(b.width() > 19.0);
    }
}

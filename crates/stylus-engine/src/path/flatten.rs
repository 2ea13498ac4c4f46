//! Curve flattening: converts path verbs into polylines.
//!
//! Subdivision counts are derived from the control-polygon deviation so that the
//! polyline stays within `tolerance` units of the true curve.

use std::f32::consts::PI;

use crate::coords::{Matrix, Point, Rect};

use super::{Path, PathCmd};

/// Hard cap on segments emitted for a single curve.
const MAX_SEGMENTS: usize = 512;

/// One flattened contour.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Contour {
    fn start(p: Point) -> Self {
        Self { points: vec![p], closed: false }
    }

    fn push(&mut self, p: Point) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }
}

/// Flattens `path` with every point mapped through `m`.
///
/// `tolerance` is measured after the mapping.
pub fn flatten(path: &Path, m: &Matrix, tolerance: f32) -> Vec<Contour> {
    let tolerance = if tolerance > 0.0 { tolerance } else { 0.25 };
    let mut out = Vec::new();
    let mut cur: Option<Contour> = None;
    let mut last = path.origin();

    for &cmd in path.cmds() {
        match cmd {
            PathCmd::MoveTo(p) => {
                finish(&mut out, cur.take());
                cur = Some(Contour::start(m.map_point(p)));
                last = p;
            }
            PathCmd::LineTo(p) => {
                contour(&mut cur, m, last).push(m.map_point(p));
                last = p;
            }
            PathCmd::QuadTo { ctrl, to } => {
                let c = contour(&mut cur, m, last);
                flatten_quad(c, [m.map_point(last), m.map_point(ctrl), m.map_point(to)], tolerance);
                last = to;
            }
            PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                let c = contour(&mut cur, m, last);
                let pts = [m.map_point(last), m.map_point(ctrl1), m.map_point(ctrl2), m.map_point(to)];
                flatten_cubic(c, pts, tolerance);
                last = to;
            }
            PathCmd::ArcTo { oval, start_angle, sweep_angle } => {
                let (start, cubics) = arc_to_cubics(oval, start_angle, sweep_angle);
                let c = contour(&mut cur, m, start);
                c.push(m.map_point(start));
                let mut from = start;
                for [c1, c2, to] in cubics {
                    let pts = [m.map_point(from), m.map_point(c1), m.map_point(c2), m.map_point(to)];
                    flatten_cubic(c, pts, tolerance);
                    from = to;
                }
                last = from;
            }
            PathCmd::Close => {
                if let Some(mut c) = cur.take() {
                    c.closed = true;
                    finish(&mut out, Some(c));
                }
            }
        }
    }
    finish(&mut out, cur);
    out
}

fn contour<'a>(cur: &'a mut Option<Contour>, m: &Matrix, last: Point) -> &'a mut Contour {
    cur.get_or_insert_with(|| Contour::start(m.map_point(last)))
}

fn finish(out: &mut Vec<Contour>, c: Option<Contour>) {
    if let Some(c) = c {
        out.push(c);
    }
}

#[inline]
fn segment_count(n: f32) -> usize {
    if n.is_finite() {
        (n.ceil() as usize).clamp(1, MAX_SEGMENTS)
    } else {
        1
    }
}

fn flatten_quad(c: &mut Contour, [p0, p1, p2]: [Point; 3], tol: f32) {
    let dd = p0 - p1 * 2.0 + p2;
    let n = segment_count((dd.length() / (4.0 * tol)).sqrt());
    for i in 1..=n {
        let t = i as f32 / n as f32;
        let mt = 1.0 - t;
        c.push(p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t));
    }
}

fn flatten_cubic(c: &mut Contour, [p0, p1, p2, p3]: [Point; 4], tol: f32) {
    let d1 = (p0 - p1 * 2.0 + p2).length();
    let d2 = (p1 - p2 * 2.0 + p3).length();
    let n = segment_count((3.0 * d1.max(d2) / (4.0 * tol)).sqrt());
    for i in 1..=n {
        let t = i as f32 / n as f32;
        let mt = 1.0 - t;
        c.push(
            p0 * (mt * mt * mt)
                + p1 * (3.0 * mt * mt * t)
                + p2 * (3.0 * mt * t * t)
                + p3 * (t * t * t),
        );
    }
}

/// Point on the ellipse inscribed in `oval` at `degrees` (0 = +x, 90 = +y).
pub fn arc_point(oval: Rect, degrees: f32) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let c = oval.center();
    Point::new(c.x + cos * oval.width() * 0.5, c.y + sin * oval.height() * 0.5)
}

/// Splits an elliptical arc into cubic Beziers of at most 90° each.
///
/// Returns the arc start point and `[ctrl1, ctrl2, end]` triples.
/// Sweeps are clamped to one revolution.
pub fn arc_to_cubics(oval: Rect, start_angle: f32, sweep_angle: f32) -> (Point, Vec<[Point; 3]>) {
    let start = arc_point(oval, start_angle);
    let sweep = sweep_angle.clamp(-360.0, 360.0);
    if sweep == 0.0 || !sweep.is_finite() {
        return (start, Vec::new());
    }

    let segments = (sweep.abs() / 90.0).ceil().max(1.0) as usize;
    let step = (sweep / segments as f32).to_radians();
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    let c = oval.center();
    let (rx, ry) = (oval.width() * 0.5, oval.height() * 0.5);
    let map = |x: f32, y: f32| Point::new(c.x + x * rx, c.y + y * ry);

    let mut out = Vec::with_capacity(segments);
    let mut a0 = start_angle.to_radians();
    for _ in 0..segments {
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        out.push([
            map(c0 - k * s0, s0 + k * c0),
            map(c1 + k * s1, s1 - k * c1),
            map(c1, s1),
        ]);
        a0 = a1;
    }
    (start, out)
}

/// Segments needed to approximate a circle of `radius` within `tol`.
pub fn circle_segments(radius: f32, tol: f32) -> usize {
    if !(radius > tol) {
        return 8;
    }
    let n = PI / (1.0 - tol / radius).acos();
    segment_count(n).max(8)
}

/// Winding number of `p` against the contours, each treated as closed.
pub fn winding_at(contours: &[Contour], p: Point) -> i32 {
    let mut winding = 0;
    for c in contours {
        let n = c.points.len();
        if n < 2 {
            continue;
        }
        for i in 0..n {
            let a = c.points[i];
            let b = c.points[(i + 1) % n];
            if a.y == b.y {
                continue;
            }
            let (lo, hi, dir) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
            if p.y < lo.y || p.y >= hi.y {
                continue;
            }
            let t = (p.y - lo.y) / (hi.y - lo.y);
            let x = lo.x + t * (hi.x - lo.x);
            if x > p.x {
                winding += dir;
            }
        }
    }
    winding
}

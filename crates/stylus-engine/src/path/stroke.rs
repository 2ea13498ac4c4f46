//! Stroker: turns flattened contours into fillable polygons.
//!
//! Every segment becomes a quad, every join and cap its own polygon. All
//! polygons share one orientation so the union fills correctly under the
//! non-zero rule.

use crate::coords::Point;
use crate::paint::{LineCap, LineJoin};

use super::flatten::{circle_segments, Contour};

/// Stroke geometry parameters in the contour's coordinate space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f32,
}

pub type Polygon = Vec<Point>;

/// Outlines every contour. `tolerance` bounds the error of round joins and caps.
pub fn stroke_contours(contours: &[Contour], style: &StrokeStyle, tolerance: f32) -> Vec<Polygon> {
    let mut out = Vec::new();
    if !(style.width > 0.0) {
        return out;
    }
    for c in contours {
        stroke_contour(c, style, tolerance, &mut out);
    }
    for poly in &mut out {
        orient_positive(poly);
    }
    out
}

/// Polygon covering a single stroked point: a disc for round caps, a square otherwise.
pub fn dot_polygon(center: Point, width: f32, round: bool, tolerance: f32) -> Polygon {
    let r = width * 0.5;
    if round {
        circle_polygon(center, r, tolerance)
    } else {
        vec![
            Point::new(center.x - r, center.y - r),
            Point::new(center.x + r, center.y - r),
            Point::new(center.x + r, center.y + r),
            Point::new(center.x - r, center.y + r),
        ]
    }
}

fn stroke_contour(c: &Contour, s: &StrokeStyle, tol: f32, out: &mut Vec<Polygon>) {
    let mut pts = c.points.clone();
    if c.closed && pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    let hw = s.width * 0.5;

    if pts.len() == 1 {
        match s.cap {
            LineCap::Butt => {}
            LineCap::Square => out.push(dot_polygon(pts[0], s.width, false, tol)),
            LineCap::Round => out.push(circle_polygon(pts[0], hw, tol)),
        }
        return;
    }

    let n = pts.len();
    let seg_count = if c.closed { n } else { n - 1 };
    for i in 0..seg_count {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        if let Some(d) = (b - a).normalized() {
            let off = d.perp() * hw;
            out.push(vec![a + off, b + off, b - off, a - off]);
        }
    }

    let joins = if c.closed { 0..n } else { 1..n - 1 };
    for i in joins {
        let prev = pts[(i + n - 1) % n];
        let next = pts[(i + 1) % n];
        join(prev, pts[i], next, s, hw, tol, out);
    }

    if !c.closed {
        if let Some(d) = (pts[0] - pts[1]).normalized() {
            cap(pts[0], d, hw, s.cap, tol, out);
        }
        if let Some(d) = (pts[n - 1] - pts[n - 2]).normalized() {
            cap(pts[n - 1], d, hw, s.cap, tol, out);
        }
    }
}

fn join(prev: Point, v: Point, next: Point, s: &StrokeStyle, hw: f32, tol: f32, out: &mut Vec<Polygon>) {
    let (Some(d0), Some(d1)) = ((v - prev).normalized(), (next - v).normalized()) else {
        return;
    };
    let cross = d0.cross(d1);
    let dot = d0.dot(d1);
    if cross.abs() < 1e-6 && dot > 0.0 {
        return;
    }

    if s.join == LineJoin::Round {
        out.push(circle_polygon(v, hw, tol));
        return;
    }

    // outer side of the turn
    let side = if cross > 0.0 { -1.0 } else { 1.0 };
    let n0 = d0.perp() * (hw * side);
    let n1 = d1.perp() * (hw * side);
    let a = v + n0;
    let b = v + n1;

    if s.join == LineJoin::Miter {
        let half_cos = ((1.0 + dot) * 0.5).max(0.0).sqrt();
        if half_cos > 0.0 {
            let ratio = 1.0 / half_cos;
            if ratio <= s.miter_limit {
                if let Some(bisector) = (n0 + n1).normalized() {
                    let tip = v + bisector * (hw * ratio);
                    out.push(vec![v, a, tip, b]);
                    return;
                }
            }
        }
    }
    out.push(vec![v, a, b]);
}

fn cap(p: Point, outward: Point, hw: f32, cap: LineCap, tol: f32, out: &mut Vec<Polygon>) {
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let n = outward.perp() * hw;
            let e = outward * hw;
            out.push(vec![p + n, p + n + e, p - n + e, p - n]);
        }
        LineCap::Round => out.push(circle_polygon(p, hw, tol)),
    }
}

fn circle_polygon(c: Point, r: f32, tol: f32) -> Polygon {
    let n = circle_segments(r, tol);
    (0..n)
        .map(|i| {
            let (sin, cos) = (i as f32 / n as f32 * std::f32::consts::TAU).sin_cos();
            Point::new(c.x + cos * r, c.y + sin * r)
        })
        .collect()
}

fn signed_area(poly: &[Point]) -> f32 {
    let n = poly.len();
    (0..n).map(|i| poly[i].cross(poly[(i + 1) % n])).sum::<f32>() * 0.5
}

fn orient_positive(poly: &mut Polygon) {
    if signed_area(poly) < 0.0 {
        poly.reverse();
    }
}

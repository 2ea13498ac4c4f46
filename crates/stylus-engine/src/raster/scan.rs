//! Scanline polygon fill producing coverage masks.
//!
//! Anti-aliased fills sample `samples` sub-scanlines per pixel row and integrate
//! exact horizontal span coverage on each. Aliased fills test pixel centers only.

use crate::coords::{IntRect, Point, Rect};
use crate::path::FillType;

use super::Mask;

/// Coverage at or above this is treated as full.
const FULL_COVERAGE: f32 = 1.0 - 1e-4;

#[derive(Debug, Copy, Clone)]
struct Edge {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    dir: i32,
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        Some(if a.y < b.y {
            Edge { x0: a.x, y0: a.y, x1: b.x, y1: b.y, dir: 1 }
        } else {
            Edge { x0: b.x, y0: b.y, x1: a.x, y1: a.y, dir: -1 }
        })
    }

    #[inline]
    fn x_at(&self, y: f32) -> f32 {
        self.x0 + (y - self.y0) / (self.y1 - self.y0) * (self.x1 - self.x0)
    }
}

/// Fills the closed polygons under `rule`, clipped to `clip`.
///
/// Returns `None` when nothing is covered.
pub(crate) fn fill_polygons(
    polygons: &[Vec<Point>],
    rule: FillType,
    anti_alias: bool,
    samples: u8,
    clip: IntRect,
) -> Option<Mask> {
    let bounds = Rect::from_points(polygons.iter().flatten().copied())?;
    if !bounds.is_finite() {
        return None;
    }
    let area = bounds.round_out().intersect(clip)?;

    let mut edges: Vec<Edge> = polygons
        .iter()
        .filter(|p| p.len() >= 2)
        .flat_map(|p| (0..p.len()).filter_map(move |i| Edge::new(p[i], p[(i + 1) % p.len()])))
        .collect();
    if edges.is_empty() {
        return None;
    }
    edges.sort_by(|a, b| a.y0.total_cmp(&b.y0));

    let w = area.width() as usize;
    let h = area.height() as usize;
    let mut coverage = vec![0f32; w * h];
    let samples = if anti_alias { samples.max(1) as usize } else { 1 };
    let weight = 1.0 / samples as f32;

    let mut next = 0usize;
    let mut active: Vec<usize> = Vec::new();
    let mut xs: Vec<(f32, i32)> = Vec::new();

    for row in 0..h {
        let py = (area.top + row as i32) as f32;
        let line = &mut coverage[row * w..(row + 1) * w];
        for s in 0..samples {
            let y = py + (s as f32 + 0.5) / samples as f32;
            while next < edges.len() && edges[next].y0 <= y {
                active.push(next);
                next += 1;
            }
            active.retain(|&i| edges[i].y1 > y);

            xs.clear();
            xs.extend(
                active
                    .iter()
                    .map(|&i| &edges[i])
                    .filter(|e| y >= e.y0)
                    .map(|e| (e.x_at(y) - area.left as f32, e.dir)),
            );
            if xs.len() < 2 {
                continue;
            }
            xs.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in xs.windows(2) {
                winding += pair[0].1;
                if rule.is_inside(winding) {
                    if anti_alias {
                        add_span(line, pair[0].0, pair[1].0, weight);
                    } else {
                        add_centers(line, pair[0].0, pair[1].0);
                    }
                }
            }
        }
    }

    let mut any = false;
    for c in &mut coverage {
        if *c >= FULL_COVERAGE {
            *c = 1.0;
        }
        any |= *c > 0.0;
    }
    any.then(|| Mask::new(area, coverage))
}

/// Adds exact horizontal coverage of `[xa, xb)` scaled by `weight`.
fn add_span(line: &mut [f32], xa: f32, xb: f32, weight: f32) {
    let w = line.len() as f32;
    let (xa, xb) = (xa.clamp(0.0, w), xb.clamp(0.0, w));
    if xb <= xa {
        return;
    }
    let ia = xa.floor() as usize;
    let ib = xb.floor() as usize;
    if ia == ib {
        line[ia] += (xb - xa) * weight;
        return;
    }
    line[ia] += (ia as f32 + 1.0 - xa) * weight;
    for c in &mut line[ia + 1..ib] {
        *c += weight;
    }
    if ib < line.len() {
        line[ib] += (xb - ib as f32) * weight;
    }
}

/// Marks pixels whose centers fall inside `[xa, xb)`.
fn add_centers(line: &mut [f32], xa: f32, xb: f32) {
    let w = line.len() as f32;
    let first = (xa - 0.5).ceil().clamp(0.0, w) as usize;
    let end = (xb - 0.5).ceil().clamp(0.0, w) as usize;
    if first < end {
        for c in &mut line[first..end] {
            *c = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_poly(l: f32, t: f32, r: f32, b: f32) -> Vec<Point> {
        vec![Point::new(l, t), Point::new(r, t), Point::new(r, b), Point::new(l, b)]
    }

    const CLIP: IntRect = IntRect::new(0, 0, 100, 100);

    // ── coverage ──────────────────────────────────────────────────────────

    #[test]
    fn pixel_aligned_rect_is_fully_covered() {
        let m = fill_polygons(&[rect_poly(10.0, 10.0, 20.0, 20.0)], FillType::Winding, true, 4, CLIP).unwrap();
        assert_eq!(m.bounds(), IntRect::new(10, 10, 20, 20));
        assert!((0..10).all(|i| m.coverage_at(10 + i, 15) == 1.0));
        assert_eq!(m.coverage_at(9, 15), 0.0);
    }

    #[test]
    fn half_pixel_edge_gives_half_coverage() {
        let m = fill_polygons(&[rect_poly(10.5, 10.0, 20.0, 20.0)], FillType::Winding, true, 4, CLIP).unwrap();
        assert!((m.coverage_at(10, 12) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn aliased_fill_uses_pixel_centers() {
        let m = fill_polygons(&[rect_poly(10.4, 10.0, 20.6, 12.0)], FillType::Winding, false, 4, CLIP).unwrap();
        assert_eq!(m.coverage_at(10, 11), 1.0);
        assert_eq!(m.coverage_at(20, 11), 1.0);
        assert_eq!(m.coverage_at(21, 11), 0.0);
    }

    // ── fill rules ────────────────────────────────────────────────────────

    #[test]
    fn even_odd_leaves_overlap_empty() {
        let polys = [rect_poly(0.0, 0.0, 40.0, 40.0), rect_poly(10.0, 10.0, 30.0, 30.0)];
        let eo = fill_polygons(&polys, FillType::EvenOdd, true, 4, CLIP).unwrap();
        let nz = fill_polygons(&polys, FillType::Winding, true, 4, CLIP).unwrap();
        assert_eq!(eo.coverage_at(20, 20), 0.0);
        assert_eq!(nz.coverage_at(20, 20), 1.0);
        assert_eq!(eo.coverage_at(5, 5), 1.0);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn fill_outside_clip_is_none() {
        assert!(fill_polygons(&[rect_poly(200.0, 200.0, 210.0, 210.0)], FillType::Winding, true, 4, CLIP).is_none());
        assert!(fill_polygons(&[], FillType::Winding, true, 4, CLIP).is_none());
    }

    #[test]
    fn mask_is_clipped_to_device() {
        let m = fill_polygons(&[rect_poly(-10.0, -10.0, 10.0, 10.0)], FillType::Winding, true, 4, CLIP).unwrap();
        assert_eq!(m.bounds(), IntRect::new(0, 0, 10, 10));
    }
}

use super::Point;

/// Axis-aligned rectangle given by its edges (top-left origin).
///
/// Rectangles coming from callers may be unsorted (`left > right`); use
/// [`sorted`](Self::sorted) before treating the edges as min/max.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(self) -> Point {
        Point::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.left < self.right && self.top < self.bottom)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.right.is_finite() && self.bottom.is_finite()
    }

    /// Swaps edges so that `left <= right` and `top <= bottom`.
    #[inline]
    pub fn sorted(self) -> Self {
        Rect::new(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        let r = self.sorted();
        p.x >= r.left && p.y >= r.top && p.x < r.right && p.y < r.bottom
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.sorted();
        let b = other.sorted();

        let r = Rect::new(
            a.left.max(b.left),
            a.top.max(b.top),
            a.right.min(b.right),
            a.bottom.min(b.bottom),
        );

        if r.is_empty() { None } else { Some(r) }
    }

    /// Smallest rectangle containing both.
    #[inline]
    pub fn join(self, other: Rect) -> Rect {
        let a = self.sorted();
        let b = other.sorted();
        Rect::new(
            a.left.min(b.left),
            a.top.min(b.top),
            a.right.max(b.right),
            a.bottom.max(b.bottom),
        )
    }

    #[inline]
    pub fn outset(self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.left - dx, self.top - dy, self.right + dx, self.bottom + dy)
    }

    /// Bounding rectangle of a point set, `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for p in it {
            r.left = r.left.min(p.x);
            r.top = r.top.min(p.y);
            r.right = r.right.max(p.x);
            r.bottom = r.bottom.max(p.y);
        }
        Some(r)
    }

    /// Integer rectangle covering every pixel this rectangle touches.
    #[inline]
    pub fn round_out(self) -> IntRect {
        let r = self.sorted();
        IntRect::new(
            r.left.floor() as i32,
            r.top.floor() as i32,
            r.right.ceil() as i32,
            r.bottom.ceil() as i32,
        )
    }
}

/// Pixel-aligned rectangle, half-open on the right and bottom edges.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl IntRect {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    #[inline]
    pub fn intersect(self, other: IntRect) -> Option<IntRect> {
        let r = IntRect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        if r.is_empty() { None } else { Some(r) }
    }

    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left as f32, self.top as f32, self.right as f32, self.bottom as f32)
    }
}

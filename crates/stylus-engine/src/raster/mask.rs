use crate::coords::IntRect;

/// Per-pixel coverage in `[0, 1]` over a device-space rectangle.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Mask {
    bounds: IntRect,
    coverage: Vec<f32>,
}

impl Mask {
    pub(crate) fn new(bounds: IntRect, coverage: Vec<f32>) -> Self {
        debug_assert_eq!(coverage.len(), (bounds.width() * bounds.height()) as usize);
        Self { bounds, coverage }
    }

    /// Builds a mask from 8-bit coverage whose top-left corner lands at
    /// `(left, top)` in device space, magnified by `scale`, clipped to `clip`.
    ///
    /// Placement stays in floating point until it is clamped to `clip`, so far
    /// off-surface coverage is rejected without integer overflow. Aliased masks
    /// snap coverage to 0 or 1 at the midpoint.
    pub(crate) fn from_alpha8(
        left: f32,
        top: f32,
        scale: f32,
        width: usize,
        height: usize,
        data: &[u8],
        anti_alias: bool,
        clip: IntRect,
    ) -> Option<Self> {
        if width == 0 || height == 0 || !(scale > 0.0) {
            return None;
        }
        let right = left + width as f32 * scale;
        let bottom = top + height as f32 * scale;
        let c = clip.to_rect();
        if !(right > c.left && left < c.right && bottom > c.top && top < c.bottom) {
            return None;
        }
        let bounds = IntRect::new(
            left.max(c.left).floor() as i32,
            top.max(c.top).floor() as i32,
            right.min(c.right).ceil() as i32,
            bottom.min(c.bottom).ceil() as i32,
        )
        .intersect(clip)?;

        // source texel under the center of device pixel `d`
        let texel = |d: i32, origin: f32, n: usize| {
            let s = ((d as f32 + 0.5 - origin) / scale).floor();
            (s >= 0.0 && s < n as f32).then_some(s as usize)
        };
        let mut coverage = Vec::with_capacity((bounds.width() * bounds.height()) as usize);
        for y in bounds.top..bounds.bottom {
            let row = texel(y, top, height);
            for x in bounds.left..bounds.right {
                let a = match (row, texel(x, left, width)) {
                    (Some(ty), Some(tx)) => data.get(ty * width + tx).copied().unwrap_or(0) as f32 / 255.0,
                    _ => 0.0,
                };
                coverage.push(match anti_alias {
                    true => a,
                    false if a >= 0.5 => 1.0,
                    false => 0.0,
                });
            }
        }
        Some(Self::new(bounds, coverage))
    }

    #[inline]
    pub(crate) fn bounds(&self) -> IntRect {
        self.bounds
    }

    /// Coverage at device pixel `(x, y)`; zero outside the mask.
    pub(crate) fn coverage_at(&self, x: i32, y: i32) -> f32 {
        let b = self.bounds;
        if x < b.left || x >= b.right || y < b.top || y >= b.bottom {
            return 0.0;
        }
        self.coverage[((y - b.top) * b.width() + (x - b.left)) as usize]
    }

    /// Visits every pixel with non-zero coverage.
    pub(crate) fn for_each(&self, mut f: impl FnMut(i32, i32, f32)) {
        let b = self.bounds;
        let w = b.width() as usize;
        for (i, &c) in self.coverage.iter().enumerate() {
            if c > 0.0 {
                f(b.left + (i % w) as i32, b.top + (i / w) as i32, c);
            }
        }
    }
}

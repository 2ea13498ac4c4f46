use crate::coords::{Matrix, Rect};
use crate::paint::{Brush, Pen};

/// Which paints a canvas currently draws with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttachMode {
    Unattached,
    PenAttached,
    BrushAttached,
    BothAttached,
}

/// Attached pen and brush. Each slot holds a copy taken at attach time.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AttachState {
    pub pen: Option<Pen>,
    pub brush: Option<Brush>,
}

impl AttachState {
    pub fn mode(&self) -> AttachMode {
        match (self.pen.is_some(), self.brush.is_some()) {
            (false, false) => AttachMode::Unattached,
            (true, false) => AttachMode::PenAttached,
            (false, true) => AttachMode::BrushAttached,
            (true, true) => AttachMode::BothAttached,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pen.is_none() && self.brush.is_none()
    }
}

/// Transform and clip. This is what `save`/`restore` snapshot.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub(crate) struct DeviceState {
    pub matrix: Matrix,
    /// Device-space clip; `None` means unclipped.
    pub clip: Option<Rect>,
}

impl DeviceState {
    pub fn clip_to(&mut self, rect: Rect) {
        let device = self.matrix.map_rect(rect.sorted());
        self.clip = Some(match self.clip {
            None => device,
            Some(current) => current.intersect(device).unwrap_or_default(),
        });
    }
}

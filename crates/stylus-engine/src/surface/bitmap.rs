use std::sync::Arc;

use parking_lot::RwLock;

use crate::coords::IntRect;
use crate::error::SurfaceError;
use crate::paint::{Color, PremulColor};

use super::ImageInfo;

/// Owned pixel storage. Lives behind a [`Bitmap`] handle.
#[derive(Debug, Clone)]
pub(crate) struct Pixmap {
    info: ImageInfo,
    pixels: Vec<[u8; 4]>,
}

impl Pixmap {
    fn new(info: ImageInfo) -> Self {
        Self { info, pixels: vec![[0; 4]; info.pixel_count()] }
    }

    #[inline]
    pub(crate) fn info(&self) -> ImageInfo {
        self.info
    }

    #[inline]
    pub(crate) fn bounds(&self) -> IntRect {
        IntRect::from_size(self.info.width, self.info.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.info.width as usize + x as usize
    }

    /// Caller guarantees `(x, y)` is inside the buffer.
    #[inline]
    pub(crate) fn load(&self, x: u32, y: u32) -> PremulColor {
        self.info.unpack(self.pixels[self.index(x, y)])
    }

    #[inline]
    pub(crate) fn store(&mut self, x: u32, y: u32, c: PremulColor, bias: f32) {
        let i = self.index(x, y);
        self.pixels[i] = self.info.pack(c, bias);
    }

    pub(crate) fn fill(&mut self, c: PremulColor) {
        let px = self.info.pack(c, 0.0);
        self.pixels.fill(px);
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Shared handle to a pixel buffer that a canvas draws into.
///
/// Clones refer to the same storage. After [`release`](Self::release) every
/// access through any clone fails with [`SurfaceError::Released`].
#[derive(Debug, Clone)]
pub struct Bitmap {
    info: ImageInfo,
    store: Arc<RwLock<Option<Pixmap>>>,
}

impl Bitmap {
    /// Allocates a zeroed (transparent) buffer.
    pub fn new(info: ImageInfo) -> Result<Self, SurfaceError> {
        info.validate()?;
        log::trace!("bitmap allocated: {}x{} {:?}", info.width, info.height, info.format);
        Ok(Self { info, store: Arc::new(RwLock::new(Some(Pixmap::new(info)))) })
    }

    #[inline]
    pub fn info(&self) -> ImageInfo {
        self.info
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.info.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Frees the pixels. Idempotent.
    pub fn release(&self) {
        if self.store.write().take().is_some() {
            log::trace!("bitmap released: {}x{}", self.info.width, self.info.height);
        }
    }

    pub fn is_released(&self) -> bool {
        self.store.read().is_none()
    }

    /// `true` when both handles share storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Bitmap) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }

    pub fn read_pixel(&self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        if x >= self.info.width || y >= self.info.height {
            return Err(SurfaceError::OutOfBounds { x, y, width: self.info.width, height: self.info.height });
        }
        self.with_pixmap(|pm| pm.load(x, y).to_color())
    }

    /// Overwrites every pixel with `color`.
    pub fn erase(&self, color: Color) -> Result<(), SurfaceError> {
        self.with_pixmap_mut(|pm| pm.fill(color.into()))
    }

    /// Raw bytes in the buffer's own format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SurfaceError> {
        self.with_pixmap(|pm| pm.as_bytes().to_vec())
    }

    /// Straight-alpha RGBA bytes, row-major, regardless of the stored layout.
    pub fn to_rgba8(&self) -> Result<Vec<u8>, SurfaceError> {
        self.with_pixmap(|pm| {
            let mut out = Vec::with_capacity(self.info.byte_len());
            for y in 0..self.info.height {
                for x in 0..self.info.width {
                    let c = pm.load(x, y).to_color();
                    out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
                }
            }
            out
        })
    }

    pub(crate) fn with_pixmap<R>(&self, f: impl FnOnce(&Pixmap) -> R) -> Result<R, SurfaceError> {
        let guard = self.store.read();
        guard.as_ref().map(f).ok_or(SurfaceError::Released)
    }

    pub(crate) fn with_pixmap_mut<R>(&self, f: impl FnOnce(&mut Pixmap) -> R) -> Result<R, SurfaceError> {
        let mut guard = self.store.write();
        guard.as_mut().map(f).ok_or(SurfaceError::Released)
    }

    pub(crate) fn ensure_live(&self) -> Result<(), SurfaceError> {
        if self.is_released() { Err(SurfaceError::Released) } else { Ok(()) }
    }
}

/// Source of pixel buffers for canvases.
pub trait PixelAllocator {
    fn allocate(&self, info: ImageInfo) -> Result<Bitmap, SurfaceError>;

    fn release(&self, bitmap: &Bitmap) {
        bitmap.release();
    }
}

/// Allocates bitmaps on the heap.
#[derive(Debug, Copy, Clone, Default)]
pub struct HeapAllocator;

impl PixelAllocator for HeapAllocator {
    fn allocate(&self, info: ImageInfo) -> Result<Bitmap, SurfaceError> {
        Bitmap::new(info)
    }
}

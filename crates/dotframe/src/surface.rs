//! The drawing target: a caller-owned byte buffer viewed through a pixel
//! format.

use crate::error::{FrameError, Result};
use crate::pixel::{min_buffer_len, raw_ops, Mirror, PixelFormat, RawOps};

/// A rectangular pixel surface over borrowed storage.
///
/// The surface never allocates, frees, or resizes its backing buffer; the
/// caller supplies it (a display driver's DMA region, a `Vec<u8>`, a static)
/// and keeps ownership for the surface's lifetime. Every drawing call
/// mutates the buffer in place. All drawing coordinates clip silently.
pub struct Surface<'b> {
    buf: &'b mut [u8],
    width: u16,
    height: u16,
    stride: u16,
    format: PixelFormat,
    mirror: Mirror,
    ops: &'static RawOps,
}

impl<'b> Surface<'b> {
    /// Create a surface with the format's default stride and no mirror
    /// transform.
    pub fn new(buf: &'b mut [u8], width: u16, height: u16, format: PixelFormat) -> Result<Self> {
        Self::with_mirror(buf, width, height, format, Mirror::default())
    }

    pub fn with_mirror(
        buf: &'b mut [u8],
        width: u16,
        height: u16,
        format: PixelFormat,
        mirror: Mirror,
    ) -> Result<Self> {
        // The stride runs along the storage axis, which swap_axes flips.
        let requested = if mirror.swap_axes { height } else { width };
        Self::with_stride(buf, width, height, format, requested, mirror)
    }

    /// Create a surface with an explicit stride (rounded up to the format's
    /// packing granularity). Fails if the buffer cannot hold the highest
    /// addressable cell.
    pub fn with_stride(
        buf: &'b mut [u8],
        width: u16,
        height: u16,
        format: PixelFormat,
        stride: u16,
        mirror: Mirror,
    ) -> Result<Self> {
        let stride = format.round_stride(stride);
        let needed = min_buffer_len(
            format,
            stride as usize,
            mirror.swap_axes,
            width as usize,
            height as usize,
        );
        if buf.len() < needed {
            return Err(FrameError::BufferTooSmall { needed, got: buf.len() });
        }
        Ok(Self {
            buf,
            width,
            height,
            stride,
            format,
            mirror,
            ops: raw_ops(format.family()),
        })
    }

    /// Bytes a backing buffer must provide for the given geometry, using the
    /// default (rounded) stride. Convenience for callers allocating buffers.
    pub fn min_buffer_len(width: u16, height: u16, format: PixelFormat, mirror: Mirror) -> usize {
        let requested = if mirror.swap_axes { height } else { width };
        let stride = format.round_stride(requested);
        min_buffer_len(
            format,
            stride as usize,
            mirror.swap_axes,
            width as usize,
            height as usize,
        )
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn stride(&self) -> u16 {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn mirror(&self) -> Mirror {
        self.mirror
    }

    /// The raw backing bytes (what a display driver flushes to the panel).
    pub fn bytes(&self) -> &[u8] {
        self.buf
    }

    fn mirrored(&self, mut x: usize, mut y: usize) -> (usize, usize) {
        if self.mirror.flip_x {
            x = self.width as usize - 1 - x;
        }
        if self.mirror.flip_y {
            y = self.height as usize - 1 - y;
        }
        (x, y)
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, col: u32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let (x, y) = self.mirrored(x as usize, y as usize);
        let set = self.ops.set;
        set(
            self.buf,
            self.format,
            self.stride as usize,
            self.mirror.swap_axes,
            x,
            y,
            col,
        );
    }

    /// Read one pixel, masked to the format's representable range.
    /// Out-of-range coordinates read as 0.
    pub fn get_pixel(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        let (x, y) = self.mirrored(x as usize, y as usize);
        (self.ops.get)(
            self.buf,
            self.format,
            self.stride as usize,
            self.mirror.swap_axes,
            x,
            y,
        )
    }

    /// Read one pixel, `None` when out of range.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(self.get_pixel(x, y))
        }
    }

    /// Fill a rectangle, clipped to the surface. Empty or fully
    /// out-of-bounds extents are a no-op.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: u32) {
        let sw = self.width as i32;
        let sh = self.height as i32;
        if h < 1 || w < 1 || x + w <= 0 || y + h <= 0 || y >= sh || x >= sw {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(sw);
        let y1 = (y + h).min(sh);
        let mut rx = x0 as usize;
        let mut ry = y0 as usize;
        let rw = (x1 - x0) as usize;
        let rh = (y1 - y0) as usize;
        // A mirrored rectangle is still a rectangle; flip the origin and let
        // the raw routine run in storage space.
        if self.mirror.flip_x {
            rx = self.width as usize - rx - rw;
        }
        if self.mirror.flip_y {
            ry = self.height as usize - ry - rh;
        }
        let fill = self.ops.fill;
        fill(
            self.buf,
            self.format,
            self.stride as usize,
            self.mirror.swap_axes,
            rx,
            ry,
            rw,
            rh,
            col,
        );
    }

    /// Fill the whole surface.
    pub fn fill(&mut self, col: u32) {
        self.fill_rect(0, 0, self.width as i32, self.height as i32, col);
    }
}

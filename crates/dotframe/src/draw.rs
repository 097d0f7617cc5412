//! Drawing primitives: lines, rectangles, ellipses, polygon fill, blitting,
//! scrolling, and sample-series curves. Everything is built on the surface's
//! clipped set/get/fill operations, so all inputs clip silently.

use crate::error::{FrameError, Result};
use crate::pixel::Family;
use crate::surface::Surface;

/// Quadrant enables for [`Surface::ellipse`], relative to the center:
/// Q1 = +x/-y, Q2 = -x/-y, Q3 = -x/+y, Q4 = +x/+y.
pub const QUAD_Q1: u8 = 0x01;
pub const QUAD_Q2: u8 = 0x02;
pub const QUAD_Q3: u8 = 0x04;
pub const QUAD_Q4: u8 = 0x08;
pub const QUAD_ALL: u8 = 0x0f;

/// How [`Surface::curve`] plots a sample series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveMode {
    /// One pixel per sample.
    Dots,
    /// Consecutive samples connected with lines.
    Lines,
    /// A bar from the baseline to each sample.
    Bars,
}

/// A borrowed sample series for [`Surface::curve`]. The element type fixes
/// the full-scale divisor used to map samples onto `y_scale` device pixels.
#[derive(Clone, Copy, Debug)]
pub enum Samples<'a> {
    U8(&'a [u8]),
    I8(&'a [i8]),
    U16(&'a [u16]),
    I16(&'a [i16]),
}

impl Samples<'_> {
    fn len(&self) -> usize {
        match self {
            Samples::U8(s) => s.len(),
            Samples::I8(s) => s.len(),
            Samples::U16(s) => s.len(),
            Samples::I16(s) => s.len(),
        }
    }

    fn get(&self, i: usize) -> i32 {
        match self {
            Samples::U8(s) => s[i] as i32,
            Samples::I8(s) => s[i] as i32,
            Samples::U16(s) => s[i] as i32,
            Samples::I16(s) => s[i] as i32,
        }
    }

    fn full_scale(&self) -> i32 {
        match self {
            Samples::U8(_) => 256,
            Samples::I8(_) => 128,
            Samples::U16(_) => 65536,
            Samples::I16(_) => 32768,
        }
    }
}

impl Surface<'_> {
    /// Horizontal line of `w` pixels starting at (x, y).
    pub fn hline(&mut self, x: i32, y: i32, w: i32, col: u32) {
        self.fill_rect(x, y, w, 1, col);
    }

    /// Vertical line of `h` pixels starting at (x, y).
    pub fn vline(&mut self, x: i32, y: i32, h: i32, col: u32) {
        self.fill_rect(x, y, 1, h, col);
    }

    /// Rectangle outline, or a filled rectangle when `fill` is set.
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: u32, fill: bool) {
        if fill {
            self.fill_rect(x, y, w, h, col);
        } else {
            self.fill_rect(x, y, w, 1, col);
            self.fill_rect(x, y + h - 1, w, 1, col);
            self.fill_rect(x, y, 1, h, col);
            self.fill_rect(x + w - 1, y, 1, h, col);
        }
    }

    /// Integer Bresenham line from (x1, y1) to (x2, y2).
    ///
    /// Steep lines are transposed before stepping so the error term stays in
    /// one branch; the endpoint is always plotted.
    pub fn line(&mut self, mut x1: i32, mut y1: i32, x2: i32, y2: i32, col: u32) {
        let mut dx = x2 - x1;
        let mut sx;
        if dx > 0 {
            sx = 1;
        } else {
            dx = -dx;
            sx = -1;
        }
        let mut dy = y2 - y1;
        let mut sy;
        if dy > 0 {
            sy = 1;
        } else {
            dy = -dy;
            sy = -1;
        }
        let steep = dy > dx;
        if steep {
            std::mem::swap(&mut x1, &mut y1);
            std::mem::swap(&mut dx, &mut dy);
            std::mem::swap(&mut sx, &mut sy);
        }
        let w = self.width() as i32;
        let h = self.height() as i32;
        let mut e = 2 * dy - dx;
        for _ in 0..dx {
            if steep {
                if 0 <= y1 && y1 < w && 0 <= x1 && x1 < h {
                    self.set_pixel(y1, x1, col);
                }
            } else if 0 <= x1 && x1 < w && 0 <= y1 && y1 < h {
                self.set_pixel(x1, y1, col);
            }
            while e >= 0 {
                y1 += sy;
                e -= 2 * dx;
            }
            x1 += sx;
            e += 2 * dy;
        }
        self.set_pixel(x2, y2, col);
    }

    /// Midpoint ellipse centered at (cx, cy), radii (rx, ry).
    ///
    /// `quadrants` is a [`QUAD_ALL`]-style mask enabling each quarter
    /// independently; filled mode draws horizontal spans per symmetric point
    /// instead of discrete pixels. Non-positive radii draw nothing.
    pub fn ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, col: u32, fill: bool, quadrants: u8) {
        if rx < 1 || ry < 1 {
            return;
        }
        let two_asq = 2 * rx * rx;
        let two_bsq = 2 * ry * ry;

        // Region where the tangent slope magnitude is below 1.
        let mut x = rx;
        let mut y = 0;
        let mut xchange = ry * ry * (1 - 2 * rx);
        let mut ychange = rx * rx;
        let mut err = 0;
        let mut stop_x = two_bsq * rx;
        let mut stop_y = 0;
        while stop_x >= stop_y {
            self.ellipse_points(cx, cy, x, y, col, fill, quadrants);
            y += 1;
            stop_y += two_asq;
            err += ychange;
            ychange += two_asq;
            if 2 * err + xchange > 0 {
                x -= 1;
                stop_x -= two_bsq;
                err += xchange;
                xchange += two_bsq;
            }
        }

        // Complementary region, stepped along x.
        x = 0;
        y = ry;
        xchange = ry * ry;
        ychange = rx * rx * (1 - 2 * ry);
        err = 0;
        stop_x = 0;
        stop_y = two_asq * ry;
        while stop_x <= stop_y {
            self.ellipse_points(cx, cy, x, y, col, fill, quadrants);
            x += 1;
            stop_x += two_bsq;
            err += xchange;
            xchange += two_bsq;
            if 2 * err + ychange > 0 {
                y -= 1;
                stop_y -= two_asq;
                err += ychange;
                ychange += two_asq;
            }
        }
    }

    fn ellipse_points(&mut self, cx: i32, cy: i32, x: i32, y: i32, col: u32, fill: bool, mask: u8) {
        if fill {
            if mask & QUAD_Q1 != 0 {
                self.fill_rect(cx, cy - y, x + 1, 1, col);
            }
            if mask & QUAD_Q2 != 0 {
                self.fill_rect(cx - x, cy - y, x + 1, 1, col);
            }
            if mask & QUAD_Q3 != 0 {
                self.fill_rect(cx - x, cy + y, x + 1, 1, col);
            }
            if mask & QUAD_Q4 != 0 {
                self.fill_rect(cx, cy + y, x + 1, 1, col);
            }
        } else {
            if mask & QUAD_Q1 != 0 {
                self.set_pixel(cx + x, cy - y, col);
            }
            if mask & QUAD_Q2 != 0 {
                self.set_pixel(cx - x, cy - y, col);
            }
            if mask & QUAD_Q3 != 0 {
                self.set_pixel(cx - x, cy + y, col);
            }
            if mask & QUAD_Q4 != 0 {
                self.set_pixel(cx + x, cy + y, col);
            }
        }
    }

    /// Polygon at offset (x, y). Outline mode connects consecutive vertices
    /// (wrapping); fill mode is an integer scanline edge-list fill with
    /// half-open edges and explicit patch-up of local extrema. Empty vertex
    /// data is a no-op.
    pub fn poly(&mut self, x: i32, y: i32, pts: &[(i32, i32)], col: u32, fill: bool) {
        if pts.is_empty() {
            return;
        }
        if !fill {
            let (mut px1, mut py1) = pts[0];
            for &(px2, py2) in pts.iter().rev() {
                self.line(x + px1, y + py1, x + px2, y + py2, col);
                px1 = px2;
                py1 = py2;
            }
            return;
        }

        let y_min = pts.iter().map(|p| p.1).min().unwrap();
        let y_max = pts.iter().map(|p| p.1).max().unwrap();
        let mut nodes: Vec<i32> = Vec::with_capacity(pts.len());
        for row in y_min..=y_max {
            // Each node is the x coordinate where an edge crosses this row.
            nodes.clear();
            let (mut px1, mut py1) = pts[0];
            for &(px2, py2) in pts.iter().rev() {
                // Half-open rule: skip the bottom endpoint of each edge so a
                // shared vertex is not counted twice.
                if py1 != py2 && ((py1 > row && py2 <= row) || (py1 <= row && py2 > row)) {
                    let node = (32 * px1 + 32 * (px2 - px1) * (row - py1) / (py2 - py1) + 16) / 32;
                    nodes.push(node);
                } else if row == py1.max(py2) {
                    // The half-open rule drops pixels at a local extremum;
                    // fill them in directly.
                    if py1 < py2 {
                        self.set_pixel(x + px2, y + py2, col);
                    } else if py2 < py1 {
                        self.set_pixel(x + px1, y + py1, col);
                    } else {
                        // Horizontal edge; line() handles px2 < px1.
                        self.line(x + px1, y + py1, x + px2, y + py2, col);
                    }
                }
                px1 = px2;
                py1 = py2;
            }
            if nodes.is_empty() {
                continue;
            }
            nodes.sort_unstable();
            for pair in nodes.chunks_exact(2) {
                self.fill_rect(x + pair[0], y + row, pair[1] - pair[0] + 1, 1, col);
            }
        }
    }

    /// Copy `src` onto this surface at offset (x, y), clipped to both.
    ///
    /// A source pixel equal to `key` is skipped. With a `palette`, each
    /// source value indexes the palette surface's row 0 before being
    /// written, enabling indexed-to-true-color blits.
    pub fn blit(&mut self, src: &Surface<'_>, x: i32, y: i32, key: Option<u32>, palette: Option<&Surface<'_>>) {
        if x >= self.width() as i32
            || y >= self.height() as i32
            || -x >= src.width() as i32
            || -y >= src.height() as i32
        {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let sx0 = (-x).max(0);
        let mut sy = (-y).max(0);
        let x_end = (self.width() as i32).min(x + src.width() as i32);
        let y_end = (self.height() as i32).min(y + src.height() as i32);
        for dy in y0..y_end {
            let mut sx = sx0;
            for dx in x0..x_end {
                let mut col = src.get_pixel(sx, sy);
                if let Some(pal) = palette {
                    col = pal.get_pixel(col as i32, 0);
                }
                if key != Some(col) {
                    self.set_pixel(dx, dy, col);
                }
                sx += 1;
            }
            sy += 1;
        }
    }

    /// Shift the surface contents by (dx, dy) in place.
    ///
    /// The iteration direction follows the shift sign so every source pixel
    /// is read before the write that would clobber it. Pixels shifted out of
    /// bounds are lost; the vacated area is left untouched.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        let w = self.width() as i32;
        let h = self.height() as i32;
        if dx <= -w || dx >= w || dy <= -h || dy >= h {
            return;
        }
        let (sx, x_end, x_step) = if dx < 0 { (0, w + dx, 1) } else { (w - 1, dx - 1, -1) };
        let (sy, y_end, y_step) = if dy < 0 { (0, h + dy, 1) } else { (h - 1, dy - 1, -1) };
        let mut y = sy;
        while y != y_end {
            let mut x = sx;
            while x != x_end {
                let col = self.get_pixel(x - dx, y - dy);
                self.set_pixel(x, y, col);
                x += x_step;
            }
            y += y_step;
        }
    }

    /// Plot a sample series (oscilloscope/chart helper). Each sample maps to
    /// `sample * y_scale / full_scale` device pixels relative to the `y0`
    /// baseline; `x_scale` spaces the samples horizontally.
    pub fn curve(
        &mut self,
        data: Samples<'_>,
        mode: CurveMode,
        col: u32,
        x0: i32,
        y0: i32,
        x_scale: i32,
        y_scale: i32,
    ) {
        let full = data.full_scale();
        let mut prev = 0i32;
        for i in 0..data.len() {
            let cur = data.get(i);
            let ci = i as i32;
            match mode {
                CurveMode::Dots => {
                    self.set_pixel(x0 + ci * x_scale, y0 + cur * y_scale / full, col);
                }
                CurveMode::Lines => {
                    if i > 0 {
                        self.line(
                            x0 + (ci - 1) * x_scale,
                            y0 + prev * y_scale / full,
                            x0 + ci * x_scale,
                            y0 + cur * y_scale / full,
                            col,
                        );
                    }
                    prev = cur;
                }
                CurveMode::Bars => {
                    let span = (cur * y_scale / full).abs();
                    if cur > 0 {
                        self.fill_rect((x0 + ci) * x_scale, y0, x_scale, span, col);
                    } else {
                        self.fill_rect((x0 + ci) * x_scale, y0 + cur * y_scale / full, x_scale, span, col);
                    }
                }
            }
        }
    }

    /// Map one row of a 4-bit surface through a 16-entry lookup table
    /// (panel gamma/palette staging). Other formats are rejected.
    pub fn map_row_lut(&self, y: i32, lut: &[u16; 16]) -> Result<Vec<u16>> {
        if self.format().family() != Family::Gs4 {
            return Err(FrameError::Unsupported("row LUT mapping on a non-4-bit surface"));
        }
        let mut out = Vec::with_capacity(self.width() as usize);
        for x in 0..self.width() as i32 {
            out.push(lut[self.get_pixel(x, y) as usize]);
        }
        Ok(out)
    }
}

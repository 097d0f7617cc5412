//! dotframe: embedded framebuffer graphics toolkit.
//! Surfaces over caller-owned buffers in packed panel pixel formats,
//! drawing primitives, compiled-in and file-backed bitmap fonts, BMP
//! load/save.

mod ascii;
#[cfg(feature = "bmp")]
mod bmp;
mod cjk;
mod draw;
mod error;
mod font;
mod pixel;
mod surface;
mod text;

#[cfg(feature = "bmp")]
pub use bmp::{load_bmp, save_bmp, BmpOptions};
pub use cjk::{CjkFont, FontKind};
pub use draw::{CurveMode, Samples, QUAD_ALL, QUAD_Q1, QUAD_Q2, QUAD_Q3, QUAD_Q4};
pub use error::{FrameError, Result};
pub use font::{FontFamily, FontSettings, FontStyle, Glyph, Rotation, SizeClass};
pub use pixel::{Family, Mirror, PixelFormat};
pub use surface::Surface;
pub use text::{draw_text, draw_text_bytes};

// Test utilities
pub mod test_support;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid pixel format code {0:#04x}")]
    InvalidFormat(u8),
    #[error("unknown pixel format name: {0}")]
    UnknownFormatName(String),
    #[error("pixel buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    #[error("unsupported font style code {0:#04x}")]
    UnsupportedStyle(u8),
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    #[error("not a BMP file (bad magic)")]
    BadMagic,
    #[error("bitmap is {file_bpp} bpp, surface format expects {surface_bpp} bpp")]
    DepthMismatch { file_bpp: u16, surface_bpp: u16 },
    #[error("font index: {0}")]
    FontIndex(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;

use crate::{AlphaOp, PixelFormat};

/// Errors from texel packing and unpacking.
///
/// Every variant is detected before the destination buffer is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PackError {
    #[error("unsupported format/type pair: format {format:#06x}, type {ty:#06x}")]
    UnsupportedFormat { format: u32, ty: u32 },

    #[error("no conversion from {src:?} to {dst:?} with {alpha_op:?}")]
    UnsupportedConversion {
        src: PixelFormat,
        dst: PixelFormat,
        alpha_op: AlphaOp,
    },

    #[error("unpack alignment must be 0, 1, 2, 4 or 8, got {0}")]
    InvalidAlignment(u32),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("image size computation overflowed")]
    SizeOverflow,

    #[error("stride is shorter than one row of pixels")]
    InvalidStride,

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("limit exceeded: {what} {value} > {limit}")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },
}

//! Texel packing from and to [`rgb`] crate pixel types via bytemuck.
//!
//! Typed slices are always whole pixels, so these only fail when the
//! destination buffer is too short or the conversion has no packer.
//!
//! ```rust
//! use rgb::Rgba;
//! use texpack::{AlphaOp, PixelFormat, typed_rgb};
//!
//! let pixels = vec![Rgba::new(200u8, 100, 50, 128); 4];
//! let mut rgb565 = vec![0u8; 4 * 2];
//! typed_rgb::pack_rgba8(&pixels, PixelFormat::Rgb565, AlphaOp::None, &mut rgb565).unwrap();
//!
//! let back = typed_rgb::unpack_to_rgba8(PixelFormat::Rgb565, &rgb565).unwrap();
//! assert_eq!(back[0], Rgba::new(201, 101, 54, 255));
//! ```

use alloc::vec;
use alloc::vec::Vec;

use rgb::{Bgra, Rgba};

use crate::{AlphaOp, PackError, PixelFormat};

// ---------------------------------------------------------------------------
// Packing
// ---------------------------------------------------------------------------

/// Pack straight RGBA8 pixels into `dst_format`.
///
/// `dst` must hold at least `src.len()` texels of `dst_format`. Float
/// destinations get each channel divided by 255.
pub fn pack_rgba8(
    src: &[Rgba<u8>],
    dst_format: PixelFormat,
    alpha_op: AlphaOp,
    dst: &mut [u8],
) -> Result<(), PackError> {
    pack_row(PixelFormat::Rgba8, bytemuck::cast_slice(src), dst_format, alpha_op, dst)
}

/// Pack BGRA8 pixels, as most platform decoders hand them out, into
/// `dst_format`.
pub fn pack_bgra8(
    src: &[Bgra<u8>],
    dst_format: PixelFormat,
    alpha_op: AlphaOp,
    dst: &mut [u8],
) -> Result<(), PackError> {
    pack_row(PixelFormat::Bgra8, bytemuck::cast_slice(src), dst_format, alpha_op, dst)
}

fn pack_row(
    src_format: PixelFormat,
    src: &[u8],
    dst_format: PixelFormat,
    alpha_op: AlphaOp,
    dst: &mut [u8],
) -> Result<(), PackError> {
    let width = src.len() / 4;
    let dst_row = width
        .checked_mul(dst_format.texel_bytes())
        .ok_or(PackError::SizeOverflow)?;
    crate::pack_pixels_strided(
        src, src_format, src.len(), dst, dst_format, dst_row, width, 1, alpha_op, false,
    )
}

// ---------------------------------------------------------------------------
// Unpacking
// ---------------------------------------------------------------------------

/// Unpack every whole texel of `format` in `src` into RGBA8 pixels.
///
/// Trailing bytes that do not make up a full texel are ignored.
pub fn unpack_to_rgba8(format: PixelFormat, src: &[u8]) -> Result<Vec<Rgba<u8>>, PackError> {
    let width = src.len() / format.texel_bytes();
    let mut out = vec![Rgba::new(0, 0, 0, 0); width];
    crate::unpack_row_to_rgba8(format, src, bytemuck::cast_slice_mut(&mut out), width)?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// In-place alpha ops
// ---------------------------------------------------------------------------

fn alpha_inplace(pixels: &mut [Rgba<u8>], op: fn([u8; 4]) -> [u8; 4]) {
    for px in pixels {
        let [r, g, b, a] = op([px.r, px.g, px.b, px.a]);
        *px = Rgba::new(r, g, b, a);
    }
}

/// Premultiply color by alpha in place, truncating.
pub fn premultiply_rgba(pixels: &mut [Rgba<u8>]) {
    alpha_inplace(pixels, crate::rows::premultiply8);
}

/// Divide color by alpha in place. Lossy; pixels with zero alpha keep
/// their color.
pub fn unmultiply_rgba(pixels: &mut [Rgba<u8>]) {
    alpha_inplace(pixels, crate::rows::unmultiply8);
}

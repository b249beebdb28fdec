// ---------------------------------------------------------------------------
// Row converters: one row between any encoding and the RGBA8 / RGBA32F
// intermediate.
//
// Architecture: the five hot unpack shapes (BGRA8, RGB8, BGR8, R8, RA8) have
// #[rite] SIMD row functions behind #[arcane] wrappers, selected per call
// with incant!. Everything else is a scalar match over the closed format set
// in unpack.rs / pack.rs.
// ---------------------------------------------------------------------------

use crate::{AlphaOp, PackError, PixelFormat};
use archmage::incant;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

mod pack;
mod unpack;

pub(crate) use pack::{from_rgba8, from_rgba32f};
#[cfg(feature = "rgb")]
pub(crate) use pack::{premultiply8, unmultiply8};
pub(crate) use unpack::{to_rgba8, to_rgba32f};


// ===========================================================================
// Dispatch
// ===========================================================================

fn bgra_to_rgba(src: &[u8], dst: &mut [u8]) {
    incant!(bgra_to_rgba_impl(src, dst), [v3, scalar]);
}

fn rgb_to_rgba(src: &[u8], dst: &mut [u8]) {
    incant!(rgb_to_rgba_impl(src, dst), [v3, scalar]);
}

fn bgr_to_rgba(src: &[u8], dst: &mut [u8]) {
    incant!(bgr_to_rgba_impl(src, dst), [v3, scalar]);
}

fn r_to_rgba(src: &[u8], dst: &mut [u8]) {
    incant!(r_to_rgba_impl(src, dst), [v3, scalar]);
}

fn ra_to_rgba(src: &[u8], dst: &mut [u8]) {
    incant!(ra_to_rgba_impl(src, dst), [v3, scalar]);
}

// ===========================================================================
// Validation
// ===========================================================================

#[inline]
fn row_bytes(width: usize, bpp: usize) -> Result<usize, PackError> {
    width.checked_mul(bpp).ok_or(PackError::SizeOverflow)
}

#[inline]
fn check_row(
    src_len: usize,
    src_bytes: usize,
    dst_len: usize,
    dst_bytes: usize,
) -> Result<(), PackError> {
    crate::layout::check_buffer(src_len, src_bytes)?;
    crate::layout::check_buffer(dst_len, dst_bytes)
}

// ===========================================================================
// Public row API
// ===========================================================================

/// Unpack `width` texels of `format` into RGBA8.
///
/// Missing channels are synthesized: luminance replicates into R, G and B;
/// pure alpha gets black color; formats without alpha get 255. Packed 16-bit
/// fields widen by bit replication, 16-bit channels keep their high byte and
/// float channels are clamped to [0, 1] and truncated.
///
/// ```
/// use texpack::{PixelFormat, unpack_row_to_rgba8};
///
/// let mut out = [0u8; 4];
/// unpack_row_to_rgba8(PixelFormat::Rgb565, &0xF800u16.to_ne_bytes(), &mut out, 1).unwrap();
/// assert_eq!(out, [255, 0, 0, 255]);
/// ```
pub fn unpack_row_to_rgba8(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
) -> Result<(), PackError> {
    let (sb, db) = (row_bytes(width, format.texel_bytes())?, row_bytes(width, 4)?);
    check_row(src.len(), sb, dst.len(), db)?;
    to_rgba8(format, &src[..sb], &mut dst[..db]);
    Ok(())
}

/// Unpack `width` texels of `format` into RGBA32F. Integer channels are
/// first unpacked as by [`unpack_row_to_rgba8`] and then divided by 255.
pub fn unpack_row_to_rgba32f(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [f32],
    width: usize,
) -> Result<(), PackError> {
    let (sb, dn) = (row_bytes(width, format.texel_bytes())?, row_bytes(width, 4)?);
    check_row(src.len(), sb, dst.len(), dn)?;
    to_rgba32f(format, &src[..sb], &mut dst[..dn]);
    Ok(())
}

/// Pack `width` RGBA8 pixels into `format`, applying `alpha_op` first.
///
/// Color is scaled through `f32` and truncated. [`AlphaOp::Unmultiply`] is
/// lossy and leaves color untouched where alpha is 0.
///
/// `format` must be an 8-bit or packed 16-bit encoding; anything else is
/// [`PackError::UnsupportedConversion`].
pub fn pack_row_from_rgba8(
    format: PixelFormat,
    alpha_op: AlphaOp,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
) -> Result<(), PackError> {
    let (sb, db) = (row_bytes(width, 4)?, row_bytes(width, format.texel_bytes())?);
    check_row(src.len(), sb, dst.len(), db)?;
    from_rgba8(format, alpha_op, &src[..sb], &mut dst[..db])
}

/// Pack `width` RGBA32F pixels into the float encoding `format`, applying
/// `alpha_op` first. Channel values are written as they are, unclamped.
pub fn pack_row_from_rgba32f(
    format: PixelFormat,
    alpha_op: AlphaOp,
    src: &[f32],
    dst: &mut [u8],
    width: usize,
) -> Result<(), PackError> {
    let (sn, db) = (row_bytes(width, 4)?, row_bytes(width, format.texel_bytes())?);
    check_row(src.len(), sn, dst.len(), db)?;
    from_rgba32f(format, alpha_op, &src[..sn], &mut dst[..db])
}

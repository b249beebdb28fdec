//! Whole-image texel packing using [`imgref`] types.
//!
//! Source images may be strided; packed output is always tightly packed, as
//! a texture upload expects.
//!
//! ```rust
//! use imgref::ImgVec;
//! use rgb::Rgba;
//! use texpack::{AlphaOp, PixelFormat, img};
//!
//! let image = ImgVec::new(vec![Rgba::new(255u8, 0, 0, 255); 4 * 3], 4, 3);
//! let rgb565 = img::pack_img_rgba(image.as_ref(), PixelFormat::Rgb565, AlphaOp::None, false).unwrap();
//! assert_eq!(rgb565.len(), 4 * 3 * 2);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::{Bgra, Rgba};

use crate::{AlphaOp, PackError, PixelFormat};

fn pack_img<T: bytemuck::Pod>(
    img: ImgRef<'_, T>,
    src_format: PixelFormat,
    dst_format: PixelFormat,
    alpha_op: AlphaOp,
    flip_y: bool,
) -> Result<Vec<u8>, PackError> {
    let (w, h) = (img.width(), img.height());
    let buf: &[T] = img.buf();
    let src_stride = img
        .stride()
        .checked_mul(src_format.texel_bytes())
        .ok_or(PackError::SizeOverflow)?;
    let dst_row = w
        .checked_mul(dst_format.texel_bytes())
        .ok_or(PackError::SizeOverflow)?;
    let mut out = vec![0u8; dst_row.checked_mul(h).ok_or(PackError::SizeOverflow)?];
    crate::pack_pixels_strided(
        bytemuck::cast_slice(buf),
        src_format,
        src_stride,
        &mut out,
        dst_format,
        dst_row,
        w,
        h,
        alpha_op,
        flip_y,
    )?;
    Ok(out)
}

/// Pack a straight-alpha RGBA8 image into a tightly packed `dst_format`
/// buffer.
pub fn pack_img_rgba(
    img: ImgRef<'_, Rgba<u8>>,
    dst_format: PixelFormat,
    alpha_op: AlphaOp,
    flip_y: bool,
) -> Result<Vec<u8>, PackError> {
    pack_img(img, PixelFormat::Rgba8, dst_format, alpha_op, flip_y)
}

/// Pack a BGRA8 image into a tightly packed `dst_format` buffer.
pub fn pack_img_bgra(
    img: ImgRef<'_, Bgra<u8>>,
    dst_format: PixelFormat,
    alpha_op: AlphaOp,
    flip_y: bool,
) -> Result<Vec<u8>, PackError> {
    pack_img(img, PixelFormat::Bgra8, dst_format, alpha_op, flip_y)
}

/// Unpack `width` x `height` texels of `format`, rows padded to
/// `alignment`, into an RGBA8 image.
///
/// Images cannot be zero pixels wide, so `width` must be nonzero.
pub fn unpack_img(
    format: PixelFormat,
    data: &[u8],
    width: usize,
    height: usize,
    alignment: u32,
) -> Result<ImgVec<Rgba<u8>>, PackError> {
    if width == 0 {
        return Err(PackError::InvalidDimensions {
            width: 0,
            height: height as i64,
        });
    }
    let src_stride = crate::row_stride(width, format.texel_bytes(), alignment)?;
    let len = width.checked_mul(height).ok_or(PackError::SizeOverflow)?;
    let dst_row = width.checked_mul(4).ok_or(PackError::SizeOverflow)?;
    let mut out = vec![Rgba::new(0u8, 0, 0, 0); len];
    crate::pack_pixels_strided(
        data,
        format,
        src_stride,
        bytemuck::cast_slice_mut(&mut out),
        PixelFormat::Rgba8,
        dst_row,
        width,
        height,
        AlphaOp::None,
        false,
    )?;
    Ok(ImgVec::new(out, width, height))
}

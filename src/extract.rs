// ---------------------------------------------------------------------------
// Whole-buffer helpers for texture uploads: tightly packed output buffers
// built from client pixel data, and in-place vertical flips.
// ---------------------------------------------------------------------------

use alloc::vec;
use alloc::vec::Vec;

use crate::layout::{check_buffer, dimensions, extent, row_stride};
use crate::{Limits, PackError, PixelFormat, PixelStore, pack_pixels};

/// Reverse the row order of `data` in place.
///
/// Rows are `width * bytes_per_pixel` bytes, padded to `alignment`; padding
/// bytes stay where they are.
///
/// ```
/// let mut data = [1, 2, 0, 0, 3, 4];
/// texpack::flip_vertically(&mut data, 2, 2, 1, 4).unwrap();
/// assert_eq!(data, [3, 4, 0, 0, 1, 2]);
/// ```
pub fn flip_vertically(
    data: &mut [u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
    alignment: u32,
) -> Result<(), PackError> {
    let stride = row_stride(width, bytes_per_pixel, alignment)?;
    let row = width * bytes_per_pixel;
    check_buffer(data.len(), extent(stride, row, height)?)?;
    for top in 0..height / 2 {
        let bottom = height - 1 - top;
        let (upper, lower) = data.split_at_mut(bottom * stride);
        upper[top * stride..][..row].swap_with_slice(&mut lower[..row]);
    }
    Ok(())
}

fn output_len(
    format: PixelFormat,
    width: usize,
    height: usize,
    limits: &Limits,
) -> Result<usize, PackError> {
    limits.check(width, height)?;
    let len = width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(format.texel_bytes()))
        .ok_or(PackError::SizeOverflow)?;
    limits.check_bytes(len)?;
    Ok(len)
}

/// Copy client texture data of GL `(format, ty)` into a tightly packed
/// buffer of the same encoding, applying the store's alignment, flip and
/// premultiply settings.
///
/// The source is taken to hold straight alpha, so only premultiplication is
/// ever applied.
///
/// ```
/// use texpack::{PixelStore, extract_texture_data, gl};
///
/// // Two LUMINANCE rows of 3 bytes, padded to 4.
/// let pixels = [1, 2, 3, 0, 4, 5, 6];
/// let store = PixelStore::default().with_flip_y(true);
/// let data = extract_texture_data(&pixels, 3, 2, gl::LUMINANCE, gl::UNSIGNED_BYTE, &store).unwrap();
/// assert_eq!(data, [4, 5, 6, 1, 2, 3]);
/// ```
pub fn extract_texture_data(
    pixels: &[u8],
    width: i32,
    height: i32,
    format: u32,
    ty: u32,
    store: &PixelStore,
) -> Result<Vec<u8>, PackError> {
    extract_texture_data_with_limits(pixels, width, height, format, ty, store, &Limits::default())
}

/// [`extract_texture_data`], refusing to allocate past `limits`.
pub fn extract_texture_data_with_limits(
    pixels: &[u8],
    width: i32,
    height: i32,
    format: u32,
    ty: u32,
    store: &PixelStore,
    limits: &Limits,
) -> Result<Vec<u8>, PackError> {
    let source = PixelFormat::from_gl(format, ty)?;
    let (w, h) = dimensions(width, height)?;
    let mut data = vec![0u8; output_len(source, w, h, limits)?];
    pack_pixels(
        pixels,
        source,
        width,
        height,
        store.unpack_alignment,
        format,
        ty,
        store.alpha_op_for(false),
        &mut data,
        store.flip_y,
    )?;
    Ok(data)
}

/// Convert canvas `ImageData` (tightly packed, straight-alpha RGBA8) into a
/// tightly packed buffer of GL `(format, ty)`.
///
/// `store.unpack_alignment` does not apply: image data has no row padding.
///
/// ```
/// use texpack::{PixelStore, extract_image_data, gl};
///
/// let rgba = [200, 100, 50, 128];
/// let store = PixelStore::default().with_premultiply_alpha(true);
/// let data = extract_image_data(&rgba, 1, 1, gl::RGB, gl::UNSIGNED_BYTE, &store).unwrap();
/// assert_eq!(data, [100, 50, 25]);
/// ```
pub fn extract_image_data(
    rgba8: &[u8],
    width: i32,
    height: i32,
    format: u32,
    ty: u32,
    store: &PixelStore,
) -> Result<Vec<u8>, PackError> {
    extract_image_data_with_limits(rgba8, width, height, format, ty, store, &Limits::default())
}

/// [`extract_image_data`], refusing to allocate past `limits`.
pub fn extract_image_data_with_limits(
    rgba8: &[u8],
    width: i32,
    height: i32,
    format: u32,
    ty: u32,
    store: &PixelStore,
    limits: &Limits,
) -> Result<Vec<u8>, PackError> {
    let dst = PixelFormat::from_gl(format, ty)?;
    let (w, h) = dimensions(width, height)?;
    let mut data = vec![0u8; output_len(dst, w, h, limits)?];
    pack_pixels(
        rgba8,
        PixelFormat::Rgba8,
        width,
        height,
        0,
        format,
        ty,
        store.alpha_op_for(false),
        &mut data,
        store.flip_y,
    )?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl;

    #[test]
    fn flip_keeps_padding_in_place() {
        // 3 rows of 3 bytes, stride 4, last row unpadded.
        let mut data = [1, 1, 1, 9, 2, 2, 2, 9, 3, 3, 3];
        flip_vertically(&mut data, 3, 3, 1, 4).unwrap();
        assert_eq!(data, [3, 3, 3, 9, 2, 2, 2, 9, 1, 1, 1]);
    }

    #[test]
    fn flip_twice_is_identity() {
        let original: Vec<u8> = (0..40).collect();
        let mut data = original.clone();
        flip_vertically(&mut data, 5, 4, 2, 2).unwrap();
        assert_ne!(data, original);
        flip_vertically(&mut data, 5, 4, 2, 2).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn flip_rejects_short_buffer() {
        let mut data = [0u8; 7];
        assert_eq!(
            flip_vertically(&mut data, 2, 2, 2, 1),
            Err(PackError::BufferTooSmall {
                needed: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn texture_data_strips_padding_and_premultiplies() {
        // LUMINANCE_ALPHA rows of 2 bytes pad to 4. Luminance is premultiplied too.
        let pixels = [100, 50, 0, 0, 200, 128];
        let store = PixelStore::default().with_premultiply_alpha(true);
        let data = extract_texture_data(
            &pixels,
            1,
            2,
            gl::LUMINANCE_ALPHA,
            gl::UNSIGNED_BYTE,
            &store,
        )
        .unwrap();
        assert_eq!(data, [19, 50, 100, 128]);

        let data =
            extract_texture_data(&[200, 100, 50, 128], 1, 1, gl::RGBA, gl::UNSIGNED_BYTE, &store)
                .unwrap();
        assert_eq!(data, [100, 50, 25, 128]);
    }

    #[test]
    fn texture_data_honours_limits() {
        let limits = Limits {
            max_pixels: Some(3),
            ..Limits::default()
        };
        let store = PixelStore::default();
        assert!(matches!(
            extract_texture_data_with_limits(&[0; 16], 2, 2, gl::RGBA, gl::UNSIGNED_BYTE, &store, &limits),
            Err(PackError::LimitExceeded { what: "pixels", .. })
        ));
        let limits = Limits {
            max_bytes: Some(15),
            ..Limits::default()
        };
        assert!(matches!(
            extract_image_data_with_limits(&[0; 16], 2, 2, gl::RGBA, gl::UNSIGNED_BYTE, &store, &limits),
            Err(PackError::LimitExceeded { what: "bytes", .. })
        ));
    }

    #[test]
    fn image_data_to_packed_and_float() {
        let rgba = [255, 0, 0, 255, 0, 0, 255, 255];
        let store = PixelStore::default().with_flip_y(true);
        let data =
            extract_image_data(&rgba, 1, 2, gl::RGB, gl::UNSIGNED_SHORT_5_6_5, &store).unwrap();
        let words: Vec<u16> = data
            .chunks_exact(2)
            .map(|c| u16::from_ne_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(words, [0x001F, 0xF800]);

        let data = extract_image_data(&rgba[..4], 1, 1, gl::LUMINANCE, gl::FLOAT, &store).unwrap();
        assert_eq!(data, 1.0f32.to_ne_bytes());
    }

    #[test]
    fn unknown_gl_pair_is_rejected() {
        let store = PixelStore::default();
        assert_eq!(
            extract_image_data(&[0; 4], 1, 1, gl::BGRA_EXT, gl::FLOAT, &store),
            Err(PackError::UnsupportedFormat {
                format: gl::BGRA_EXT,
                ty: gl::FLOAT
            })
        );
    }
}

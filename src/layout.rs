// ---------------------------------------------------------------------------
// Row stride and image size arithmetic. All of it is checked.
// ---------------------------------------------------------------------------

use crate::PackError;
use crate::gl;

/// Validate a GL pack/unpack alignment. `0` means tightly packed.
#[inline]
pub(crate) fn check_alignment(alignment: u32) -> Result<usize, PackError> {
    match alignment {
        0 | 1 | 2 | 4 | 8 => Ok(alignment as usize),
        other => Err(PackError::InvalidAlignment(other)),
    }
}

/// Bytes from the start of one row to the start of the next.
///
/// `width * texel_bytes`, rounded up to a multiple of `alignment` unless
/// `alignment` is 0 (tightly packed).
///
/// ```
/// assert_eq!(texpack::row_stride(3, 3, 4), Ok(12));
/// assert_eq!(texpack::row_stride(3, 3, 0), Ok(9));
/// ```
pub fn row_stride(width: usize, texel_bytes: usize, alignment: u32) -> Result<usize, PackError> {
    let alignment = check_alignment(alignment)?;
    let valid = width
        .checked_mul(texel_bytes)
        .ok_or(PackError::SizeOverflow)?;
    if alignment <= 1 {
        return Ok(valid);
    }
    let residual = valid % alignment;
    if residual == 0 {
        Ok(valid)
    } else {
        valid
            .checked_add(alignment - residual)
            .ok_or(PackError::SizeOverflow)
    }
}

/// Bytes needed to hold `height` rows at `stride`, the last row unpadded.
#[inline]
pub(crate) fn extent(stride: usize, row_bytes: usize, height: usize) -> Result<usize, PackError> {
    if height == 0 {
        return Ok(0);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(PackError::SizeOverflow)
}

#[inline]
pub(crate) fn check_buffer(len: usize, needed: usize) -> Result<(), PackError> {
    if len < needed {
        Err(PackError::BufferTooSmall {
            needed,
            actual: len,
        })
    } else {
        Ok(())
    }
}

/// Convert GL-style signed dimensions, rejecting negatives.
pub(crate) fn dimensions(width: i32, height: i32) -> Result<(usize, usize), PackError> {
    if width < 0 || height < 0 {
        return Err(PackError::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        });
    }
    Ok((width as usize, height as usize))
}

/// `(components_per_pixel, bytes_per_component)` for a GL `(format, type)`.
///
/// The packed 16-bit types report one two-byte component regardless of
/// `format`, which only has to be one GL knows.
pub fn format_and_type_parameters(format: u32, ty: u32) -> Result<(usize, usize), PackError> {
    let unsupported = PackError::UnsupportedFormat { format, ty };
    let components = match format {
        gl::ALPHA | gl::LUMINANCE => 1,
        gl::LUMINANCE_ALPHA => 2,
        gl::RGB => 3,
        gl::RGBA | gl::BGRA_EXT => 4,
        _ => return Err(unsupported),
    };
    match ty {
        gl::UNSIGNED_BYTE => Ok((components, 1)),
        gl::UNSIGNED_SHORT_5_6_5 | gl::UNSIGNED_SHORT_4_4_4_4 | gl::UNSIGNED_SHORT_5_5_5_1 => {
            Ok((1, 2))
        }
        gl::FLOAT => Ok((components, 4)),
        _ => Err(unsupported),
    }
}

/// Size of an image as GL lays it out in client memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Total bytes. Every row but the last is padded.
    pub size: usize,
    /// Padding bytes at the end of each non-final row.
    pub padding: usize,
}

/// Bytes a `width` x `height` image of `(format, type)` occupies with rows
/// padded to `alignment`.
///
/// ```
/// use texpack::{compute_image_size_in_bytes, gl};
///
/// // 3 RGB texels = 9 bytes per row, padded to 12; the last row is not.
/// let s = compute_image_size_in_bytes(gl::RGB, gl::UNSIGNED_BYTE, 3, 2, 4).unwrap();
/// assert_eq!((s.size, s.padding), (21, 3));
/// ```
pub fn compute_image_size_in_bytes(
    format: u32,
    ty: u32,
    width: i32,
    height: i32,
    alignment: u32,
) -> Result<ImageSize, PackError> {
    let alignment = check_alignment(alignment)?;
    let (width, height) = dimensions(width, height)?;
    let (components, bytes_per_component) = format_and_type_parameters(format, ty)?;
    if width == 0 || height == 0 {
        return Ok(ImageSize::default());
    }
    let valid = (components * bytes_per_component)
        .checked_mul(width)
        .ok_or(PackError::SizeOverflow)?;
    let padding = match alignment {
        0 | 1 => 0,
        a => match valid % a {
            0 => 0,
            r => a - r,
        },
    };
    let stride = valid.checked_add(padding).ok_or(PackError::SizeOverflow)?;
    Ok(ImageSize {
        size: extent(stride, valid, height)?,
        padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_padding() {
        assert_eq!(row_stride(3, 3, 4), Ok(12));
        assert_eq!(row_stride(3, 3, 0), Ok(9));
        assert_eq!(row_stride(3, 3, 1), Ok(9));
        assert_eq!(row_stride(3, 3, 8), Ok(16));
        assert_eq!(row_stride(4, 4, 8), Ok(16));
        assert_eq!(row_stride(0, 4, 8), Ok(0));
    }

    #[test]
    fn stride_rejects_bad_alignment_and_overflow() {
        assert_eq!(row_stride(1, 1, 3), Err(PackError::InvalidAlignment(3)));
        assert_eq!(row_stride(usize::MAX, 2, 1), Err(PackError::SizeOverflow));
        assert_eq!(row_stride(usize::MAX, 1, 8), Err(PackError::SizeOverflow));
    }

    #[test]
    fn extent_skips_last_row_padding() {
        assert_eq!(extent(12, 9, 3), Ok(33));
        assert_eq!(extent(12, 9, 0), Ok(0));
        assert_eq!(extent(usize::MAX, 1, 3), Err(PackError::SizeOverflow));
    }

    #[test]
    fn gl_parameters() {
        assert_eq!(format_and_type_parameters(gl::RGBA, gl::UNSIGNED_BYTE), Ok((4, 1)));
        assert_eq!(format_and_type_parameters(gl::BGRA_EXT, gl::UNSIGNED_BYTE), Ok((4, 1)));
        assert_eq!(format_and_type_parameters(gl::LUMINANCE_ALPHA, gl::FLOAT), Ok((2, 4)));
        assert_eq!(
            format_and_type_parameters(gl::RGB, gl::UNSIGNED_SHORT_5_6_5),
            Ok((1, 2))
        );
        assert!(format_and_type_parameters(0, gl::UNSIGNED_BYTE).is_err());
        assert!(format_and_type_parameters(gl::RGB, 0).is_err());
    }

    #[test]
    fn image_size() {
        let s = compute_image_size_in_bytes(gl::RGBA, gl::UNSIGNED_BYTE, 5, 4, 8).unwrap();
        assert_eq!(s, ImageSize { size: 24 * 3 + 20, padding: 4 });
        let s = compute_image_size_in_bytes(gl::ALPHA, gl::UNSIGNED_BYTE, 0, 4, 4).unwrap();
        assert_eq!(s, ImageSize::default());
        assert_eq!(
            compute_image_size_in_bytes(gl::RGBA, gl::UNSIGNED_BYTE, -1, 4, 4),
            Err(PackError::InvalidDimensions { width: -1, height: 4 })
        );
        assert_eq!(
            compute_image_size_in_bytes(gl::RGBA, gl::UNSIGNED_BYTE, 1, 1, 5),
            Err(PackError::InvalidAlignment(5))
        );
    }
}

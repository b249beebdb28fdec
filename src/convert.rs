// ---------------------------------------------------------------------------
// Whole-image conversion: stride math, alpha-op gating and path selection
// around the row converters.
//
// Every check runs before the destination is written, so a returned error
// leaves `dst` untouched.
// ---------------------------------------------------------------------------

use alloc::vec;

use crate::layout::{check_buffer, dimensions, extent, row_stride};
use crate::rows::{from_rgba8, from_rgba32f, to_rgba8, to_rgba32f};
use crate::{AlphaOp, PackError, PixelFormat};

/// How rows get from source to destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Path {
    /// Same encoding, no alpha op: plain row copies.
    Copy,
    /// RGBA8 source packed straight from its own rows.
    PackRgba8,
    /// RGBA8 destination with no alpha op, unpacked straight into it.
    UnpackRgba8,
    /// Unpack into an RGBA8 scratch row, then pack.
    ViaRgba8,
    /// Float destination, through an RGBA32F scratch row unless the
    /// source rows are already aligned RGBA32F.
    ViaRgba32F,
}

/// The alpha op actually applied for a `src` → `dst` conversion.
///
/// Premultiplying or unmultiplying only makes sense when the source carries
/// both color and alpha and the destination keeps color, so any other
/// combination is forced to [`AlphaOp::None`].
///
/// ```
/// use texpack::{AlphaOp, PixelFormat, effective_alpha_op};
///
/// let op = effective_alpha_op(PixelFormat::Rgb8, PixelFormat::Rgba8, AlphaOp::Premultiply);
/// assert_eq!(op, AlphaOp::None);
/// ```
pub fn effective_alpha_op(src: PixelFormat, dst: PixelFormat, alpha_op: AlphaOp) -> AlphaOp {
    if !src.has_alpha() || !src.has_color() || !dst.has_color() {
        AlphaOp::None
    } else {
        alpha_op
    }
}

fn select_path(src: PixelFormat, dst: PixelFormat, alpha_op: AlphaOp) -> Result<Path, PackError> {
    if src == dst && alpha_op == AlphaOp::None {
        return Ok(Path::Copy);
    }
    if !dst.is_packable() {
        return Err(PackError::UnsupportedConversion {
            src,
            dst,
            alpha_op,
        });
    }
    Ok(if dst.is_float() {
        Path::ViaRgba32F
    } else if src == PixelFormat::Rgba8 {
        Path::PackRgba8
    } else if dst == PixelFormat::Rgba8 && alpha_op == AlphaOp::None {
        Path::UnpackRgba8
    } else {
        Path::ViaRgba8
    })
}

/// Row geometry of one conversion. Extents are checked before it is built.
struct Rows {
    src_stride: usize,
    src_row: usize,
    dst_stride: usize,
    dst_row: usize,
    height: usize,
    flip_y: bool,
}

impl Rows {
    /// Run `f` over each source/destination row pair, walking the
    /// destination bottom-up when flipping.
    fn run(
        &self,
        src: &[u8],
        dst: &mut [u8],
        mut f: impl FnMut(&[u8], &mut [u8]) -> Result<(), PackError>,
    ) -> Result<(), PackError> {
        let src_rows = src.chunks(self.src_stride).take(self.height);
        let dst_rows = dst.chunks_mut(self.dst_stride).take(self.height);
        if self.flip_y {
            for (s, d) in src_rows.zip(dst_rows.rev()) {
                f(&s[..self.src_row], &mut d[..self.dst_row])?;
            }
        } else {
            for (s, d) in src_rows.zip(dst_rows) {
                f(&s[..self.src_row], &mut d[..self.dst_row])?;
            }
        }
        Ok(())
    }
}

/// Convert a whole image between encodings using explicit row strides.
///
/// `src_stride` and `dst_stride` are the byte distances between row starts
/// and must each hold at least one row of their encoding. Neither buffer
/// has to include padding after its last row. With `flip_y` the first
/// source row lands in the last destination row.
///
/// Zero `width` or `height` succeeds without touching `dst`.
///
/// ```
/// use texpack::{AlphaOp, PixelFormat, pack_pixels_strided};
///
/// // Two BGRA pixels per row, source rows padded to 12 bytes.
/// let src = [3, 2, 1, 4, 7, 6, 5, 8, 0, 0, 0, 0, 3, 2, 1, 4, 7, 6, 5, 8];
/// let mut dst = [0u8; 12];
/// pack_pixels_strided(
///     &src, PixelFormat::Bgra8, 12,
///     &mut dst, PixelFormat::Rgb8, 6,
///     2, 2, AlphaOp::None, false,
/// ).unwrap();
/// assert_eq!(dst, [1, 2, 3, 5, 6, 7, 1, 2, 3, 5, 6, 7]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn pack_pixels_strided(
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    width: usize,
    height: usize,
    alpha_op: AlphaOp,
    flip_y: bool,
) -> Result<(), PackError> {
    convert(
        src, src_format, src_stride, dst, dst_format, dst_stride, width, height, alpha_op, flip_y,
    )
    .inspect_err(|e| log::debug!("pack_pixels_strided {src_format:?} -> {dst_format:?}: {e}"))
}

#[allow(clippy::too_many_arguments)]
fn convert(
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    width: usize,
    height: usize,
    alpha_op: AlphaOp,
    flip_y: bool,
) -> Result<(), PackError> {
    let alpha_op = effective_alpha_op(src_format, dst_format, alpha_op);
    let path = select_path(src_format, dst_format, alpha_op)?;
    if width == 0 || height == 0 {
        return Ok(());
    }

    let src_row = width
        .checked_mul(src_format.texel_bytes())
        .ok_or(PackError::SizeOverflow)?;
    let dst_row = width
        .checked_mul(dst_format.texel_bytes())
        .ok_or(PackError::SizeOverflow)?;
    if src_stride < src_row || dst_stride < dst_row {
        return Err(PackError::InvalidStride);
    }
    check_buffer(src.len(), extent(src_stride, src_row, height)?)?;
    check_buffer(dst.len(), extent(dst_stride, dst_row, height)?)?;
    let scratch_len = width.checked_mul(4).ok_or(PackError::SizeOverflow)?;

    log::trace!(
        "pack {width}x{height} {src_format:?} -> {dst_format:?} ({alpha_op:?}, flip_y={flip_y}) via {path:?}"
    );

    let rows = Rows {
        src_stride,
        src_row,
        dst_stride,
        dst_row,
        height,
        flip_y,
    };
    match path {
        Path::Copy if !flip_y && src_stride == dst_stride => {
            let n = extent(src_stride, src_row, height)?;
            dst[..n].copy_from_slice(&src[..n]);
            Ok(())
        }
        Path::Copy => rows.run(src, dst, |s, d| {
            d.copy_from_slice(s);
            Ok(())
        }),
        Path::PackRgba8 => rows.run(src, dst, |s, d| from_rgba8(dst_format, alpha_op, s, d)),
        Path::UnpackRgba8 => rows.run(src, dst, |s, d| {
            to_rgba8(src_format, s, d);
            Ok(())
        }),
        Path::ViaRgba8 => {
            let mut scratch = vec![0u8; scratch_len];
            rows.run(src, dst, |s, d| {
                to_rgba8(src_format, s, &mut scratch);
                from_rgba8(dst_format, alpha_op, &scratch, d)
            })
        }
        Path::ViaRgba32F => {
            let mut scratch = vec![0f32; scratch_len];
            let direct = src_format == PixelFormat::Rgba32F;
            rows.run(src, dst, |s, d| {
                let px: &[f32] = match bytemuck::try_cast_slice(s) {
                    Ok(px) if direct => px,
                    _ => {
                        to_rgba32f(src_format, s, &mut scratch);
                        &scratch[..]
                    }
                };
                from_rgba32f(dst_format, alpha_op, px, d)
            })
        }
    }
}

/// Convert `width` x `height` texels of `src_format` into the encoding named
/// by the GL pair `(dst_format, dst_type)`.
///
/// Source rows are padded to `unpack_alignment` (0 means tightly packed);
/// destination rows are always tightly packed. `alpha_op` is applied while
/// packing, subject to [`effective_alpha_op`]. With `flip_y` the image is
/// written bottom-up.
///
/// Fails without writing anything if the GL pair is unknown, the
/// conversion has no packer, the dimensions are negative, a size overflows
/// or either buffer is too short.
///
/// ```
/// use texpack::{AlphaOp, PixelFormat, gl, pack_pixels};
///
/// let src = [200, 100, 50, 128];
/// let mut dst = [0u8; 3];
/// pack_pixels(
///     &src, PixelFormat::Rgba8, 1, 1, 4,
///     gl::RGB, gl::UNSIGNED_BYTE, AlphaOp::Premultiply,
///     &mut dst, false,
/// ).unwrap();
/// assert_eq!(dst, [100, 50, 25]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn pack_pixels(
    src: &[u8],
    src_format: PixelFormat,
    width: i32,
    height: i32,
    unpack_alignment: u32,
    dst_format: u32,
    dst_type: u32,
    alpha_op: AlphaOp,
    dst: &mut [u8],
    flip_y: bool,
) -> Result<(), PackError> {
    let resolved = PixelFormat::from_gl(dst_format, dst_type)
        .inspect_err(|e| log::debug!("pack_pixels: {e}"))?;
    let (width, height) = dimensions(width, height).inspect_err(|e| log::debug!("pack_pixels: {e}"))?;
    let src_stride = row_stride(width, src_format.texel_bytes(), unpack_alignment)
        .inspect_err(|e| log::debug!("pack_pixels: {e}"))?;
    let dst_stride = row_stride(width, resolved.texel_bytes(), 0)?;
    pack_pixels_strided(
        src, src_format, src_stride, dst, resolved, dst_stride, width, height, alpha_op, flip_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl;
    use alloc::vec::Vec;

    fn source(format: PixelFormat, width: usize, height: usize, alignment: u32) -> Vec<u8> {
        let stride = row_stride(width, format.texel_bytes(), alignment).unwrap();
        let len = extent(stride, width * format.texel_bytes(), height).unwrap();
        (0..len).map(|i| (i * 7 % 253) as u8).collect()
    }

    #[test]
    fn same_format_round_trips_for_every_encoding() {
        for format in PixelFormat::ALL {
            for (w, h) in [(0, 3), (3, 0), (1, 1), (2, 2), (17, 3), (256, 2)] {
                for alignment in [0, 1, 2, 4, 8] {
                    let src = source(format, w, h, alignment);
                    let src_stride = row_stride(w, format.texel_bytes(), alignment).unwrap();
                    let row = w * format.texel_bytes();
                    let mut dst = vec![0u8; row * h];
                    pack_pixels_strided(
                        &src, format, src_stride, &mut dst, format, row, w, h, AlphaOp::None,
                        false,
                    )
                    .unwrap();
                    for y in 0..h {
                        assert_eq!(
                            dst[y * row..][..row],
                            src[y * src_stride..][..row],
                            "{format:?} {w}x{h} align {alignment} row {y}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn alpha_op_gating() {
        use PixelFormat::*;
        assert_eq!(effective_alpha_op(Rgb8, Rgba8, AlphaOp::Premultiply), AlphaOp::None);
        assert_eq!(effective_alpha_op(A8, Rgba8, AlphaOp::Premultiply), AlphaOp::None);
        assert_eq!(effective_alpha_op(Rgba8, A8, AlphaOp::Unmultiply), AlphaOp::None);
        assert_eq!(effective_alpha_op(Rgba8, Rgb8, AlphaOp::Premultiply), AlphaOp::Premultiply);
        assert_eq!(effective_alpha_op(Bgra16Big, R8, AlphaOp::Unmultiply), AlphaOp::Unmultiply);

        let src = [10, 20, 30, 40, 50, 60];
        let mut gated = [0u8; 8];
        let mut plain = [0u8; 8];
        pack_pixels_strided(&src, Rgb8, 6, &mut gated, Rgba8, 8, 2, 1, AlphaOp::Premultiply, false)
            .unwrap();
        pack_pixels_strided(&src, Rgb8, 6, &mut plain, Rgba8, 8, 2, 1, AlphaOp::None, false)
            .unwrap();
        assert_eq!(gated, plain);
        assert_eq!(gated, [10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn premultiply_into_rgb8_truncates() {
        let mut dst = [0u8; 3];
        pack_pixels(
            &[200, 100, 50, 128],
            PixelFormat::Rgba8,
            1,
            1,
            4,
            gl::RGB,
            gl::UNSIGNED_BYTE,
            AlphaOp::Premultiply,
            &mut dst,
            false,
        )
        .unwrap();
        assert_eq!(dst, [100, 50, 25]);
    }

    #[test]
    fn flip_y_reverses_rows() {
        // Two rows of one RGB pixel, source padded to 4 bytes.
        let src = [1, 2, 3, 0, 4, 5, 6];
        let mut dst = [0u8; 8];
        pack_pixels(
            &src,
            PixelFormat::Rgb8,
            1,
            2,
            4,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            AlphaOp::None,
            &mut dst,
            true,
        )
        .unwrap();
        assert_eq!(dst, [4, 5, 6, 255, 1, 2, 3, 255]);

        // The copy path flips too.
        let mut dst = [0u8; 6];
        pack_pixels_strided(&src, PixelFormat::Rgb8, 4, &mut dst, PixelFormat::Rgb8, 3, 1, 2, AlphaOp::None, true)
            .unwrap();
        assert_eq!(dst, [4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn zero_dimensions_write_nothing() {
        let mut dst = [7u8; 4];
        for (w, h) in [(0, 5), (5, 0), (0, 0)] {
            pack_pixels(
                &[],
                PixelFormat::Bgra8,
                w,
                h,
                4,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                AlphaOp::Premultiply,
                &mut dst,
                false,
            )
            .unwrap();
        }
        assert_eq!(dst, [7; 4]);
    }

    #[test]
    fn every_path_agrees_with_row_api() {
        use crate::{pack_row_from_rgba8, unpack_row_to_rgba8};
        let w = 5;
        for src_format in PixelFormat::ALL {
            if src_format.is_float() {
                continue;
            }
            for dst_format in PixelFormat::ALL {
                if !dst_format.is_packable() || dst_format.is_float() {
                    continue;
                }
                for op in [AlphaOp::None, AlphaOp::Premultiply, AlphaOp::Unmultiply] {
                    let src = source(src_format, w, 1, 0);
                    let row = w * dst_format.texel_bytes();
                    let mut dst = vec![0u8; row];
                    pack_pixels_strided(
                        &src, src_format, src.len(), &mut dst, dst_format, row, w, 1, op, false,
                    )
                    .unwrap();

                    let mut rgba = vec![0u8; w * 4];
                    let mut want = vec![0u8; row];
                    unpack_row_to_rgba8(src_format, &src, &mut rgba, w).unwrap();
                    let op = effective_alpha_op(src_format, dst_format, op);
                    if src_format == dst_format && op == AlphaOp::None {
                        want.copy_from_slice(&src);
                    } else {
                        pack_row_from_rgba8(dst_format, op, &rgba, &mut want, w).unwrap();
                    }
                    assert_eq!(dst, want, "{src_format:?} -> {dst_format:?} {op:?}");
                }
            }
        }
    }

    #[test]
    fn integer_to_float_and_back() {
        let mut floats = [0u8; 16];
        pack_pixels(
            &[255, 0, 51, 255],
            PixelFormat::Rgba8,
            1,
            1,
            1,
            gl::RGBA,
            gl::FLOAT,
            AlphaOp::None,
            &mut floats,
            false,
        )
        .unwrap();
        let values: Vec<f32> = floats
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(values, [1.0, 0.0, 0.2, 1.0]);

        let mut bytes = [0u8; 4];
        pack_pixels(
            &floats,
            PixelFormat::Rgba32F,
            1,
            1,
            1,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            AlphaOp::None,
            &mut bytes,
            false,
        )
        .unwrap();
        assert_eq!(bytes, [255, 0, 51, 255]);
    }

    #[test]
    fn misaligned_float_rows_still_convert() {
        let px: Vec<u8> = [0.5f32, 0.25, 1.0, 0.5].iter().flat_map(|f| f.to_ne_bytes()).collect();
        let mut src = vec![0u8; 17];
        src[1..].copy_from_slice(&px);
        let mut dst = [0u8; 16];
        pack_pixels_strided(
            &src[1..],
            PixelFormat::Rgba32F,
            16,
            &mut dst,
            PixelFormat::Rgba32F,
            16,
            1,
            1,
            AlphaOp::Premultiply,
            false,
        )
        .unwrap();
        let out: Vec<f32> = dst
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes(c.try_into().unwrap()))
            .collect();
        assert_eq!(out, [0.25, 0.125, 0.5, 0.5]);
    }

    #[test]
    fn rejects_before_writing() {
        let mut dst = [9u8; 8];
        assert_eq!(
            pack_pixels(&[0; 8], PixelFormat::Rgba8, 2, 1, 4, gl::RGB, gl::FLOAT + 1, AlphaOp::None, &mut dst, false),
            Err(PackError::UnsupportedFormat { format: gl::RGB, ty: gl::FLOAT + 1 })
        );
        assert_eq!(
            pack_pixels(&[0; 8], PixelFormat::Rgba8, -2, 1, 4, gl::RGBA, gl::UNSIGNED_BYTE, AlphaOp::None, &mut dst, false),
            Err(PackError::InvalidDimensions { width: -2, height: 1 })
        );
        assert_eq!(
            pack_pixels(&[0; 8], PixelFormat::Rgba8, 2, 1, 3, gl::RGBA, gl::UNSIGNED_BYTE, AlphaOp::None, &mut dst, false),
            Err(PackError::InvalidAlignment(3))
        );
        assert_eq!(
            pack_pixels(&[0; 7], PixelFormat::Rgba8, 2, 1, 4, gl::RGBA, gl::UNSIGNED_BYTE, AlphaOp::None, &mut dst, false),
            Err(PackError::BufferTooSmall { needed: 8, actual: 7 })
        );
        assert_eq!(
            pack_pixels(&[0; 16], PixelFormat::Rgba8, 2, 2, 4, gl::RGBA, gl::UNSIGNED_BYTE, AlphaOp::None, &mut dst, false),
            Err(PackError::BufferTooSmall { needed: 16, actual: 8 })
        );
        assert_eq!(
            pack_pixels_strided(&[0; 8], PixelFormat::Rgba8, 4, &mut dst, PixelFormat::Rgba8, 8, 2, 1, AlphaOp::None, false),
            Err(PackError::InvalidStride)
        );
        assert!(matches!(
            pack_pixels_strided(&[0; 8], PixelFormat::Rgba8, 8, &mut dst, PixelFormat::Rgba16Big, 16, 2, 1, AlphaOp::Premultiply, false),
            Err(PackError::UnsupportedConversion { .. })
        ));
        assert_eq!(dst, [9; 8]);
    }

    #[test]
    fn packed_gl_types_need_matching_format() {
        let mut dst = [0u8; 2];
        assert!(
            pack_pixels(&[0; 4], PixelFormat::Rgba8, 1, 1, 4, gl::RGBA, gl::UNSIGNED_SHORT_5_6_5, AlphaOp::None, &mut dst, false)
                .is_err()
        );
        pack_pixels(&[255, 0, 0, 255], PixelFormat::Rgba8, 1, 1, 4, gl::RGB, gl::UNSIGNED_SHORT_5_6_5, AlphaOp::None, &mut dst, false)
            .unwrap();
        assert_eq!(u16::from_ne_bytes(dst), 0xF800);
    }
}

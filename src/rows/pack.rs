// ---------------------------------------------------------------------------
// Pack: RGBA8 / RGBA32F → destination encoding, with the alpha op applied
// before narrowing. Same length contract as unpack.
// ---------------------------------------------------------------------------

use crate::{AlphaOp, PackError, PixelFormat};

// All 8-bit scaling goes through f32 and truncates.

#[inline(always)]
pub(crate) fn premultiply8([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let scale = a as f32 / 255.0;
    [
        (r as f32 * scale) as u8,
        (g as f32 * scale) as u8,
        (b as f32 * scale) as u8,
        a,
    ]
}

// Lossy. Zero alpha keeps the color as is; results above 255 saturate.
#[inline(always)]
pub(crate) fn unmultiply8([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let scale = 1.0 / if a != 0 { a as f32 / 255.0 } else { 1.0 };
    [
        (r as f32 * scale) as u8,
        (g as f32 * scale) as u8,
        (b as f32 * scale) as u8,
        a,
    ]
}

#[inline(always)]
fn premultiply_f32([r, g, b, a]: [f32; 4]) -> [f32; 4] {
    [r * a, g * a, b * a, a]
}

#[inline(always)]
fn unmultiply_f32([r, g, b, a]: [f32; 4]) -> [f32; 4] {
    let scale = if a != 0.0 { 1.0 / a } else { 1.0 };
    [r * scale, g * scale, b * scale, a]
}

#[inline(always)]
fn narrow8<const N: usize>(
    src: &[u8],
    dst: &mut [u8],
    alpha: impl Fn([u8; 4]) -> [u8; 4],
    f: impl Fn([u8; 4]) -> [u8; N],
) {
    let (px, _) = src.as_chunks::<4>();
    let (out, _) = dst.as_chunks_mut::<N>();
    for (s, d) in px.iter().zip(out) {
        *d = f(alpha(*s));
    }
}

#[inline(always)]
fn narrow_packed(
    src: &[u8],
    dst: &mut [u8],
    alpha: impl Fn([u8; 4]) -> [u8; 4],
    f: impl Fn([u16; 4]) -> u16,
) {
    let (px, _) = src.as_chunks::<4>();
    let (out, _) = dst.as_chunks_mut::<2>();
    for (s, d) in px.iter().zip(out) {
        let [r, g, b, a] = alpha(*s);
        *d = f([r.into(), g.into(), b.into(), a.into()]).to_ne_bytes();
    }
}

#[inline(always)]
fn narrow_f32<const N: usize>(
    src: &[f32],
    dst: &mut [u8],
    alpha: impl Fn([f32; 4]) -> [f32; 4],
    f: impl Fn([f32; 4]) -> [f32; N],
) {
    let (px, _) = src.as_chunks::<4>();
    for (s, d) in px.iter().zip(dst.chunks_exact_mut(N * 4)) {
        let (bytes, _) = d.as_chunks_mut::<4>();
        for (v, b) in f(alpha(*s)).iter().zip(bytes) {
            *b = v.to_ne_bytes();
        }
    }
}

fn pack8(
    format: PixelFormat,
    src: &[u8],
    dst: &mut [u8],
    alpha: impl Fn([u8; 4]) -> [u8; 4],
) -> bool {
    use PixelFormat::*;
    match format {
        // GL conversion rules: luminance comes from red, alpha from alpha.
        R8 => narrow8::<1>(src, dst, alpha, |[r, _, _, _]| [r]),
        A8 => narrow8::<1>(src, dst, alpha, |[_, _, _, a]| [a]),
        Ra8 => narrow8::<2>(src, dst, alpha, |[r, _, _, a]| [r, a]),
        Ar8 => narrow8::<2>(src, dst, alpha, |[r, _, _, a]| [a, r]),
        Rgb8 => narrow8::<3>(src, dst, alpha, |[r, g, b, _]| [r, g, b]),
        Bgr8 => narrow8::<3>(src, dst, alpha, |[r, g, b, _]| [b, g, r]),
        Rgba8 => narrow8::<4>(src, dst, alpha, |px| px),
        Bgra8 => narrow8::<4>(src, dst, alpha, |[r, g, b, a]| [b, g, r, a]),
        Argb8 => narrow8::<4>(src, dst, alpha, |[r, g, b, a]| [a, r, g, b]),
        Abgr8 => narrow8::<4>(src, dst, alpha, |[r, g, b, a]| [a, b, g, r]),
        Rgba4444 => narrow_packed(src, dst, alpha, |[r, g, b, a]| {
            ((r & 0xF0) << 8) | ((g & 0xF0) << 4) | (b & 0xF0) | (a >> 4)
        }),
        Rgba5551 => narrow_packed(src, dst, alpha, |[r, g, b, a]| {
            ((r & 0xF8) << 8) | ((g & 0xF8) << 3) | ((b & 0xF8) >> 2) | (a >> 7)
        }),
        Rgb565 => narrow_packed(src, dst, alpha, |[r, g, b, _]| {
            ((r & 0xF8) << 8) | ((g & 0xFC) << 3) | ((b & 0xF8) >> 3)
        }),
        R16Little | R16Big | A16Little | A16Big | Ra16Little | Ra16Big | Ar16Little
        | Ar16Big | Rgb16Little | Rgb16Big | Rgba16Little | Rgba16Big | Argb16Little
        | Argb16Big | Bgra16Little | Bgra16Big => return false,
        R32F | A32F | Ra32F | Rgb32F | Rgba32F => return false,
    }
    true
}

fn pack_f32(
    format: PixelFormat,
    src: &[f32],
    dst: &mut [u8],
    alpha: impl Fn([f32; 4]) -> [f32; 4],
) -> bool {
    use PixelFormat::*;
    match format {
        R32F => narrow_f32::<1>(src, dst, alpha, |[r, _, _, _]| [r]),
        A32F => narrow_f32::<1>(src, dst, alpha, |[_, _, _, a]| [a]),
        Ra32F => narrow_f32::<2>(src, dst, alpha, |[r, _, _, a]| [r, a]),
        Rgb32F => narrow_f32::<3>(src, dst, alpha, |[r, g, b, _]| [r, g, b]),
        Rgba32F => narrow_f32::<4>(src, dst, alpha, |px| px),
        _ => return false,
    }
    true
}

/// Pack a row of RGBA8 into an integer or packed-16 encoding.
pub(crate) fn from_rgba8(
    format: PixelFormat,
    alpha_op: AlphaOp,
    src: &[u8],
    dst: &mut [u8],
) -> Result<(), PackError> {
    let packed = match alpha_op {
        AlphaOp::None => pack8(format, src, dst, |px| px),
        AlphaOp::Premultiply => pack8(format, src, dst, premultiply8),
        AlphaOp::Unmultiply => pack8(format, src, dst, unmultiply8),
    };
    if packed {
        Ok(())
    } else {
        Err(PackError::UnsupportedConversion {
            src: PixelFormat::Rgba8,
            dst: format,
            alpha_op,
        })
    }
}

/// Pack a row of RGBA32F into a float encoding.
pub(crate) fn from_rgba32f(
    format: PixelFormat,
    alpha_op: AlphaOp,
    src: &[f32],
    dst: &mut [u8],
) -> Result<(), PackError> {
    let packed = match alpha_op {
        AlphaOp::None => pack_f32(format, src, dst, |px| px),
        AlphaOp::Premultiply => pack_f32(format, src, dst, premultiply_f32),
        AlphaOp::Unmultiply => pack_f32(format, src, dst, unmultiply_f32),
    };
    if packed {
        Ok(())
    } else {
        Err(PackError::UnsupportedConversion {
            src: PixelFormat::Rgba32F,
            dst: format,
            alpha_op,
        })
    }
}

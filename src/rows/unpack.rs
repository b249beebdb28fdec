// ---------------------------------------------------------------------------
// Unpack: any encoding → RGBA8 or RGBA32F.
//
// Callers hand in exactly `n` source texels and exactly `n` destination
// pixels; nothing here re-validates lengths.
// ---------------------------------------------------------------------------

use crate::PixelFormat;

/// Texels per stack buffer when a row has to cross storage classes.
pub(crate) const CHUNK: usize = 64;

const LITTLE: usize = 1;
const BIG: usize = 0;

#[inline(always)]
fn expand8<const N: usize>(src: &[u8], dst: &mut [u8], f: impl Fn([u8; N]) -> [u8; 4]) {
    let (px, _) = src.as_chunks::<N>();
    let (out, _) = dst.as_chunks_mut::<4>();
    for (s, d) in px.iter().zip(out) {
        *d = f(*s);
    }
}

#[inline(always)]
fn expand_packed(src: &[u8], dst: &mut [u8], f: impl Fn(u16) -> [u8; 4]) {
    let (px, _) = src.as_chunks::<2>();
    let (out, _) = dst.as_chunks_mut::<4>();
    for (s, d) in px.iter().zip(out) {
        *d = f(u16::from_ne_bytes(*s));
    }
}

#[inline(always)]
fn expand_f32<const N: usize>(src: &[u8], dst: &mut [f32], f: impl Fn([f32; N]) -> [f32; 4]) {
    let (floats, _) = src.as_chunks::<4>();
    let (out, _) = dst.as_chunks_mut::<4>();
    for (s, d) in floats.chunks_exact(N).zip(out) {
        let px: [f32; N] = core::array::from_fn(|i| f32::from_ne_bytes(s[i]));
        *d = f(px);
    }
}

/// Keep the high byte of every 16-bit channel, then unpack as `narrow`.
fn from_16(narrow: PixelFormat, hi: usize, src: &[u8], dst: &mut [u8]) {
    let components = narrow.components_per_pixel();
    let mut buf = [0u8; CHUNK * 4];
    for (s, d) in src
        .chunks(CHUNK * components * 2)
        .zip(dst.chunks_mut(CHUNK * 4))
    {
        let n = s.len() / 2;
        for (b, pair) in buf[..n].iter_mut().zip(s.chunks_exact(2)) {
            *b = pair[hi];
        }
        to_rgba8(narrow, &buf[..n], d);
    }
}

fn from_float(format: PixelFormat, src: &[u8], dst: &mut [u8]) {
    let texel = format.texel_bytes();
    let mut buf = [0f32; CHUNK * 4];
    for (s, d) in src.chunks(CHUNK * texel).zip(dst.chunks_mut(CHUNK * 4)) {
        let n = s.len() / texel;
        to_rgba32f(format, s, &mut buf[..n * 4]);
        for (&v, o) in buf[..n * 4].iter().zip(d.iter_mut()) {
            *o = (v.clamp(0.0, 1.0) * 255.0) as u8;
        }
    }
}

fn widen(format: PixelFormat, src: &[u8], dst: &mut [f32]) {
    let texel = format.texel_bytes();
    let mut buf = [0u8; CHUNK * 4];
    for (s, d) in src.chunks(CHUNK * texel).zip(dst.chunks_mut(CHUNK * 4)) {
        let n = s.len() / texel;
        to_rgba8(format, s, &mut buf[..n * 4]);
        for (&v, o) in buf[..n * 4].iter().zip(d.iter_mut()) {
            *o = v as f32 / 255.0;
        }
    }
}

/// Unpack a row into RGBA8. Float channels are clamped to [0, 1] and
/// truncated.
pub(crate) fn to_rgba8(format: PixelFormat, src: &[u8], dst: &mut [u8]) {
    use PixelFormat::*;
    match format {
        Rgba8 => dst.copy_from_slice(src),
        Bgra8 => super::bgra_to_rgba(src, dst),
        Rgb8 => super::rgb_to_rgba(src, dst),
        Bgr8 => super::bgr_to_rgba(src, dst),
        R8 => super::r_to_rgba(src, dst),
        Ra8 => super::ra_to_rgba(src, dst),
        A8 => expand8::<1>(src, dst, |[a]| [0, 0, 0, a]),
        Ar8 => expand8::<2>(src, dst, |[a, r]| [r, r, r, a]),
        Argb8 => expand8::<4>(src, dst, |[a, r, g, b]| [r, g, b, a]),
        Abgr8 => expand8::<4>(src, dst, |[a, b, g, r]| [r, g, b, a]),
        // n-bit fields widen as (v << (8 - n)) | low bits of v.
        Rgba5551 => expand_packed(src, dst, |v| {
            let r = (v >> 11) as u8;
            let g = ((v >> 6) & 0x1F) as u8;
            let b = ((v >> 1) & 0x1F) as u8;
            [
                (r << 3) | (r & 0x7),
                (g << 3) | (g & 0x7),
                (b << 3) | (b & 0x7),
                if v & 0x1 != 0 { 0xFF } else { 0x0 },
            ]
        }),
        Rgba4444 => expand_packed(src, dst, |v| {
            let r = (v >> 12) as u8;
            let g = ((v >> 8) & 0x0F) as u8;
            let b = ((v >> 4) & 0x0F) as u8;
            let a = (v & 0x0F) as u8;
            [(r << 4) | r, (g << 4) | g, (b << 4) | b, (a << 4) | a]
        }),
        Rgb565 => expand_packed(src, dst, |v| {
            let r = (v >> 11) as u8;
            let g = ((v >> 5) & 0x3F) as u8;
            let b = (v & 0x1F) as u8;
            [(r << 3) | (r & 0x7), (g << 2) | (g & 0x3), (b << 3) | (b & 0x7), 0xFF]
        }),
        R16Little => from_16(R8, LITTLE, src, dst),
        R16Big => from_16(R8, BIG, src, dst),
        A16Little => from_16(A8, LITTLE, src, dst),
        A16Big => from_16(A8, BIG, src, dst),
        Ra16Little => from_16(Ra8, LITTLE, src, dst),
        Ra16Big => from_16(Ra8, BIG, src, dst),
        Ar16Little => from_16(Ar8, LITTLE, src, dst),
        Ar16Big => from_16(Ar8, BIG, src, dst),
        Rgb16Little => from_16(Rgb8, LITTLE, src, dst),
        Rgb16Big => from_16(Rgb8, BIG, src, dst),
        Rgba16Little => from_16(Rgba8, LITTLE, src, dst),
        Rgba16Big => from_16(Rgba8, BIG, src, dst),
        Argb16Little => from_16(Argb8, LITTLE, src, dst),
        Argb16Big => from_16(Argb8, BIG, src, dst),
        Bgra16Little => from_16(Bgra8, LITTLE, src, dst),
        Bgra16Big => from_16(Bgra8, BIG, src, dst),
        R32F | A32F | Ra32F | Rgb32F | Rgba32F => from_float(format, src, dst),
    }
}

/// Unpack a row into RGBA32F. Integer channels are scaled by 1/255.
pub(crate) fn to_rgba32f(format: PixelFormat, src: &[u8], dst: &mut [f32]) {
    use PixelFormat::*;
    match format {
        Rgba32F => expand_f32::<4>(src, dst, |px| px),
        Rgb32F => expand_f32::<3>(src, dst, |[r, g, b]| [r, g, b, 1.0]),
        Ra32F => expand_f32::<2>(src, dst, |[r, a]| [r, r, r, a]),
        R32F => expand_f32::<1>(src, dst, |[r]| [r, r, r, 1.0]),
        A32F => expand_f32::<1>(src, dst, |[a]| [0.0, 0.0, 0.0, a]),
        _ => widen(format, src, dst),
    }
}

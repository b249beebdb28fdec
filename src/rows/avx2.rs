use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm256_loadu_si256, _mm256_storeu_si256};

// ===========================================================================
// SIMD constants
// ===========================================================================

const BR_SHUF_MASK_AVX: [i8; 32] = [
    2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14, 13, 12, 15, 2, 1, 0, 3, 6, 5, 4, 7, 10, 9, 8, 11, 14,
    13, 12, 15,
];

const ALPHA_FF_MASK_AVX: [i8; 32] = [
    0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0,
    0, 0, -1,
];

// Lane 0 expands bytes 0..4, lane 1 bytes 4..8 of the broadcast qword.
const R_EXPAND_MASK_AVX: [i8; 32] = [
    0, 0, 0, -128, 1, 1, 1, -128, 2, 2, 2, -128, 3, 3, 3, -128, 4, 4, 4, -128, 5, 5, 5, -128, 6, 6,
    6, -128, 7, 7, 7, -128,
];

const RA_EXPAND_MASK_AVX: [i8; 32] = [
    0, 0, 0, 1, 2, 2, 2, 3, 4, 4, 4, 5, 6, 6, 6, 7, 8, 8, 8, 9, 10, 10, 10, 11, 12, 12, 12, 13, 14,
    14, 14, 15,
];

const BGR_TO_RGBA_SHUF_AVX: [i8; 32] = [
    2, 1, 0, -128, 5, 4, 3, -128, 8, 7, 6, -128, 11, 10, 9, -128, 2, 1, 0, -128, 5, 4, 3, -128, 8,
    7, 6, -128, 11, 10, 9, -128,
];

const RGB_TO_RGBA_SHUF_AVX: [i8; 32] = [
    0, 1, 2, -128, 3, 4, 5, -128, 6, 7, 8, -128, 9, 10, 11, -128, 0, 1, 2, -128, 3, 4, 5, -128, 6,
    7, 8, -128, 9, 10, 11, -128,
];

// Moves dwords 3..7 into the high lane so each lane holds 4 whole 3-byte pixels.
const RGB_ALIGN_PERM_AVX: [i8; 32] = [
    0, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0, 5, 0, 0, 0, 6, 0, 0, 0,
];

// ===========================================================================
// x86-64 AVX2 — rite row implementations
// ===========================================================================

#[rite]
pub(super) fn bgra_to_rgba_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let mask = _mm256_loadu_si256(&BR_SHUF_MASK_AVX);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 32 <= n {
        let s: &[u8; 32] = src[i..i + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let shuffled = _mm256_shuffle_epi8(v, mask);
        let d: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, shuffled);
        i += 32;
    }
    for (s, d) in src[i..].chunks_exact(4).zip(dst[i..].chunks_exact_mut(4)) {
        d.copy_from_slice(&[s[2], s[1], s[0], s[3]]);
    }
}

#[rite]
fn three_to_rgba_row_v3(
    _token: X64V3Token,
    src: &[u8],
    dst: &mut [u8],
    shuf_mask: &[i8; 32],
    reverse: bool,
) {
    let perm = _mm256_loadu_si256(&RGB_ALIGN_PERM_AVX);
    let shuf = _mm256_loadu_si256(shuf_mask);
    let alpha = _mm256_loadu_si256(&ALPHA_FF_MASK_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    // 32-byte loads consume 24 source bytes, so stop while a full load still fits.
    while is + 32 <= slen && id + 32 <= dlen {
        let s: &[u8; 32] = src[is..is + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(s);
        let aligned = _mm256_permutevar8x32_epi32(v, perm);
        let expanded = _mm256_shuffle_epi8(aligned, shuf);
        let rgba = _mm256_or_si256(expanded, alpha);
        let d: &mut [u8; 32] = (&mut dst[id..id + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, rgba);
        is += 24;
        id += 32;
    }
    for (s, d) in src[is..].chunks_exact(3).zip(dst[id..].chunks_exact_mut(4)) {
        if reverse {
            d.copy_from_slice(&[s[2], s[1], s[0], 0xFF]);
        } else {
            d.copy_from_slice(&[s[0], s[1], s[2], 0xFF]);
        }
    }
}

#[rite]
pub(super) fn r_to_rgba_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let expand = _mm256_loadu_si256(&R_EXPAND_MASK_AVX);
    let alpha = _mm256_loadu_si256(&ALPHA_FF_MASK_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 8 <= slen && id + 32 <= dlen {
        let r8 = u64::from_ne_bytes(src[is..is + 8].try_into().unwrap());
        let rs = _mm256_set1_epi64x(r8 as i64);
        let expanded = _mm256_shuffle_epi8(rs, expand);
        let rgba = _mm256_or_si256(expanded, alpha);
        let d: &mut [u8; 32] = (&mut dst[id..id + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, rgba);
        is += 8;
        id += 32;
    }
    for (&v, d) in src[is..].iter().zip(dst[id..].chunks_exact_mut(4)) {
        d.copy_from_slice(&[v, v, v, 0xFF]);
    }
}

#[rite]
pub(super) fn ra_to_rgba_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let expand = _mm256_loadu_si256(&RA_EXPAND_MASK_AVX);
    let (slen, dlen) = (src.len(), dst.len());
    let (mut is, mut id) = (0, 0);
    while is + 16 <= slen && id + 32 <= dlen {
        let lo = u64::from_ne_bytes(src[is..is + 8].try_into().unwrap());
        let hi = u64::from_ne_bytes(src[is + 8..is + 16].try_into().unwrap());
        let ras = _mm256_set_epi64x(hi as i64, lo as i64, hi as i64, lo as i64);
        let rgba = _mm256_shuffle_epi8(ras, expand);
        let d: &mut [u8; 32] = (&mut dst[id..id + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, rgba);
        is += 16;
        id += 32;
    }
    for (ra, d) in src[is..].chunks_exact(2).zip(dst[id..].chunks_exact_mut(4)) {
        d.copy_from_slice(&[ra[0], ra[0], ra[0], ra[1]]);
    }
}

// x86-64 arcane contiguous wrappers
#[arcane]
pub(super) fn bgra_to_rgba_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    bgra_to_rgba_row_v3(t, s, d);
}
#[arcane]
pub(super) fn rgb_to_rgba_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    three_to_rgba_row_v3(t, s, d, &RGB_TO_RGBA_SHUF_AVX, false);
}
#[arcane]
pub(super) fn bgr_to_rgba_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    three_to_rgba_row_v3(t, s, d, &BGR_TO_RGBA_SHUF_AVX, true);
}
#[arcane]
pub(super) fn r_to_rgba_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    r_to_rgba_row_v3(t, s, d);
}
#[arcane]
pub(super) fn ra_to_rgba_impl_v3(t: X64V3Token, s: &[u8], d: &mut [u8]) {
    ra_to_rgba_row_v3(t, s, d);
}

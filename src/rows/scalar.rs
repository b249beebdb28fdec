use archmage::prelude::*;

// ===========================================================================
// Scalar unpack kernels (→ RGBA8). Dispatch targets for incant!.
// ===========================================================================

pub(super) fn bgra_to_rgba_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = s[3];
    }
}

pub(super) fn rgb_to_rgba_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[0];
        d[1] = s[1];
        d[2] = s[2];
        d[3] = 0xFF;
    }
}

pub(super) fn bgr_to_rgba_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
        d[0] = s[2];
        d[1] = s[1];
        d[2] = s[0];
        d[3] = 0xFF;
    }
}

pub(super) fn r_to_rgba_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (&v, d) in src.iter().zip(dst.chunks_exact_mut(4)) {
        d[0] = v;
        d[1] = v;
        d[2] = v;
        d[3] = 0xFF;
    }
}

pub(super) fn ra_to_rgba_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    for (ra, d) in src.chunks_exact(2).zip(dst.chunks_exact_mut(4)) {
        d[0] = ra[0];
        d[1] = ra[0];
        d[2] = ra[0];
        d[3] = ra[1];
    }
}

// ===========================================================================
// Scalar contiguous wrappers
// ===========================================================================

pub(super) fn bgra_to_rgba_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    bgra_to_rgba_row_scalar(t, s, d);
}
pub(super) fn rgb_to_rgba_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    rgb_to_rgba_row_scalar(t, s, d);
}
pub(super) fn bgr_to_rgba_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    bgr_to_rgba_row_scalar(t, s, d);
}
pub(super) fn r_to_rgba_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    r_to_rgba_row_scalar(t, s, d);
}
pub(super) fn ra_to_rgba_impl_scalar(t: ScalarToken, s: &[u8], d: &mut [u8]) {
    ra_to_rgba_row_scalar(t, s, d);
}

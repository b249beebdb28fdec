//! GL enum values accepted at the API boundary.
//!
//! Only the values that select a texel encoding are listed. They are plain
//! `u32` so callers can pass through whatever their GL binding hands them.

pub const ALPHA: u32 = 0x1906;
pub const RGB: u32 = 0x1907;
pub const RGBA: u32 = 0x1908;
pub const LUMINANCE: u32 = 0x1909;
pub const LUMINANCE_ALPHA: u32 = 0x190A;
/// `GL_EXT_texture_format_BGRA8888`
pub const BGRA_EXT: u32 = 0x80E1;

pub const UNSIGNED_BYTE: u32 = 0x1401;
pub const FLOAT: u32 = 0x1406;
pub const UNSIGNED_SHORT_4_4_4_4: u32 = 0x8033;
pub const UNSIGNED_SHORT_5_5_5_1: u32 = 0x8034;
pub const UNSIGNED_SHORT_5_6_5: u32 = 0x8363;

//! # texpack
//!
//! *Pack your texels for the trip to the GPU.*
//!
//! Converts client pixel data between the in-memory encodings a GL texture
//! upload deals in: 8-bit channel orders, packed 16-bit `565` / `4444` /
//! `5551`, 32-bit float, and 16-bit-per-channel decoder output. Rows pass
//! through an RGBA8 (or RGBA32F, for float destinations) intermediate, with
//! optional premultiplication or unmultiplication on the way out, row
//! alignment padding on the way in, and an optional vertical flip.
//!
//! The hot unpack shapes are SIMD-accelerated on x86-64 AVX2 with automatic
//! fallback to scalar code.
//!
//! ## Core operations (always available)
//!
//! - [`pack_pixels`] converts a whole image into a GL `(format, type)` pair;
//!   [`pack_pixels_strided`] does the same with explicit strides.
//! - [`unpack_row_to_rgba8`], [`pack_row_from_rgba8`] and their RGBA32F
//!   twins are the row-level building blocks.
//! - [`extract_texture_data`], [`extract_image_data`] and
//!   [`flip_vertically`] cover texture-upload buffer preparation.
//! - [`row_stride`], [`compute_image_size_in_bytes`] and
//!   [`format_and_type_parameters`] do the size arithmetic.
//!
//! Nothing panics on caller input: every failure is a [`PackError`],
//! reported before the destination is written.
//!
//! ```
//! use texpack::{AlphaOp, PixelFormat, gl, pack_pixels};
//!
//! // One straight-alpha pixel, premultiplied into RGB565.
//! let mut out = [0u8; 2];
//! pack_pixels(
//!     &[200, 100, 50, 128], PixelFormat::Rgba8, 1, 1, 4,
//!     gl::RGB, gl::UNSIGNED_SHORT_5_6_5, AlphaOp::Premultiply,
//!     &mut out, false,
//! ).unwrap();
//! // (100, 50, 25) after premultiplying, then 5, 6 and 5 bits.
//! assert_eq!(u16::from_ne_bytes(out), (12 << 11) | (12 << 5) | 3);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`**: typed entry points over [`rgb`] crate pixel types
//!   (`Rgba<u8>`, `Bgra<u8>`) via bytemuck.
//! - **`imgref`**: whole-image entry points over [`imgref`] types
//!   (`ImgRef`, `ImgVec`). Implies `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod convert;
mod error;
mod extract;
mod format;
pub mod gl;
mod layout;
mod options;
mod rows;

pub use convert::{effective_alpha_op, pack_pixels, pack_pixels_strided};
pub use error::PackError;
pub use extract::{
    extract_image_data, extract_image_data_with_limits, extract_texture_data,
    extract_texture_data_with_limits, flip_vertically,
};
pub use format::{AlphaOp, FormatClass, PixelFormat};
pub use layout::{
    ImageSize, compute_image_size_in_bytes, format_and_type_parameters, row_stride,
};
pub use options::{Limits, PixelStore};
pub use rows::{
    pack_row_from_rgba8, pack_row_from_rgba32f, unpack_row_to_rgba8, unpack_row_to_rgba32f,
};

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod img;

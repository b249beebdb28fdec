// ---------------------------------------------------------------------------
// Texel encodings and their descriptors.
// ---------------------------------------------------------------------------

use crate::PackError;
use crate::gl;

/// An in-memory texel encoding.
///
/// Channel names list the byte (or element) order in memory: `Argb8` stores
/// alpha first. 16-bit integer encodings carry their byte order and are only
/// ever read; the packed 16-bit encodings (`Rgba4444`, `Rgba5551`, `Rgb565`)
/// are native-endian `u16` values, as GL expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    R8,
    R16Little,
    R16Big,
    R32F,
    A8,
    A16Little,
    A16Big,
    A32F,
    Ra8,
    Ra16Little,
    Ra16Big,
    Ra32F,
    Ar8,
    Ar16Little,
    Ar16Big,
    Rgb8,
    Rgb16Little,
    Rgb16Big,
    Rgb32F,
    Bgr8,
    Rgba8,
    Rgba16Little,
    Rgba16Big,
    Rgba32F,
    Argb8,
    Argb16Little,
    Argb16Big,
    Abgr8,
    Bgra8,
    Bgra16Little,
    Bgra16Big,
    Rgba5551,
    Rgba4444,
    Rgb565,
}

/// Storage class of a [`PixelFormat`]. Every format belongs to exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatClass {
    /// One byte per channel.
    Unorm8,
    /// Two bytes per channel, explicit byte order.
    Unorm16,
    /// All channels in one native-endian `u16`.
    Packed16,
    /// One native-endian `f32` per channel.
    Float32,
}

/// Alpha treatment applied while packing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlphaOp {
    #[default]
    None,
    /// Multiply color channels by alpha.
    Premultiply,
    /// Divide color channels by alpha. Lossy: an alpha of zero leaves the
    /// color untouched, and 8-bit results are truncated.
    Unmultiply,
}

impl PixelFormat {
    /// Every encoding, in declaration order.
    pub const ALL: [PixelFormat; 34] = [
        Self::R8,
        Self::R16Little,
        Self::R16Big,
        Self::R32F,
        Self::A8,
        Self::A16Little,
        Self::A16Big,
        Self::A32F,
        Self::Ra8,
        Self::Ra16Little,
        Self::Ra16Big,
        Self::Ra32F,
        Self::Ar8,
        Self::Ar16Little,
        Self::Ar16Big,
        Self::Rgb8,
        Self::Rgb16Little,
        Self::Rgb16Big,
        Self::Rgb32F,
        Self::Bgr8,
        Self::Rgba8,
        Self::Rgba16Little,
        Self::Rgba16Big,
        Self::Rgba32F,
        Self::Argb8,
        Self::Argb16Little,
        Self::Argb16Big,
        Self::Abgr8,
        Self::Bgra8,
        Self::Bgra16Little,
        Self::Bgra16Big,
        Self::Rgba5551,
        Self::Rgba4444,
        Self::Rgb565,
    ];

    pub const fn class(self) -> FormatClass {
        use PixelFormat::*;
        match self {
            R8 | A8 | Ra8 | Ar8 | Rgb8 | Bgr8 | Rgba8 | Argb8 | Abgr8 | Bgra8 => FormatClass::Unorm8,
            R16Little | R16Big | A16Little | A16Big | Ra16Little | Ra16Big | Ar16Little
            | Ar16Big | Rgb16Little | Rgb16Big | Rgba16Little | Rgba16Big | Argb16Little
            | Argb16Big | Bgra16Little | Bgra16Big => FormatClass::Unorm16,
            Rgba5551 | Rgba4444 | Rgb565 => FormatClass::Packed16,
            R32F | A32F | Ra32F | Rgb32F | Rgba32F => FormatClass::Float32,
        }
    }

    /// Stored components per pixel. Packed 16-bit encodings count as one.
    pub const fn components_per_pixel(self) -> usize {
        use PixelFormat::*;
        match self {
            R8 | R16Little | R16Big | R32F | A8 | A16Little | A16Big | A32F => 1,
            Rgba5551 | Rgba4444 | Rgb565 => 1,
            Ra8 | Ra16Little | Ra16Big | Ra32F | Ar8 | Ar16Little | Ar16Big => 2,
            Rgb8 | Rgb16Little | Rgb16Big | Rgb32F | Bgr8 => 3,
            Rgba8 | Rgba16Little | Rgba16Big | Rgba32F | Argb8 | Argb16Little | Argb16Big
            | Abgr8 | Bgra8 | Bgra16Little | Bgra16Big => 4,
        }
    }

    pub const fn bytes_per_component(self) -> usize {
        match self.class() {
            FormatClass::Unorm8 => 1,
            FormatClass::Unorm16 | FormatClass::Packed16 => 2,
            FormatClass::Float32 => 4,
        }
    }

    /// Bytes per pixel, before any row alignment padding.
    #[inline]
    pub const fn texel_bytes(self) -> usize {
        self.components_per_pixel() * self.bytes_per_component()
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self.class(), FormatClass::Float32)
    }

    #[inline]
    pub const fn is_packed16(self) -> bool {
        matches!(self.class(), FormatClass::Packed16)
    }

    pub const fn has_alpha(self) -> bool {
        use PixelFormat::*;
        !matches!(
            self,
            R8 | R16Little
                | R16Big
                | R32F
                | Rgb8
                | Rgb16Little
                | Rgb16Big
                | Rgb32F
                | Bgr8
                | Rgb565
        )
    }

    pub const fn has_color(self) -> bool {
        use PixelFormat::*;
        !matches!(self, A8 | A16Little | A16Big | A32F)
    }

    /// Whether the packer can produce this encoding.
    ///
    /// 16-bit integer encodings only come out of image decoders and are
    /// never written, except by the identical-format copy.
    #[inline]
    pub const fn is_packable(self) -> bool {
        !matches!(self.class(), FormatClass::Unorm16)
    }

    /// Resolve a GL `(format, type)` pair.
    ///
    /// ```
    /// use texpack::{PixelFormat, gl};
    ///
    /// let f = PixelFormat::from_gl(gl::RGB, gl::UNSIGNED_SHORT_5_6_5).unwrap();
    /// assert_eq!(f, PixelFormat::Rgb565);
    /// assert!(PixelFormat::from_gl(gl::BGRA_EXT, gl::FLOAT).is_err());
    /// ```
    pub fn from_gl(format: u32, ty: u32) -> Result<Self, PackError> {
        let resolved = match (ty, format) {
            (gl::UNSIGNED_BYTE, gl::RGBA) => Some(Self::Rgba8),
            (gl::UNSIGNED_BYTE, gl::RGB) => Some(Self::Rgb8),
            (gl::UNSIGNED_BYTE, gl::ALPHA) => Some(Self::A8),
            (gl::UNSIGNED_BYTE, gl::LUMINANCE) => Some(Self::R8),
            (gl::UNSIGNED_BYTE, gl::LUMINANCE_ALPHA) => Some(Self::Ra8),
            (gl::UNSIGNED_BYTE, gl::BGRA_EXT) => Some(Self::Bgra8),
            (gl::UNSIGNED_SHORT_4_4_4_4, gl::RGBA) => Some(Self::Rgba4444),
            (gl::UNSIGNED_SHORT_5_5_5_1, gl::RGBA) => Some(Self::Rgba5551),
            (gl::UNSIGNED_SHORT_5_6_5, gl::RGB) => Some(Self::Rgb565),
            (gl::FLOAT, gl::RGBA) => Some(Self::Rgba32F),
            (gl::FLOAT, gl::RGB) => Some(Self::Rgb32F),
            (gl::FLOAT, gl::ALPHA) => Some(Self::A32F),
            (gl::FLOAT, gl::LUMINANCE) => Some(Self::R32F),
            (gl::FLOAT, gl::LUMINANCE_ALPHA) => Some(Self::Ra32F),
            _ => None,
        };
        resolved.ok_or(PackError::UnsupportedFormat { format, ty })
    }
}

use crate::{AlphaOp, PackError};

/// Pixel-store state a texture upload reads from the GL context.
///
/// ```
/// use texpack::{AlphaOp, PixelStore};
///
/// let store = PixelStore::default().with_premultiply_alpha(true).with_flip_y(true);
/// assert_eq!(store.unpack_alignment, 4);
/// assert_eq!(store.alpha_op_for(false), AlphaOp::Premultiply);
/// assert_eq!(store.alpha_op_for(true), AlphaOp::None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelStore {
    /// Row alignment of client pixel data: 0 (tightly packed), 1, 2, 4 or 8.
    pub unpack_alignment: u32,
    /// Write rows bottom-up.
    pub flip_y: bool,
    /// Deliver premultiplied color.
    pub premultiply_alpha: bool,
}

impl Default for PixelStore {
    fn default() -> Self {
        Self {
            unpack_alignment: 4,
            flip_y: false,
            premultiply_alpha: false,
        }
    }
}

impl PixelStore {
    pub fn with_unpack_alignment(mut self, alignment: u32) -> Self {
        self.unpack_alignment = alignment;
        self
    }

    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    pub fn with_premultiply_alpha(mut self, premultiply: bool) -> Self {
        self.premultiply_alpha = premultiply;
        self
    }

    /// The alpha op that turns a source with the given alpha representation
    /// into what this store asks for.
    pub fn alpha_op_for(&self, source_premultiplied: bool) -> AlphaOp {
        match (self.premultiply_alpha, source_premultiplied) {
            (true, false) => AlphaOp::Premultiply,
            (false, true) => AlphaOp::Unmultiply,
            _ => AlphaOp::None,
        }
    }
}

/// Resource limits for conversions that allocate their output.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for an output buffer allocation.
    pub max_bytes: Option<u64>,
}

#[inline]
fn check_one(what: &'static str, value: u64, limit: Option<u64>) -> Result<(), PackError> {
    match limit {
        Some(limit) if value > limit => Err(PackError::LimitExceeded { what, value, limit }),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check dimensions against limits.
    pub fn check(&self, width: usize, height: usize) -> Result<(), PackError> {
        let (w, h) = (width as u64, height as u64);
        check_one("width", w, self.max_width)?;
        check_one("height", h, self.max_height)?;
        check_one("pixels", w.saturating_mul(h), self.max_pixels)
    }

    /// Check that an allocation size is within limits.
    pub fn check_bytes(&self, bytes: usize) -> Result<(), PackError> {
        check_one("bytes", bytes as u64, self.max_bytes)
    }
}

//! Tag capacity derived from alignment.

use std::mem::align_of;

/// The smallest fixed-width unsigned integer able to hold every tag of a [`Capacity`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TagWidth {
    /// Eight bits: alignments up to `256`.
    U8,
    /// Sixteen bits: alignments up to `65536`.
    U16,
    /// Thirty-two bits: every larger alignment.
    U32,
}

impl TagWidth {
    /// Selects the width for the supplied tag mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TagWidth;
    ///
    /// assert_eq!(TagWidth::for_mask(7), TagWidth::U8);
    /// assert_eq!(TagWidth::for_mask(255), TagWidth::U8);
    /// assert_eq!(TagWidth::for_mask(256), TagWidth::U16);
    /// assert_eq!(TagWidth::for_mask(1 << 20), TagWidth::U32);
    /// ```
    #[must_use]
    #[inline]
    pub const fn for_mask(mask: usize) -> Self {
        if mask <= u8::MAX as usize {
            Self::U8
        } else if mask <= u16::MAX as usize {
            Self::U16
        } else {
            Self::U32
        }
    }

    /// Returns the number of bits of the width.
    #[must_use]
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::U8 => u8::BITS,
            Self::U16 => u16::BITS,
            Self::U32 => u32::BITS,
        }
    }

    /// Drops every bit of `raw` that does not fit the width.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TagWidth;
    ///
    /// assert_eq!(TagWidth::U8.truncate(0x1_23), 0x23);
    /// assert_eq!(TagWidth::U16.truncate(0x1_2345), 0x2345);
    /// ```
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    #[inline]
    pub const fn truncate(self, raw: usize) -> usize {
        match self {
            Self::U8 => raw as u8 as usize,
            Self::U16 => raw as u16 as usize,
            Self::U32 => raw as u32 as usize,
        }
    }
}

/// [`Capacity`] describes the tag space that an alignment leaves in the low bits of an address.
///
/// Every field is computed in `const` context, so a [`Capacity`] used as an associated constant
/// costs nothing at runtime.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Capacity {
    align: usize,
    bits: u32,
    mask: usize,
    width: TagWidth,
}

impl Capacity {
    /// Derives the [`Capacity`] of an alignment.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two; in `const` context this is a compile-time error.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{Capacity, TagWidth};
    ///
    /// const CAPACITY: Capacity = Capacity::new(8);
    /// assert_eq!(CAPACITY.bits(), 3);
    /// assert_eq!(CAPACITY.mask(), 0b111);
    /// assert_eq!(CAPACITY.width(), TagWidth::U8);
    /// ```
    ///
    /// ```compile_fail
    /// use tagged_ptr::Capacity;
    ///
    /// const CAPACITY: Capacity = Capacity::new(12);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new(align: usize) -> Self {
        assert!(
            align.is_power_of_two(),
            "alignment must be a non-zero power of two"
        );
        let mask = align - 1;
        Self {
            align,
            bits: align.trailing_zeros(),
            mask,
            width: TagWidth::for_mask(mask),
        }
    }

    /// Derives the [`Capacity`] of the natural alignment of `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::Capacity;
    ///
    /// assert_eq!(Capacity::of::<u32>().mask(), 3);
    /// assert_eq!(Capacity::of::<u8>().mask(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub const fn of<T>() -> Self {
        Self::new(align_of::<T>())
    }

    /// Returns the alignment.
    #[must_use]
    #[inline]
    pub const fn align(&self) -> usize {
        self.align
    }

    /// Returns the number of tag bits.
    #[must_use]
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the tag mask, which is also the largest valid tag.
    #[must_use]
    #[inline]
    pub const fn mask(&self) -> usize {
        self.mask
    }

    /// Returns the tag width.
    #[must_use]
    #[inline]
    pub const fn width(&self) -> TagWidth {
        self.width
    }

    /// Returns `true` if `tag` fits the tag space.
    #[must_use]
    #[inline]
    pub const fn fits(&self, tag: usize) -> bool {
        tag <= self.mask
    }
}

/// Resolves an alignment parameter, `0` meaning the natural alignment of `T`.
#[inline]
pub(crate) const fn resolve_alignment<T>(align: usize) -> usize {
    if align == 0 {
        align_of::<T>()
    } else {
        align
    }
}

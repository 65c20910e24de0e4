//! Tag normalization policies.
//!
//! A policy decides what happens to a tag that does not fit the [`Capacity`] of a
//! [`TaggedPtr`](crate::TaggedPtr). Policies are uninhabited marker types chosen through a type
//! parameter, so selecting one has no runtime representation.

use super::{Capacity, TagOutOfRange};

/// [`Normalize`] turns a raw tag into a tag suited for a [`Capacity`].
///
/// The trait is sealed: [`Ignore`], [`Clamp`], [`Assert`], and [`Reject`] are the only
/// implementations.
pub trait Normalize: sealed::Sealed {
    /// Name of the policy.
    const NAME: &'static str;

    /// Normalizes `raw` for `capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`TagOutOfRange`] if the policy refuses `raw`.
    fn normalize(raw: usize, capacity: Capacity) -> Result<usize, TagOutOfRange>;
}

/// Policies that never return an error.
///
/// It unlocks [`TaggedPtr::new`](crate::TaggedPtr::new) and the `usize` tag operators.
pub trait Infallible: Normalize {
    /// Normalizes `raw` for `capacity`.
    fn normalize_infallible(raw: usize, capacity: Capacity) -> usize;
}

/// [`Ignore`] stores the tag as supplied, only truncated to the width of the tag type.
///
/// Bits above the mask are not removed, and they land in the address bits of the pointer; the
/// caller vouches for every tag out of band.
///
/// # Examples
///
/// ```
/// use tagged_ptr::{Capacity, Ignore, Normalize};
///
/// assert_eq!(Ignore::normalize(9, Capacity::new(8)), Ok(9));
/// assert_eq!(Ignore::normalize(0x1_09, Capacity::new(8)), Ok(9));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Ignore {}

/// [`Clamp`] keeps the bits of the tag covered by the mask, and drops the rest.
///
/// # Examples
///
/// ```
/// use tagged_ptr::{Capacity, Clamp, Normalize};
///
/// assert_eq!(Clamp::normalize(9, Capacity::new(8)), Ok(1));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Clamp {}

/// [`Assert`] checks the tag with a `debug_assert!`.
///
/// Release builds do not check the tag, and treat it the way [`Ignore`] does.
///
/// # Examples
///
/// ```
/// use tagged_ptr::{Assert, Capacity, Normalize};
///
/// assert_eq!(Assert::normalize(7, Capacity::new(8)), Ok(7));
/// ```
///
/// ```should_panic
/// use tagged_ptr::{Assert, Capacity, Normalize};
///
/// # assert!(cfg!(debug_assertions));
/// let _tag = Assert::normalize(8, Capacity::new(8));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Assert {}

/// [`Reject`] returns [`TagOutOfRange`] for any tag above the mask, in every build.
///
/// # Examples
///
/// ```
/// use tagged_ptr::{Capacity, Normalize, Reject, TagOutOfRange};
///
/// assert_eq!(Reject::normalize(3, Capacity::new(4)), Ok(3));
/// assert_eq!(Reject::normalize(5, Capacity::new(4)), Err(TagOutOfRange::new(5, 3)));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Reject {}

impl Normalize for Ignore {
    const NAME: &'static str = "ignore";

    #[inline]
    fn normalize(raw: usize, capacity: Capacity) -> Result<usize, TagOutOfRange> {
        Ok(Self::normalize_infallible(raw, capacity))
    }
}

impl Infallible for Ignore {
    #[inline]
    fn normalize_infallible(raw: usize, capacity: Capacity) -> usize {
        capacity.width().truncate(raw)
    }
}

impl Normalize for Clamp {
    const NAME: &'static str = "clamp";

    #[inline]
    fn normalize(raw: usize, capacity: Capacity) -> Result<usize, TagOutOfRange> {
        Ok(Self::normalize_infallible(raw, capacity))
    }
}

impl Infallible for Clamp {
    #[inline]
    fn normalize_infallible(raw: usize, capacity: Capacity) -> usize {
        raw & capacity.mask()
    }
}

impl Normalize for Assert {
    const NAME: &'static str = "assert";

    #[inline]
    fn normalize(raw: usize, capacity: Capacity) -> Result<usize, TagOutOfRange> {
        Ok(Self::normalize_infallible(raw, capacity))
    }
}

impl Infallible for Assert {
    #[inline]
    fn normalize_infallible(raw: usize, capacity: Capacity) -> usize {
        debug_assert!(
            capacity.fits(raw),
            "tag value outside of alignment range"
        );
        capacity.width().truncate(raw)
    }
}

impl Normalize for Reject {
    const NAME: &'static str = "reject";

    #[inline]
    fn normalize(raw: usize, capacity: Capacity) -> Result<usize, TagOutOfRange> {
        if capacity.fits(raw) {
            Ok(raw)
        } else {
            Err(TagOutOfRange::new(raw, capacity.mask()))
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Ignore {}
    impl Sealed for super::Clamp {}
    impl Sealed for super::Assert {}
    impl Sealed for super::Reject {}
}

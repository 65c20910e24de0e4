use super::{Clamp, Infallible, Normalize, TagOutOfRange, TaggedPtr};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// [`TagValue`] is a tag that has passed through the normalization policy of
/// [`TaggedPtr<T, N, ALIGN>`](TaggedPtr).
///
/// Tag operations on a [`TaggedPtr`] take a [`TagValue`] so that the value has been validated
/// for exactly the tag space it is written into.
///
/// # Examples
///
/// ```
/// use tagged_ptr::{Reject, TagValue};
///
/// assert_eq!(TagValue::<u64, Reject>::new(5).map(TagValue::get), Ok(5));
/// assert!(TagValue::<u64, Reject>::new(8).is_err());
///
/// let clamped: TagValue<u64> = TagValue::from(9);
/// assert_eq!(clamped.get(), 1);
/// ```
pub struct TagValue<T, N = Clamp, const ALIGN: usize = 0> {
    value: usize,
    _phantom: PhantomData<fn() -> (*const T, N)>,
}

impl<T, N: Normalize, const ALIGN: usize> TagValue<T, N, ALIGN> {
    /// Normalizes `raw` with `N`.
    ///
    /// # Errors
    ///
    /// Returns [`TagOutOfRange`] if `N` refuses `raw`.
    #[inline]
    pub fn new(raw: usize) -> Result<Self, TagOutOfRange> {
        N::normalize(raw, TaggedPtr::<T, N, ALIGN>::CAPACITY).map(Self::from_normalized)
    }

    /// Returns the normalized value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> usize {
        self.value
    }

    /// Wraps a value that already went through `N`.
    #[inline]
    pub(crate) const fn from_normalized(value: usize) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }
}

impl<T, N: Infallible, const ALIGN: usize> From<usize> for TagValue<T, N, ALIGN> {
    #[inline]
    fn from(raw: usize) -> Self {
        Self::from_normalized(N::normalize_infallible(
            raw,
            TaggedPtr::<T, N, ALIGN>::CAPACITY,
        ))
    }
}

impl<T, N, const ALIGN: usize> From<TagValue<T, N, ALIGN>> for usize {
    #[inline]
    fn from(tag: TagValue<T, N, ALIGN>) -> Self {
        tag.value
    }
}

impl<T, N, const ALIGN: usize> Clone for TagValue<T, N, ALIGN> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, N, const ALIGN: usize> Copy for TagValue<T, N, ALIGN> {}

impl<T, N, const ALIGN: usize> Default for TagValue<T, N, ALIGN> {
    #[inline]
    fn default() -> Self {
        Self {
            value: 0,
            _phantom: PhantomData,
        }
    }
}

impl<T, N, const ALIGN: usize> fmt::Debug for TagValue<T, N, ALIGN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TagValue").field(&self.value).finish()
    }
}

impl<T, N, const ALIGN: usize> Eq for TagValue<T, N, ALIGN> {}

impl<T, N, const ALIGN: usize> Hash for TagValue<T, N, ALIGN> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T, N, const ALIGN: usize> PartialEq for TagValue<T, N, ALIGN> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#![allow(clippy::module_name_repetitions)]

use std::error::Error;
use std::fmt;

/// [`TagOutOfRange`] is returned when a tag exceeds the bits that the alignment leaves free.
///
/// Only the [`Reject`](crate::Reject) policy surfaces it as a value; [`Assert`](crate::Assert)
/// turns the same condition into a debug-build panic.
///
/// # Examples
///
/// ```
/// use tagged_ptr::{Reject, TagOutOfRange, TaggedPtr};
///
/// let mut value = 7_u32;
/// let result = TaggedPtr::<u32, Reject>::try_new(&mut value, 4);
/// assert_eq!(result.unwrap_err(), TagOutOfRange::new(4, 3));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TagOutOfRange {
    tag: usize,
    max: usize,
}

impl TagOutOfRange {
    /// Creates a new [`TagOutOfRange`].
    #[must_use]
    #[inline]
    pub const fn new(tag: usize, max: usize) -> Self {
        Self { tag, max }
    }

    /// Returns the rejected tag.
    #[must_use]
    #[inline]
    pub const fn tag(&self) -> usize {
        self.tag
    }

    /// Returns the largest tag the alignment could have stored.
    #[must_use]
    #[inline]
    pub const fn max(&self) -> usize {
        self.max
    }
}

impl fmt::Display for TagOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tag value {} outside of alignment range 0..={}",
            self.tag, self.max
        )
    }
}

impl Error for TagOutOfRange {}

#[cfg(test)]
mod test {
    use super::*;

    static_assertions::assert_impl_all!(TagOutOfRange: Error, Send, Sync, Copy);

    #[test]
    fn display() {
        let error = TagOutOfRange::new(9, 7);
        assert_eq!(error.tag(), 9);
        assert_eq!(error.max(), 7);
        assert_eq!(
            error.to_string(),
            "tag value 9 outside of alignment range 0..=7"
        );
        let boxed: Box<dyn Error> = Box::new(error);
        assert!(boxed.source().is_none());
    }
}

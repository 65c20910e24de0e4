//! Integration with code that is generic over pointer-like types.

use super::{Normalize, TaggedPtr};

use std::hash::{Hash, Hasher};
use std::ptr::{addr_of, NonNull};

/// [`PointerLike`] abstracts over types that refer to a single `Target` the way a raw pointer
/// does.
///
/// # Examples
///
/// ```
/// use std::ptr::NonNull;
/// use tagged_ptr::{PointerLike, TaggedPtr};
///
/// fn address_of<P: PointerLike>(ptr: P) -> usize {
///     ptr.to_address() as usize
/// }
///
/// let value = 5_u64;
/// let tagged: TaggedPtr<u64> = TaggedPtr::pointer_to(&value);
/// assert_eq!(address_of(tagged), address_of(NonNull::from(&value)));
/// ```
pub trait PointerLike: Copy {
    /// Type of the pointee.
    type Target;

    /// The same kind of pointer to `U`.
    type Rebind<U>: PointerLike<Target = U>;

    /// Creates a pointer to `target`.
    fn pointer_to(target: &Self::Target) -> Self;

    /// Returns the raw address of the pointee.
    fn to_address(self) -> *const Self::Target;

    /// Reinterprets `self` as a pointer to `U`.
    ///
    /// [`TaggedPtr`] refuses at compile time a `U` that requires a stricter alignment, or that
    /// would leave a narrower tag space.
    fn rebind<U>(self) -> Self::Rebind<U>;
}

impl<T, N: Normalize, const ALIGN: usize> PointerLike for TaggedPtr<T, N, ALIGN> {
    type Target = T;
    type Rebind<U> = TaggedPtr<U, N, ALIGN>;

    #[inline]
    fn pointer_to(target: &T) -> Self {
        TaggedPtr::pointer_to(target)
    }

    #[inline]
    fn to_address(self) -> *const T {
        self.pointer().cast_const()
    }

    #[inline]
    fn rebind<U>(self) -> TaggedPtr<U, N, ALIGN> {
        self.cast()
    }
}

impl<T> PointerLike for *const T {
    type Target = T;
    type Rebind<U> = *const U;

    #[inline]
    fn pointer_to(target: &T) -> Self {
        addr_of!(*target)
    }

    #[inline]
    fn to_address(self) -> *const T {
        self
    }

    #[inline]
    fn rebind<U>(self) -> *const U {
        self.cast()
    }
}

impl<T> PointerLike for *mut T {
    type Target = T;
    type Rebind<U> = *mut U;

    #[inline]
    fn pointer_to(target: &T) -> Self {
        addr_of!(*target).cast_mut()
    }

    #[inline]
    fn to_address(self) -> *const T {
        self.cast_const()
    }

    #[inline]
    fn rebind<U>(self) -> *mut U {
        self.cast()
    }
}

impl<T> PointerLike for NonNull<T> {
    type Target = T;
    type Rebind<U> = NonNull<U>;

    #[inline]
    fn pointer_to(target: &T) -> Self {
        NonNull::from(target)
    }

    #[inline]
    fn to_address(self) -> *const T {
        self.as_ptr().cast_const()
    }

    #[inline]
    fn rebind<U>(self) -> NonNull<U> {
        self.cast()
    }
}

/// Destructures a [`TaggedPtr`] into its pointer and tag.
///
/// # Examples
///
/// ```
/// use tagged_ptr::TaggedPtr;
///
/// let mut value = 0_u32;
/// let (ptr, tag): (*mut u32, usize) = TaggedPtr::<u32>::new(&mut value, 1).into();
/// assert_eq!(ptr, &mut value as *mut u32);
/// assert_eq!(tag, 1);
/// ```
impl<T, N: Normalize, const ALIGN: usize> From<TaggedPtr<T, N, ALIGN>> for (*mut T, usize) {
    #[inline]
    fn from(ptr: TaggedPtr<T, N, ALIGN>) -> Self {
        ptr.get()
    }
}

/// Hashes the address only, consistently with equality.
impl<T, N: Normalize, const ALIGN: usize> Hash for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pointer().hash(state);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Clamp, Reject};
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn round_trip<P: PointerLike>(target: &P::Target) -> *const P::Target {
        P::pointer_to(target).to_address()
    }

    #[test]
    fn generic_round_trip() {
        let value = 9_u64;
        let expected: *const u64 = &value;
        assert_eq!(round_trip::<TaggedPtr<u64>>(&value), expected);
        assert_eq!(round_trip::<TaggedPtr<u64, Reject, 2>>(&value), expected);
        assert_eq!(round_trip::<*const u64>(&value), expected);
        assert_eq!(round_trip::<*mut u64>(&value), expected);
        assert_eq!(round_trip::<NonNull<u64>>(&value), expected);
    }

    #[test]
    fn rebind() {
        let value = [1_u32, 2_u32];
        let ptr: TaggedPtr<[u32; 2]> = TaggedPtr::pointer_to(&value);
        let rebound: <TaggedPtr<[u32; 2]> as PointerLike>::Rebind<u32> = ptr.rebind();
        assert_eq!(rebound.to_address(), value.as_ptr());
        assert_eq!(unsafe { rebound.as_ref() }, Some(&1));

        let raw: *const [u32; 2] = &value;
        assert_eq!(PointerLike::rebind::<u32>(raw), value.as_ptr());
    }

    #[test]
    fn rebind_keeps_tag() {
        let mut value = 0_u64;
        let raw: *mut u64 = &mut value;
        let ptr: TaggedPtr<u64, Clamp, 8> = TaggedPtr::new(raw, 5);
        let rebound = PointerLike::rebind::<u32>(ptr);
        assert_eq!(rebound.get(), (raw.cast::<u32>(), 5));
        assert_eq!(PointerLike::rebind::<u64>(rebound).get(), (raw, 5));
    }

    #[test]
    fn tuple() {
        let mut value = 0_u64;
        let raw: *mut u64 = &mut value;
        let (ptr, tag) = <(*mut u64, usize)>::from(TaggedPtr::<u64, Clamp>::new(raw, 3));
        assert_eq!(ptr, raw);
        assert_eq!(tag, 3);
    }

    #[test]
    fn hash_ignores_tag() {
        let mut value = 0_u64;
        let raw: *mut u64 = &mut value;
        let first: TaggedPtr<u64> = TaggedPtr::new(raw, 1);
        let second: TaggedPtr<u64> = TaggedPtr::new(raw, 2);
        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));
        assert_eq!(hash_of(&first), hash_of(&raw));

        let set: HashSet<TaggedPtr<u64>> = [first, second].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}

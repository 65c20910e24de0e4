use super::capacity::resolve_alignment;
use super::{Capacity, Clamp, Infallible, Normalize, TagOutOfRange, TagValue, TagWidth};

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem::align_of;
use std::ops::{BitAndAssign, BitOrAssign, Not};
use std::ptr::{self, addr_of, NonNull};

/// [`TaggedPtr`] is a raw pointer to `T` that carries an integer tag in the low bits of its
/// address.
///
/// The alignment of `T` guarantees that the lowest `log2(ALIGN)` bits of a valid address are
/// zero; [`TaggedPtr`] stores a tag in `[0, ALIGN - 1]` in those bits, so it occupies a single
/// word. Tags supplied as plain integers go through the normalization policy `N`, [`Clamp`] by
/// default. `ALIGN` defaults to `0`, which stands for the alignment of `T`; a smaller power of
/// two reserves fewer tag bits. A larger one is only sound for addresses that are aligned to it,
/// e.g., after [`cast`](Self::cast) to a type with a weaker alignment, so constructors taking a
/// reference refuse it.
///
/// Address and tag are kept separate in every operation: tag operations never modify the address,
/// and comparisons, ordering, and hashing only look at the address. [`TaggedPtr`] never owns the
/// pointee, and is neither [`Send`] nor [`Sync`], just like `*mut T`.
///
/// # Examples
///
/// ```
/// use tagged_ptr::TaggedPtr;
///
/// let mut value = 17_u64;
/// let ptr: TaggedPtr<u64> = TaggedPtr::new(&mut value, 5);
/// assert_eq!(ptr.tag(), 5);
/// assert_eq!(ptr.pointer(), &mut value as *mut u64);
/// assert_eq!(unsafe { *ptr.as_ref_unchecked() }, 17);
/// ```
///
/// A reference to `T` cannot be tagged with an alignment override larger than the alignment of
/// `T`.
///
/// ```compile_fail
/// use tagged_ptr::{Clamp, TaggedPtr};
///
/// let value = 1_u16;
/// let ptr: TaggedPtr<u16, Clamp, 4> = TaggedPtr::pointer_to(&value);
/// ```
#[repr(transparent)]
pub struct TaggedPtr<T, N = Clamp, const ALIGN: usize = 0> {
    ptr: *mut T,
    _phantom: PhantomData<N>,
}

impl<T, N: Normalize, const ALIGN: usize> TaggedPtr<T, N, ALIGN> {
    /// Alignment that the tag space is derived from.
    pub const ALIGNMENT: usize = resolve_alignment::<T>(ALIGN);

    /// Tag space of the [`TaggedPtr`].
    pub const CAPACITY: Capacity = Capacity::new(Self::ALIGNMENT);

    /// Number of tag bits.
    pub const BITS: u32 = Self::CAPACITY.bits();

    /// Tag mask; also the largest tag.
    pub const MASK: usize = Self::CAPACITY.mask();

    /// Width of the tag type.
    pub const WIDTH: TagWidth = Self::CAPACITY.width();

    /// Creates a null [`TaggedPtr`] with a zero tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let ptr: TaggedPtr<usize> = TaggedPtr::null();
    /// assert!(ptr.is_null());
    /// assert_eq!(ptr.tag(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub const fn null() -> Self {
        let _capacity = Self::CAPACITY;
        Self::from_packed(ptr::null_mut())
    }

    /// Creates a [`TaggedPtr`], normalizing `tag` with `N`.
    ///
    /// `ptr` must be aligned to [`Self::ALIGNMENT`]; debug builds check it.
    ///
    /// # Errors
    ///
    /// Returns [`TagOutOfRange`] if `N` refuses `tag`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{Reject, TaggedPtr};
    ///
    /// let mut value = 3_u32;
    /// assert!(TaggedPtr::<u32, Reject>::try_new(&mut value, 5).is_err());
    ///
    /// let ptr = TaggedPtr::<u32, Reject>::try_new(&mut value, 3).unwrap();
    /// assert_eq!(ptr.tag(), 3);
    /// ```
    #[inline]
    pub fn try_new(ptr: *mut T, tag: usize) -> Result<Self, TagOutOfRange> {
        let tag = N::normalize(tag, Self::CAPACITY)?;
        Ok(Self::pack(ptr, tag))
    }

    /// Creates a [`TaggedPtr`] from a tag that was already normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{Reject, TagValue, TaggedPtr};
    ///
    /// let mut value = 3_u32;
    /// let tag = TagValue::<u32, Reject>::new(2).unwrap();
    /// let ptr = TaggedPtr::with_tag_value(&mut value, tag);
    /// assert_eq!(ptr.tag(), 2);
    /// ```
    #[must_use]
    #[inline]
    pub fn with_tag_value(ptr: *mut T, tag: TagValue<T, N, ALIGN>) -> Self {
        Self::pack(ptr, tag.get())
    }

    /// Creates a [`TaggedPtr`] without normalizing `tag`.
    ///
    /// # Safety
    ///
    /// `tag` must not be greater than [`Self::MASK`], and `ptr` must be aligned to
    /// [`Self::ALIGNMENT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let ptr: TaggedPtr<u64> = unsafe { TaggedPtr::new_unchecked(std::ptr::null_mut(), 1) };
    /// assert_eq!(ptr.tag(), 1);
    /// ```
    #[must_use]
    #[inline]
    pub unsafe fn new_unchecked(ptr: *mut T, tag: usize) -> Self {
        debug_assert!(Self::fits(tag), "tag value outside of alignment range");
        Self::pack(ptr, tag)
    }

    /// Creates a [`TaggedPtr`] with a zero tag pointing to `target`.
    ///
    /// [`Self::ALIGNMENT`] may not exceed the alignment of `T`; this is checked at compile time.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let value = 11_u32;
    /// let ptr: TaggedPtr<u32> = TaggedPtr::pointer_to(&value);
    /// assert_eq!(ptr.tag(), 0);
    /// assert_eq!(unsafe { ptr.as_ref() }, Some(&11));
    /// ```
    #[must_use]
    #[inline]
    pub fn pointer_to(target: &T) -> Self {
        Self::from_reference(addr_of!(*target).cast_mut())
    }

    /// Reconstructs a [`TaggedPtr`] from its packed representation.
    ///
    /// # Safety
    ///
    /// `raw` must have been produced by [`Self::into_raw`] on a [`TaggedPtr`] of the same type.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::AtomicPtr;
    /// use std::sync::atomic::Ordering::Relaxed;
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let mut value = 23_u64;
    /// let slot = AtomicPtr::new(TaggedPtr::<u64>::new(&mut value, 2).into_raw());
    /// let ptr: TaggedPtr<u64> = unsafe { TaggedPtr::from_raw(slot.load(Relaxed)) };
    /// assert_eq!(ptr.tag(), 2);
    /// assert_eq!(unsafe { ptr.as_ref() }, Some(&23));
    /// ```
    #[must_use]
    #[inline]
    pub const unsafe fn from_raw(raw: *mut T) -> Self {
        Self::from_packed(raw)
    }

    /// Returns the packed representation.
    ///
    /// The result is not a valid pointer to `T` unless the tag is zero; it is meant to be stored,
    /// e.g., in an [`AtomicPtr`](std::sync::atomic::AtomicPtr), and passed back to
    /// [`Self::from_raw`].
    #[must_use]
    #[inline]
    pub const fn into_raw(self) -> *mut T {
        self.ptr
    }

    /// Returns the packed representation as an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let ptr: TaggedPtr<u64> = TaggedPtr::new(std::ptr::null_mut(), 3);
    /// assert_eq!(ptr.to_bits(), 3);
    /// ```
    #[must_use]
    #[inline]
    pub fn to_bits(self) -> usize {
        self.ptr as usize
    }

    /// Returns `true` if `tag` fits the tag space.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// assert!(TaggedPtr::<u32>::fits(3));
    /// assert!(!TaggedPtr::<u32>::fits(4));
    /// ```
    #[must_use]
    #[inline]
    pub const fn fits(tag: usize) -> bool {
        Self::CAPACITY.fits(tag)
    }

    /// Returns the pointer with the tag bits cleared.
    #[must_use]
    #[inline]
    pub fn pointer(self) -> *mut T {
        map_addr(self.ptr, |addr| addr & !Self::MASK)
    }

    /// Returns the tag.
    #[must_use]
    #[inline]
    pub fn tag(self) -> usize {
        self.ptr as usize & Self::MASK
    }

    /// Returns the pointer and the tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let mut value = 1_u32;
    /// let (ptr, tag) = TaggedPtr::<u32>::new(&mut value, 2).get();
    /// assert_eq!((ptr, tag), (&mut value as *mut u32, 2));
    /// ```
    #[must_use]
    #[inline]
    pub fn get(self) -> (*mut T, usize) {
        (self.pointer(), self.tag())
    }

    /// Returns `true` if the address is null, whatever the tag is.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let ptr: TaggedPtr<u64> = TaggedPtr::new(std::ptr::null_mut(), 1);
    /// assert!(ptr.is_null());
    /// assert_eq!(ptr.tag(), 1);
    /// ```
    #[must_use]
    #[inline]
    pub fn is_null(self) -> bool {
        self.pointer().is_null()
    }

    /// Returns a shared reference to the pointee, or `None` if the address is null.
    ///
    /// # Safety
    ///
    /// The same as [`pointer::as_ref`](https://doc.rust-lang.org/std/primitive.pointer.html#method.as_ref).
    #[must_use]
    #[inline]
    pub unsafe fn as_ref<'a>(self) -> Option<&'a T> {
        self.pointer().as_ref()
    }

    /// Returns a mutable reference to the pointee, or `None` if the address is null.
    ///
    /// # Safety
    ///
    /// The same as [`pointer::as_mut`](https://doc.rust-lang.org/std/primitive.pointer.html#method.as_mut).
    #[must_use]
    #[inline]
    pub unsafe fn as_mut<'a>(self) -> Option<&'a mut T> {
        self.pointer().as_mut()
    }

    /// Dereferences the pointer.
    ///
    /// # Safety
    ///
    /// The same as `&*ptr` for a raw pointer: the address must not be null, and must point to a
    /// live `T` for `'a`.
    #[must_use]
    #[inline]
    pub unsafe fn as_ref_unchecked<'a>(self) -> &'a T {
        &*self.pointer()
    }

    /// Sets the bits of `rhs` in the tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{TagValue, TaggedPtr};
    ///
    /// let mut value = 0_u64;
    /// let mut ptr: TaggedPtr<u64> = TaggedPtr::new(&mut value, 1);
    /// ptr.merge_tag(TagValue::from(2));
    /// assert_eq!(ptr.tag(), 3);
    /// assert_eq!(ptr.pointer(), &mut value as *mut u64);
    /// ```
    #[inline]
    pub fn merge_tag(&mut self, rhs: TagValue<T, N, ALIGN>) {
        let rhs = rhs.get();
        self.ptr = map_addr(self.ptr, |addr| addr | rhs);
    }

    /// Clears the bits of the tag that are not set in `rhs`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{TagValue, TaggedPtr};
    ///
    /// let mut value = 0_u64;
    /// let mut ptr: TaggedPtr<u64> = TaggedPtr::new(&mut value, 0b101);
    /// ptr.mask_tag(TagValue::from(0b110));
    /// assert_eq!(ptr.tag(), 0b100);
    /// ```
    #[inline]
    pub fn mask_tag(&mut self, rhs: TagValue<T, N, ALIGN>) {
        let rhs = rhs.get();
        self.ptr = map_addr(self.ptr, |addr| (addr & !Self::MASK) | (addr & rhs));
    }

    /// Returns the bitwise complement of the tag within the tag space.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let ptr: TaggedPtr<u64> = TaggedPtr::new(std::ptr::null_mut(), 0b010);
    /// assert_eq!(ptr.complement_tag(), 0b101);
    /// ```
    #[must_use]
    #[inline]
    pub fn complement_tag(self) -> usize {
        !self.tag() & Self::MASK
    }

    /// Replaces the tag, and returns the previous one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{TagValue, TaggedPtr};
    ///
    /// let mut ptr: TaggedPtr<u64> = TaggedPtr::null();
    /// assert_eq!(ptr.set_tag(TagValue::from(6)), 0);
    /// assert_eq!(ptr.tag(), 6);
    /// ```
    #[inline]
    pub fn set_tag(&mut self, tag: TagValue<T, N, ALIGN>) -> usize {
        let old_tag = self.tag();
        *self = self.with_tag(tag);
        old_tag
    }

    /// Clears the tag, and returns the previous one.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let mut ptr: TaggedPtr<u64> = TaggedPtr::new(std::ptr::null_mut(), 4);
    /// assert_eq!(ptr.unset_tag(), 4);
    /// assert_eq!(ptr.tag(), 0);
    /// ```
    #[inline]
    pub fn unset_tag(&mut self) -> usize {
        let old_tag = self.tag();
        *self = self.without_tag();
        old_tag
    }

    /// Returns a copy of `self` with the tag replaced.
    #[must_use]
    #[inline]
    pub fn with_tag(self, tag: TagValue<T, N, ALIGN>) -> Self {
        let tag = tag.get();
        Self::from_packed(map_addr(self.ptr, |addr| (addr & !Self::MASK) | tag))
    }

    /// Returns a copy of `self` with a zero tag.
    #[must_use]
    #[inline]
    pub fn without_tag(self) -> Self {
        Self::from_packed(self.pointer())
    }

    /// Converts `self` into a [`TaggedPtr`] with another policy and a tag space at least as
    /// large; address and tag are copied as they are.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{Clamp, Reject, TaggedPtr};
    ///
    /// let mut value = 0_u64;
    /// let narrow: TaggedPtr<u64, Clamp, 2> = TaggedPtr::new(&mut value, 1);
    /// let wide: TaggedPtr<u64, Reject> = narrow.convert();
    /// assert_eq!(wide.get(), narrow.get());
    /// ```
    ///
    /// Narrowing the tag space does not compile.
    ///
    /// ```compile_fail
    /// use tagged_ptr::{Clamp, TaggedPtr};
    ///
    /// let wide: TaggedPtr<u64> = TaggedPtr::null();
    /// let narrow: TaggedPtr<u64, Clamp, 2> = wide.convert();
    /// ```
    #[must_use]
    #[inline]
    pub fn convert<M: Normalize, const TO: usize>(self) -> TaggedPtr<T, M, TO> {
        let () = AssertWidening::<T, N, M, ALIGN, TO>::WIDENING;
        TaggedPtr::from_packed(self.ptr)
    }

    /// Casts `self` to a [`TaggedPtr`] of `U` with the same alignment parameter.
    ///
    /// `U` may not require a stricter alignment than [`Self::ALIGNMENT`], and the tag space of the
    /// result may not be narrower than that of `self`; both are checked at compile time. With the
    /// natural alignment, the latter means `U` is exactly as aligned as `T`; spell out the
    /// alignment parameter to keep the tag space of `T`, or use [`Self::try_cast`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{Clamp, TaggedPtr};
    ///
    /// let mut value = [0_u32; 2];
    /// let ptr: TaggedPtr<[u32; 2]> = TaggedPtr::new(&mut value, 3);
    /// let cast: TaggedPtr<u32> = ptr.cast();
    /// assert_eq!(cast.get(), (value.as_mut_ptr(), 3));
    ///
    /// let mut wide = 0_u64;
    /// let ptr: TaggedPtr<u64, Clamp, 8> = TaggedPtr::new(&mut wide, 5);
    /// let cast: TaggedPtr<u32, Clamp, 8> = ptr.cast();
    /// assert_eq!(cast.tag(), 5);
    /// ```
    ///
    /// ```compile_fail
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let ptr: TaggedPtr<u32> = TaggedPtr::null();
    /// let cast: TaggedPtr<u64> = ptr.cast();
    /// ```
    ///
    /// ```compile_fail
    /// use tagged_ptr::TaggedPtr;
    ///
    /// let ptr: TaggedPtr<u64> = TaggedPtr::null();
    /// let cast: TaggedPtr<u32> = ptr.cast();
    /// ```
    #[must_use]
    #[inline]
    pub fn cast<U>(self) -> TaggedPtr<U, N, ALIGN> {
        let () = AssertRebind::<T, U, N, ALIGN>::REBIND;
        TaggedPtr::from_packed(self.ptr.cast::<U>())
    }

    /// Casts `self` to a [`TaggedPtr`] of `U` with the same alignment parameter, failing if the
    /// tag does not fit the tag space of the result.
    ///
    /// `U` may not require a stricter alignment than [`Self::ALIGNMENT`]; this is checked at
    /// compile time.
    ///
    /// # Errors
    ///
    /// Returns [`TagOutOfRange`] if the tag is greater than the tag mask of the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::{TagOutOfRange, TaggedPtr};
    ///
    /// let mut value = 0_u64;
    /// let ptr: TaggedPtr<u64> = TaggedPtr::new(&mut value, 3);
    /// let cast: TaggedPtr<u32> = ptr.try_cast().unwrap();
    /// assert_eq!(cast.tag(), 3);
    ///
    /// let ptr: TaggedPtr<u64> = TaggedPtr::new(&mut value, 5);
    /// assert_eq!(ptr.try_cast::<u32>(), Err(TagOutOfRange::new(5, 3)));
    /// ```
    #[inline]
    pub fn try_cast<U>(self) -> Result<TaggedPtr<U, N, ALIGN>, TagOutOfRange> {
        let () = AssertRebind::<T, U, N, ALIGN>::ALIGNED;
        let tag = self.tag();
        let mask = TaggedPtr::<U, N, ALIGN>::MASK;
        if tag > mask {
            return Err(TagOutOfRange::new(tag, mask));
        }
        Ok(TaggedPtr::from_packed(self.ptr.cast::<U>()))
    }

    /// Packs an aligned pointer and a normalized tag.
    #[inline]
    fn pack(ptr: *mut T, tag: usize) -> Self {
        debug_assert_eq!(
            ptr as usize & Self::MASK,
            0,
            "pointer is not aligned to the tag space"
        );
        Self::from_packed(map_addr(ptr, |addr| addr | tag))
    }

    /// Packs a pointer derived from a reference with a zero tag.
    #[inline]
    fn from_reference(ptr: *mut T) -> Self {
        let () = AssertReference::<T, N, ALIGN>::ALIGNED;
        Self::pack(ptr, 0)
    }

    /// Wraps an already packed pointer.
    #[inline]
    const fn from_packed(ptr: *mut T) -> Self {
        Self {
            ptr,
            _phantom: PhantomData,
        }
    }
}

impl<T, N: Infallible, const ALIGN: usize> TaggedPtr<T, N, ALIGN> {
    /// Creates a [`TaggedPtr`], normalizing `tag` with `N`.
    ///
    /// `ptr` must be aligned to [`Self::ALIGNMENT`]; debug builds check it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagged_ptr::TaggedPtr;
    ///
    /// #[repr(align(8))]
    /// struct Node(u64);
    ///
    /// let mut node = Node(0);
    /// let ptr: TaggedPtr<Node> = TaggedPtr::new(&mut node, 9);
    /// assert_eq!(ptr.tag(), 1);
    /// assert_eq!(ptr.pointer(), &mut node as *mut Node);
    /// ```
    #[must_use]
    #[inline]
    pub fn new(ptr: *mut T, tag: usize) -> Self {
        Self::pack(ptr, N::normalize_infallible(tag, Self::CAPACITY))
    }
}

/// Address arithmetic that keeps the provenance of the pointer.
///
/// Converting a pointer to an integer and back is implementation-defined; this is the only place
/// the crate produces a pointer from a computed address, and it does so by offsetting the original
/// pointer instead of casting an integer.
#[inline]
fn map_addr<T, F: FnOnce(usize) -> usize>(ptr: *mut T, f: F) -> *mut T {
    let addr = ptr as usize;
    ptr.cast::<u8>()
        .wrapping_add(f(addr).wrapping_sub(addr))
        .cast::<T>()
}

/// Compile-time check of [`TaggedPtr::convert`].
struct AssertWidening<T, N, M, const FROM: usize, const TO: usize>(PhantomData<(*mut T, N, M)>);

impl<T, N: Normalize, M: Normalize, const FROM: usize, const TO: usize>
    AssertWidening<T, N, M, FROM, TO>
{
    const WIDENING: () = {
        let from = TaggedPtr::<T, N, FROM>::ALIGNMENT;
        let to = TaggedPtr::<T, M, TO>::ALIGNMENT;
        assert!(from <= to, "conversion would narrow the tag space");
        assert!(
            to == from || to <= align_of::<T>(),
            "conversion would require a stricter alignment than the address has"
        );
    };
}

/// Compile-time checks of [`TaggedPtr::cast`] and [`TaggedPtr::try_cast`].
struct AssertRebind<T, U, N, const ALIGN: usize>(PhantomData<(*mut T, *mut U, N)>);

impl<T, U, N: Normalize, const ALIGN: usize> AssertRebind<T, U, N, ALIGN> {
    const ALIGNED: () = assert!(
        align_of::<U>() <= TaggedPtr::<T, N, ALIGN>::ALIGNMENT,
        "tried to rebind to a type with a stricter alignment"
    );

    const REBIND: () = {
        let () = Self::ALIGNED;
        assert!(
            TaggedPtr::<T, N, ALIGN>::MASK <= TaggedPtr::<U, N, ALIGN>::MASK,
            "rebind would narrow the tag space"
        );
    };
}

/// Compile-time check of the constructors taking a reference.
struct AssertReference<T, N, const ALIGN: usize>(PhantomData<(*mut T, N)>);

impl<T, N: Normalize, const ALIGN: usize> AssertReference<T, N, ALIGN> {
    const ALIGNED: () = assert!(
        TaggedPtr::<T, N, ALIGN>::ALIGNMENT <= align_of::<T>(),
        "alignment override exceeds the alignment of the pointee"
    );
}

impl<T, N, const ALIGN: usize> Clone for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, N, const ALIGN: usize> Copy for TaggedPtr<T, N, ALIGN> {}

impl<T, N: Normalize, const ALIGN: usize> Default for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T, N: Normalize, const ALIGN: usize> fmt::Debug for TaggedPtr<T, N, ALIGN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedPtr")
            .field("pointer", &self.pointer())
            .field("tag", &self.tag())
            .field("policy", &N::NAME)
            .finish()
    }
}

impl<T, N: Normalize, const ALIGN: usize> fmt::Pointer for TaggedPtr<T, N, ALIGN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.pointer(), f)
    }
}

impl<T, N: Normalize, const ALIGN: usize> From<&T> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn from(target: &T) -> Self {
        Self::pointer_to(target)
    }
}

impl<T, N: Normalize, const ALIGN: usize> From<&mut T> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn from(target: &mut T) -> Self {
        Self::from_reference(target)
    }
}

impl<T, N: Normalize, const ALIGN: usize> From<NonNull<T>> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn from(ptr: NonNull<T>) -> Self {
        Self::from_reference(ptr.as_ptr())
    }
}

impl<T, N: Normalize, const ALIGN: usize> BitOrAssign<TagValue<T, N, ALIGN>>
    for TaggedPtr<T, N, ALIGN>
{
    #[inline]
    fn bitor_assign(&mut self, rhs: TagValue<T, N, ALIGN>) {
        self.merge_tag(rhs);
    }
}

impl<T, N: Infallible, const ALIGN: usize> BitOrAssign<usize> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn bitor_assign(&mut self, rhs: usize) {
        self.merge_tag(TagValue::from(rhs));
    }
}

impl<T, N: Normalize, const ALIGN: usize> BitAndAssign<TagValue<T, N, ALIGN>>
    for TaggedPtr<T, N, ALIGN>
{
    #[inline]
    fn bitand_assign(&mut self, rhs: TagValue<T, N, ALIGN>) {
        self.mask_tag(rhs);
    }
}

impl<T, N: Infallible, const ALIGN: usize> BitAndAssign<usize> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn bitand_assign(&mut self, rhs: usize) {
        self.mask_tag(TagValue::from(rhs));
    }
}

impl<T, N: Normalize, const ALIGN: usize> Not for TaggedPtr<T, N, ALIGN> {
    type Output = usize;

    #[inline]
    fn not(self) -> usize {
        self.complement_tag()
    }
}

impl<T, N: Normalize, const ALIGN: usize> Eq for TaggedPtr<T, N, ALIGN> {}

impl<T, N: Normalize, M: Normalize, const ALIGN: usize, const OTHER: usize>
    PartialEq<TaggedPtr<T, M, OTHER>> for TaggedPtr<T, N, ALIGN>
{
    #[inline]
    fn eq(&self, other: &TaggedPtr<T, M, OTHER>) -> bool {
        self.pointer() == other.pointer()
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialEq<*mut T> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn eq(&self, other: &*mut T) -> bool {
        self.pointer() == *other
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialEq<*const T> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn eq(&self, other: &*const T) -> bool {
        self.pointer().cast_const() == *other
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialEq<TaggedPtr<T, N, ALIGN>> for *mut T {
    #[inline]
    fn eq(&self, other: &TaggedPtr<T, N, ALIGN>) -> bool {
        *self == other.pointer()
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialEq<TaggedPtr<T, N, ALIGN>> for *const T {
    #[inline]
    fn eq(&self, other: &TaggedPtr<T, N, ALIGN>) -> bool {
        *self == other.pointer().cast_const()
    }
}

impl<T, N: Normalize, const ALIGN: usize> Ord for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.pointer().cmp(&other.pointer())
    }
}

impl<T, N: Normalize, M: Normalize, const ALIGN: usize, const OTHER: usize>
    PartialOrd<TaggedPtr<T, M, OTHER>> for TaggedPtr<T, N, ALIGN>
{
    #[inline]
    fn partial_cmp(&self, other: &TaggedPtr<T, M, OTHER>) -> Option<Ordering> {
        Some(self.pointer().cmp(&other.pointer()))
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialOrd<*mut T> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn partial_cmp(&self, other: &*mut T) -> Option<Ordering> {
        Some(self.pointer().cmp(other))
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialOrd<*const T> for TaggedPtr<T, N, ALIGN> {
    #[inline]
    fn partial_cmp(&self, other: &*const T) -> Option<Ordering> {
        Some(self.pointer().cast_const().cmp(other))
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialOrd<TaggedPtr<T, N, ALIGN>> for *mut T {
    #[inline]
    fn partial_cmp(&self, other: &TaggedPtr<T, N, ALIGN>) -> Option<Ordering> {
        Some(self.cmp(&other.pointer()))
    }
}

impl<T, N: Normalize, const ALIGN: usize> PartialOrd<TaggedPtr<T, N, ALIGN>> for *const T {
    #[inline]
    fn partial_cmp(&self, other: &TaggedPtr<T, N, ALIGN>) -> Option<Ordering> {
        Some(self.cmp(&other.pointer().cast_const()))
    }
}

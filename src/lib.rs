#![deny(missing_docs, clippy::all, clippy::pedantic)]
#![doc = include_str!("../README.md")]

mod capacity;
pub use capacity::{Capacity, TagWidth};

mod error;
pub use error::TagOutOfRange;

mod policy;
pub use policy::{Assert, Clamp, Ignore, Infallible, Normalize, Reject};

mod tag_value;
pub use tag_value::TagValue;

mod tagged_ptr;
pub use tagged_ptr::TaggedPtr;

mod pointer_like;
pub use pointer_like::PointerLike;

#![deny(warnings, clippy::all, clippy::pedantic)]

mod mark_bit;
mod policy;

//! Pola Ptr - Tagged-Word Compact Union Primitives
//!
//! This crate contains the word-packing toolkit the rest of the Pola
//! compiler builds its handle types from:
//! - `PointerLike` for word codecs with declared spare low bits
//! - `PointerIntPair` for (handle, small int) packed into one word
//! - `PointerUnion` / `PointerUnion3` / `PointerUnion4` tagged unions
//! - `PointerSumType` for explicitly-tagged N-way unions
//! - `PointerEmbeddedInt`, `FlaggedPointer`, `PointerIntEnum` variants
//! - `DenseKey` sentinel-key infrastructure for probing hash tables
//!
//! # Design Philosophy
//!
//! - **One word each**: every composite here is a single `usize`, so it
//!   hashes, compares, and copies like a plain handle.
//! - **Indices, not addresses**: the "pointer" half of every packing is an
//!   arena handle encoded into a word with a declared count of
//!   guaranteed-zero low bits. No raw pointers, no `unsafe`.
//! - **Tags live in spare bits**: packed integers sit at the *top* of the
//!   spare-bit range so nested packings claim disjoint bits automatically.
//!
//! Misdeclaring spare bits is a correctness bug, not a recoverable error;
//! constructors carry `debug_assert!`s that incoming words honor their
//! masks, and bit-budget violations fail at compile time.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod dense_key;
mod embedded_int;
mod flagged;
mod int_enum;
mod int_pair;
mod pointer_like;
mod sum_type;
mod union2;
mod union3;
mod union4;

pub use dense_key::{fx_hash_word, DenseKey, EMPTY_WORD, TOMBSTONE_WORD};
pub use embedded_int::{EmbeddedIntError, PointerEmbeddedInt};
pub use flagged::FlaggedPointer;
pub use int_enum::PointerIntEnum;
pub use int_pair::PointerIntPair;
pub use pointer_like::{low_bit_mask, OpaqueWord, PointerLike};
pub use sum_type::{PointerSumType, SumMember, SumTag, SumTypeError, ZeroTagSlot};
pub use union2::{FirstSlot, PointerUnion};
pub use union3::PointerUnion3;
pub use union4::PointerUnion4;

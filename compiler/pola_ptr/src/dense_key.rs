//! Sentinel-key infrastructure for open-addressing hash tables.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::int_pair::PointerIntPair;
use crate::pointer_like::{OpaqueWord, PointerLike};

/// Reserved word marking an empty probing slot.
pub const EMPTY_WORD: usize = usize::MAX;

/// Reserved word marking a deleted probing slot.
pub const TOMBSTONE_WORD: usize = usize::MAX - 1;

/// Hash a word with the compiler's hasher of choice.
#[inline]
pub fn fx_hash_word(word: usize) -> u64 {
    let mut hasher = FxHasher::default();
    word.hash(&mut hasher);
    hasher.finish()
}

/// A key usable in probing hash tables that reserve two slots' worth of
/// value space for bookkeeping.
///
/// The two sentinels must be distinct from each other and from every value
/// the key type can naturally take. Word-backed keys derive them from the
/// `-1`/`-2` machine words, which the packers never produce (their handle
/// encodings cap out well below).
pub trait DenseKey: Eq {
    /// The reserved empty-slot key.
    fn empty_key() -> Self;

    /// The reserved deleted-slot key.
    fn tombstone_key() -> Self;

    /// 64-bit hash of this key.
    fn hash_value(&self) -> u64;
}

impl DenseKey for OpaqueWord {
    #[inline]
    fn empty_key() -> Self {
        OpaqueWord::new(EMPTY_WORD)
    }

    #[inline]
    fn tombstone_key() -> Self {
        OpaqueWord::new(TOMBSTONE_WORD)
    }

    #[inline]
    fn hash_value(&self) -> u64 {
        fx_hash_word(self.raw())
    }
}

impl<P: PointerLike, const INT_BITS: u32> DenseKey for PointerIntPair<P, INT_BITS> {
    #[inline]
    fn empty_key() -> Self {
        PointerIntPair::from_opaque_value(EMPTY_WORD)
    }

    #[inline]
    fn tombstone_key() -> Self {
        PointerIntPair::from_opaque_value(TOMBSTONE_WORD)
    }

    #[inline]
    fn hash_value(&self) -> u64 {
        fx_hash_word(self.opaque_value())
    }
}

//! A word holding either a handle or a small index, plus an invalid state.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::pointer_like::{low_bit_mask, PointerLike};

/// One word holding a handle (kind 0), a small index under one of the
/// non-zero kinds, or the invalid sentinel.
///
/// Layout:
/// - kind lives in the low `KIND_BITS` bits;
/// - kind 0 is the handle case, stored bit-identically to the handle's own
///   encoding (its spare bits are the kind bits);
/// - kinds `1..2^KIND_BITS` carry an index in the remaining high bits;
/// - the all-ones word is `INVALID`.
///
/// Out-of-range encodings (undeclared kind, index too wide) do not error:
/// `from_index` yields `INVALID`, and callers check `is_valid` before use.
pub struct PointerIntEnum<P: PointerLike, const KIND_BITS: u32> {
    word: usize,
    _marker: PhantomData<P>,
}

impl<P: PointerLike, const KIND_BITS: u32> PointerIntEnum<P, KIND_BITS> {
    const KIND_MASK: usize = low_bit_mask(KIND_BITS);
    const MAX_INDEX: usize = low_bit_mask(usize::BITS - KIND_BITS);

    /// The invalid sentinel.
    pub const INVALID: Self = PointerIntEnum {
        word: usize::MAX,
        _marker: PhantomData,
    };

    /// Store a handle under kind 0.
    #[inline]
    pub fn from_pointer(pointer: P) -> Self {
        const {
            assert!(KIND_BITS >= 1, "at least one kind bit is required");
            assert!(
                P::SPARE_LOW_BITS >= KIND_BITS,
                "handle spare bits cannot hold the kind"
            );
        }
        let word = pointer.into_word();
        debug_assert!(word & Self::KIND_MASK == 0, "handle word set kind bits");
        PointerIntEnum {
            word,
            _marker: PhantomData,
        }
    }

    /// Store an index under a non-zero kind.
    ///
    /// Returns `INVALID` when the kind is zero or undeclarable, when the
    /// index exceeds the representable width, or when the encoding would
    /// collide with the sentinel word.
    #[inline]
    pub fn from_index(kind: usize, index: usize) -> Self {
        if kind == 0 || kind > Self::KIND_MASK || index > Self::MAX_INDEX {
            return Self::INVALID;
        }
        let word = (index << KIND_BITS) | kind;
        if word == usize::MAX {
            return Self::INVALID;
        }
        PointerIntEnum {
            word,
            _marker: PhantomData,
        }
    }

    /// Whether this is anything other than the invalid sentinel.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.word != usize::MAX
    }

    /// The kind bits. Zero means the handle case.
    #[inline]
    pub fn kind(self) -> usize {
        self.word & Self::KIND_MASK
    }

    /// The stored index, when a valid index case is active.
    #[inline]
    pub fn index(self) -> Option<usize> {
        (self.is_valid() && self.kind() != 0).then(|| self.word >> KIND_BITS)
    }

    /// The stored handle, when the handle case is active.
    #[inline]
    pub fn pointer(self) -> Option<P> {
        (self.is_valid() && self.kind() == 0).then(|| P::from_word(self.word))
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.word
    }
}

impl<P: PointerLike, const KIND_BITS: u32> Default for PointerIntEnum<P, KIND_BITS> {
    #[inline]
    fn default() -> Self {
        Self::INVALID
    }
}

impl<P: PointerLike, const KIND_BITS: u32> Copy for PointerIntEnum<P, KIND_BITS> {}

impl<P: PointerLike, const KIND_BITS: u32> Clone for PointerIntEnum<P, KIND_BITS> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: PointerLike, const KIND_BITS: u32> PartialEq for PointerIntEnum<P, KIND_BITS> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl<P: PointerLike, const KIND_BITS: u32> Eq for PointerIntEnum<P, KIND_BITS> {}

impl<P: PointerLike, const KIND_BITS: u32> Hash for PointerIntEnum<P, KIND_BITS> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl<P: PointerLike, const KIND_BITS: u32> fmt::Debug for PointerIntEnum<P, KIND_BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            write!(f, "PointerIntEnum::INVALID")
        } else if let Some(pointer) = self.pointer() {
            write!(f, "PointerIntEnum(pointer: {pointer:?})")
        } else {
            write!(
                f,
                "PointerIntEnum(kind={}, index={})",
                self.kind(),
                self.word >> KIND_BITS
            )
        }
    }
}

//! Word codec trait for handle types with spare low bits.

use std::fmt;

/// Mask covering the low `bits` bits of a word.
#[inline]
pub const fn low_bit_mask(bits: u32) -> usize {
    if bits >= usize::BITS {
        usize::MAX
    } else {
        (1usize << bits) - 1
    }
}

/// A type that can round-trip through a machine word with a declared
/// number of guaranteed-zero low bits.
///
/// The spare low bits are what the packers in this crate steal for tags,
/// flags, and small integers. For arena handles the count is *declared*
/// (the handle picks its own encoding), not derived from any allocator
/// alignment, so the contract is simple:
///
/// - `into_word` never sets any of the low `SPARE_LOW_BITS` bits;
/// - null/invalid values encode as word `0`;
/// - `from_word(into_word(x)) == x` for every value `x`.
///
/// Violating the first rule silently corrupts whatever tag shares the word.
/// The packers `debug_assert!` the mask on entry, which is the only
/// detection this layer offers.
pub trait PointerLike: Copy + Eq + fmt::Debug {
    /// Number of low bits guaranteed to be zero in every encoded word.
    const SPARE_LOW_BITS: u32;

    /// Encode into a word. Low `SPARE_LOW_BITS` bits must be zero.
    fn into_word(self) -> usize;

    /// Decode from a word previously produced by `into_word`.
    fn from_word(word: usize) -> Self;

    /// Whether this value is the null encoding.
    ///
    /// Composite packings override this to unwrap their active member.
    #[inline]
    fn is_null(self) -> bool {
        self.into_word() == 0
    }
}

/// A bare word with no spare bits.
///
/// Used to round-trip packed values opaquely (map keys, sentinel words)
/// without knowing their member types.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct OpaqueWord(pub usize);

impl OpaqueWord {
    /// Create from a raw word.
    #[inline]
    pub const fn new(word: usize) -> Self {
        OpaqueWord(word)
    }

    /// Get the raw word.
    #[inline]
    pub const fn raw(self) -> usize {
        self.0
    }
}

impl PointerLike for OpaqueWord {
    const SPARE_LOW_BITS: u32 = 0;

    #[inline]
    fn into_word(self) -> usize {
        self.0
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        OpaqueWord(word)
    }
}

impl fmt::Debug for OpaqueWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueWord({:#x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_bit_mask() {
        assert_eq!(low_bit_mask(0), 0);
        assert_eq!(low_bit_mask(1), 1);
        assert_eq!(low_bit_mask(3), 0b111);
        assert_eq!(low_bit_mask(usize::BITS), usize::MAX);
    }

    #[test]
    fn test_opaque_word_round_trip() {
        let w = OpaqueWord::new(0xDEAD_BEEF);
        assert_eq!(OpaqueWord::from_word(w.into_word()), w);
        assert_eq!(w.raw(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_opaque_word_null() {
        assert!(OpaqueWord::new(0).is_null());
        assert!(!OpaqueWord::new(1).is_null());
    }
}

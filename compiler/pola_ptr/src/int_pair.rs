//! A handle and a small integer packed into one word.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::pointer_like::{low_bit_mask, PointerLike};

/// One word holding a `PointerLike` value plus `INT_BITS` of unsigned
/// integer payload.
///
/// The integer occupies the *top* `INT_BITS` of the handle's spare-bit
/// range, not the bottom. Nested pairs therefore claim disjoint bit ranges
/// with no coordination: the inner pair reports a reduced spare count, and
/// the outer pair's integer lands just below the inner one.
///
/// `INT_BITS` must not exceed `P::SPARE_LOW_BITS`; violating the budget is
/// a compile-time error.
///
/// Equality, ordering, and hashing all act on the raw word. The ordering is
/// a total order over the encoding, not a semantic order over the
/// (pointer, int) pair.
pub struct PointerIntPair<P: PointerLike, const INT_BITS: u32> {
    word: usize,
    _marker: PhantomData<P>,
}

impl<P: PointerLike, const INT_BITS: u32> PointerIntPair<P, INT_BITS> {
    const INT_SHIFT: u32 = P::SPARE_LOW_BITS - INT_BITS;
    const INT_MASK: usize = low_bit_mask(INT_BITS);
    const SHIFTED_INT_MASK: usize = Self::INT_MASK << Self::INT_SHIFT;
    const POINTER_MASK: usize = !low_bit_mask(P::SPARE_LOW_BITS);

    /// Pack a handle and an integer.
    ///
    /// Debug builds assert the integer fits in `INT_BITS`; release builds
    /// silently truncate it to the field width.
    #[inline]
    pub fn new(pointer: P, int: usize) -> Self {
        let mut pair = Self::from_pointer(pointer);
        pair.set_int(int);
        pair
    }

    /// Pack a handle with a zero integer.
    #[inline]
    pub fn from_pointer(pointer: P) -> Self {
        const { assert!(INT_BITS <= P::SPARE_LOW_BITS, "int field exceeds spare bits") }
        let word = pointer.into_word();
        debug_assert!(
            word & !Self::POINTER_MASK == 0,
            "handle word set its declared spare bits"
        );
        PointerIntPair {
            word,
            _marker: PhantomData,
        }
    }

    /// Extract the handle.
    #[inline]
    pub fn pointer(self) -> P {
        P::from_word(self.word & Self::POINTER_MASK)
    }

    /// Extract the integer.
    #[inline]
    pub fn int(self) -> usize {
        (self.word >> Self::INT_SHIFT) & Self::INT_MASK
    }

    /// Replace the handle, keeping the integer.
    #[inline]
    pub fn set_pointer(&mut self, pointer: P) {
        let word = pointer.into_word();
        debug_assert!(
            word & !Self::POINTER_MASK == 0,
            "handle word set its declared spare bits"
        );
        self.word = word | (self.word & !Self::POINTER_MASK);
    }

    /// Replace the integer, keeping the handle.
    ///
    /// Debug builds assert the value fits in `INT_BITS`; release builds
    /// silently truncate.
    #[inline]
    pub fn set_int(&mut self, int: usize) {
        debug_assert!(int <= Self::INT_MASK, "int value exceeds field width");
        self.word = (self.word & !Self::SHIFTED_INT_MASK)
            | ((int & Self::INT_MASK) << Self::INT_SHIFT);
    }

    /// Replace both fields at once.
    #[inline]
    pub fn set_pointer_and_int(&mut self, pointer: P, int: usize) {
        *self = Self::new(pointer, int);
    }

    /// The raw encoded word, for opaque round-trips and map keys.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.word
    }

    /// Rebuild from a word previously produced by `opaque_value`.
    ///
    /// No encoding checks are performed; this is also the entry point for
    /// reserved sentinel words that never decode to a real pair.
    #[inline]
    pub fn from_opaque_value(word: usize) -> Self {
        PointerIntPair {
            word,
            _marker: PhantomData,
        }
    }
}

impl<P: PointerLike, const INT_BITS: u32> PointerLike for PointerIntPair<P, INT_BITS> {
    const SPARE_LOW_BITS: u32 = P::SPARE_LOW_BITS - INT_BITS;

    #[inline]
    fn into_word(self) -> usize {
        self.word
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        Self::from_opaque_value(word)
    }
}

impl<P: PointerLike, const INT_BITS: u32> Copy for PointerIntPair<P, INT_BITS> {}

impl<P: PointerLike, const INT_BITS: u32> Clone for PointerIntPair<P, INT_BITS> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: PointerLike, const INT_BITS: u32> PartialEq for PointerIntPair<P, INT_BITS> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl<P: PointerLike, const INT_BITS: u32> Eq for PointerIntPair<P, INT_BITS> {}

impl<P: PointerLike, const INT_BITS: u32> PartialOrd for PointerIntPair<P, INT_BITS> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: PointerLike, const INT_BITS: u32> Ord for PointerIntPair<P, INT_BITS> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(&other.word)
    }
}

impl<P: PointerLike, const INT_BITS: u32> Hash for PointerIntPair<P, INT_BITS> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl<P: PointerLike, const INT_BITS: u32> fmt::Debug for PointerIntPair<P, INT_BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointerIntPair({:?}, int={})", self.pointer(), self.int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arena-handle stand-in with 3 declared spare bits.
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    struct TestRef(u32);

    impl PointerLike for TestRef {
        const SPARE_LOW_BITS: u32 = 3;

        fn into_word(self) -> usize {
            (self.0 as usize) << 3
        }

        fn from_word(word: usize) -> Self {
            #[expect(clippy::cast_possible_truncation, reason = "encoded from u32")]
            let raw = (word >> 3) as u32;
            TestRef(raw)
        }
    }

    #[test]
    fn test_pack_and_extract() {
        for int in 0..8 {
            let pair: PointerIntPair<TestRef, 3> = PointerIntPair::new(TestRef(42), int);
            assert_eq!(pair.pointer(), TestRef(42));
            assert_eq!(pair.int(), int);
        }
    }

    #[test]
    fn test_from_pointer_defaults_int_to_zero() {
        let pair: PointerIntPair<TestRef, 2> = PointerIntPair::from_pointer(TestRef(7));
        assert_eq!(pair.int(), 0);
        assert_eq!(pair.pointer(), TestRef(7));
    }

    #[test]
    fn test_set_pointer_keeps_int() {
        let mut pair: PointerIntPair<TestRef, 2> = PointerIntPair::new(TestRef(1), 3);
        pair.set_pointer(TestRef(9));
        assert_eq!(pair.pointer(), TestRef(9));
        assert_eq!(pair.int(), 3);
    }

    #[test]
    fn test_set_int_keeps_pointer() {
        let mut pair: PointerIntPair<TestRef, 2> = PointerIntPair::new(TestRef(1), 3);
        pair.set_int(1);
        assert_eq!(pair.pointer(), TestRef(1));
        assert_eq!(pair.int(), 1);
    }

    #[test]
    fn test_int_sits_at_top_of_spare_range() {
        // 3 spare bits, 1-bit int: the int must land in bit 2, leaving
        // bits 0-1 untouched for outer packings.
        let pair: PointerIntPair<TestRef, 1> = PointerIntPair::new(TestRef(0), 1);
        assert_eq!(pair.opaque_value(), 0b100);
    }

    #[test]
    fn test_nested_pairs_use_disjoint_bits() {
        let inner: PointerIntPair<TestRef, 1> = PointerIntPair::new(TestRef(5), 1);
        let outer: PointerIntPair<PointerIntPair<TestRef, 1>, 1> =
            PointerIntPair::new(inner, 1);
        assert_eq!(outer.pointer(), inner);
        assert_eq!(outer.int(), 1);
        assert_eq!(outer.pointer().pointer(), TestRef(5));
        assert_eq!(outer.pointer().int(), 1);
    }

    #[test]
    fn test_opaque_round_trip() {
        let pair: PointerIntPair<TestRef, 3> = PointerIntPair::new(TestRef(100), 5);
        let word = pair.opaque_value();
        let back: PointerIntPair<TestRef, 3> = PointerIntPair::from_opaque_value(word);
        assert_eq!(back, pair);
        assert_eq!(back.pointer(), TestRef(100));
        assert_eq!(back.int(), 5);
    }

    #[test]
    fn test_ordering_is_over_encoding() {
        let a: PointerIntPair<TestRef, 3> = PointerIntPair::new(TestRef(1), 7);
        let b: PointerIntPair<TestRef, 3> = PointerIntPair::new(TestRef(2), 0);
        // b's handle bits dominate a's int bits in the encoding.
        assert!(a < b);
    }

    #[test]
    fn test_hash_matches_equality() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(PointerIntPair::<TestRef, 2>::new(TestRef(1), 1));
        set.insert(PointerIntPair::<TestRef, 2>::new(TestRef(1), 1));
        set.insert(PointerIntPair::<TestRef, 2>::new(TestRef(1), 2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_memory_size() {
        assert_eq!(
            std::mem::size_of::<PointerIntPair<TestRef, 3>>(),
            std::mem::size_of::<usize>()
        );
    }
}

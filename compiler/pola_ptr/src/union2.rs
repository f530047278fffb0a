//! Two-way tagged union packed into one word.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::pointer_like::PointerLike;

const fn min_u32(a: u32, b: u32) -> u32 {
    if a < b {
        a
    } else {
        b
    }
}

/// A word holding either an `A` or a `B`, discriminated by one bit.
///
/// The tag occupies the *top* bit of the shared spare range, exactly where
/// a 1-bit `PointerIntPair` would put it. Bits below the tag stay zero, so
/// the union is itself `PointerLike` with one fewer spare bit and can be
/// nested to form 3- and 4-way unions.
///
/// Tag 0 is the first member, stored bit-identically to its own encoding.
/// Equality compares the raw word: a null `A` and a null `B` differ in the
/// tag bit and are *not* equal.
///
/// Both members need at least one spare bit; a zero-spare member is a
/// compile-time error.
pub struct PointerUnion<A: PointerLike, B: PointerLike> {
    word: usize,
    _marker: PhantomData<(A, B)>,
}

impl<A: PointerLike, B: PointerLike> PointerUnion<A, B> {
    const MIN_SPARE: u32 = min_u32(A::SPARE_LOW_BITS, B::SPARE_LOW_BITS);
    const TAG_SHIFT: u32 = Self::MIN_SPARE - 1;
    const TAG_MASK: usize = 1 << Self::TAG_SHIFT;

    /// Store an `A` (tag 0).
    #[inline]
    pub fn from_first(value: A) -> Self {
        const { assert!(Self::MIN_SPARE >= 1, "union members need a spare bit") }
        let word = value.into_word();
        debug_assert!(word & Self::TAG_MASK == 0, "member word set the tag bit");
        PointerUnion {
            word,
            _marker: PhantomData,
        }
    }

    /// Store a `B` (tag 1).
    #[inline]
    pub fn from_second(value: B) -> Self {
        const { assert!(Self::MIN_SPARE >= 1, "union members need a spare bit") }
        let word = value.into_word();
        debug_assert!(word & Self::TAG_MASK == 0, "member word set the tag bit");
        PointerUnion {
            word: word | Self::TAG_MASK,
            _marker: PhantomData,
        }
    }

    /// Whether the first member is active.
    #[inline]
    pub fn is_first(self) -> bool {
        self.word & Self::TAG_MASK == 0
    }

    /// Whether the second member is active.
    #[inline]
    pub fn is_second(self) -> bool {
        !self.is_first()
    }

    /// The first member, if active.
    #[inline]
    pub fn try_first(self) -> Option<A> {
        self.is_first().then(|| A::from_word(self.word))
    }

    /// The second member, if active.
    #[inline]
    pub fn try_second(self) -> Option<B> {
        self.is_second()
            .then(|| B::from_word(self.word & !Self::TAG_MASK))
    }

    /// The first member.
    ///
    /// # Panics
    /// Panics if the second member is active. Use `try_first` for the
    /// checked path.
    #[inline]
    pub fn first(self) -> A {
        match self.try_first() {
            Some(value) => value,
            None => panic!("union member access: first is not active"),
        }
    }

    /// The second member.
    ///
    /// # Panics
    /// Panics if the first member is active. Use `try_second` for the
    /// checked path.
    #[inline]
    pub fn second(self) -> B {
        match self.try_second() {
            Some(value) => value,
            None => panic!("union member access: second is not active"),
        }
    }

    /// Whether the *active* member decodes to null, unwrapping nested
    /// unions along the way.
    #[inline]
    pub fn is_active_null(self) -> bool {
        if self.is_first() {
            A::from_word(self.word).is_null()
        } else {
            B::from_word(self.word & !Self::TAG_MASK).is_null()
        }
    }

    /// Mutable access to the first member while it is active.
    ///
    /// Tag-0 storage is bit-identical to the member's own encoding, so the
    /// slot reads and writes the stored word directly. Returns `None` when
    /// the second member is active.
    #[inline]
    pub fn first_slot(&mut self) -> Option<FirstSlot<'_, A, B>> {
        if self.is_first() {
            Some(FirstSlot { union: self })
        } else {
            None
        }
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.word
    }

    /// Rebuild from a word previously produced by `opaque_value`.
    #[inline]
    pub fn from_opaque_value(word: usize) -> Self {
        PointerUnion {
            word,
            _marker: PhantomData,
        }
    }
}

/// In-place accessor for a union's active first member.
pub struct FirstSlot<'a, A: PointerLike, B: PointerLike> {
    union: &'a mut PointerUnion<A, B>,
}

impl<A: PointerLike, B: PointerLike> FirstSlot<'_, A, B> {
    /// Read the stored first member.
    #[inline]
    pub fn get(&self) -> A {
        A::from_word(self.union.word)
    }

    /// Overwrite the stored first member, keeping tag 0.
    #[inline]
    pub fn set(&mut self, value: A) {
        let word = value.into_word();
        debug_assert!(
            word & PointerUnion::<A, B>::TAG_MASK == 0,
            "member word set the tag bit"
        );
        self.union.word = word;
    }
}

impl<A: PointerLike, B: PointerLike> PointerLike for PointerUnion<A, B> {
    const SPARE_LOW_BITS: u32 = Self::MIN_SPARE - 1;

    #[inline]
    fn into_word(self) -> usize {
        self.word
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        Self::from_opaque_value(word)
    }

    #[inline]
    fn is_null(self) -> bool {
        self.is_active_null()
    }
}

impl<A: PointerLike, B: PointerLike> Copy for PointerUnion<A, B> {}

impl<A: PointerLike, B: PointerLike> Clone for PointerUnion<A, B> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: PointerLike, B: PointerLike> PartialEq for PointerUnion<A, B> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl<A: PointerLike, B: PointerLike> Eq for PointerUnion<A, B> {}

impl<A: PointerLike, B: PointerLike> PartialOrd for PointerUnion<A, B> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: PointerLike, B: PointerLike> Ord for PointerUnion<A, B> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(&other.word)
    }
}

impl<A: PointerLike, B: PointerLike> Hash for PointerUnion<A, B> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl<A: PointerLike, B: PointerLike> fmt::Debug for PointerUnion<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.try_first() {
            write!(f, "PointerUnion(first: {first:?})")
        } else if let Some(second) = self.try_second() {
            write!(f, "PointerUnion(second: {second:?})")
        } else {
            write!(f, "PointerUnion({:#x})", self.word)
        }
    }
}

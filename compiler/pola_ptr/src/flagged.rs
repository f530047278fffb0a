//! A handle with one boolean flag at an explicit bit position.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::pointer_like::PointerLike;

/// One word holding a handle and a single flag.
///
/// Unlike `PointerIntPair`, the flag's bit position is chosen by the
/// caller, which matters when another packing has already claimed part of
/// the spare range. `FLAG_BIT` must lie inside the handle's spare bits;
/// anything else is a compile-time error.
pub struct FlaggedPointer<P: PointerLike, const FLAG_BIT: u32> {
    word: usize,
    _marker: PhantomData<P>,
}

impl<P: PointerLike, const FLAG_BIT: u32> FlaggedPointer<P, FLAG_BIT> {
    const FLAG_MASK: usize = 1 << FLAG_BIT;

    /// Pack a handle and a flag.
    #[inline]
    pub fn new(pointer: P, flag: bool) -> Self {
        const { assert!(FLAG_BIT < P::SPARE_LOW_BITS, "flag bit outside spare range") }
        let word = pointer.into_word();
        debug_assert!(word & Self::FLAG_MASK == 0, "handle word set the flag bit");
        FlaggedPointer {
            word: word | if flag { Self::FLAG_MASK } else { 0 },
            _marker: PhantomData,
        }
    }

    /// Extract the handle.
    #[inline]
    pub fn pointer(self) -> P {
        P::from_word(self.word & !Self::FLAG_MASK)
    }

    /// Extract the flag.
    #[inline]
    pub fn flag(self) -> bool {
        self.word & Self::FLAG_MASK != 0
    }

    /// Replace the handle, keeping the flag.
    #[inline]
    pub fn set_pointer(&mut self, pointer: P) {
        *self = Self::new(pointer, self.flag());
    }

    /// Replace the flag, keeping the handle.
    #[inline]
    pub fn set_flag(&mut self, flag: bool) {
        if flag {
            self.word |= Self::FLAG_MASK;
        } else {
            self.word &= !Self::FLAG_MASK;
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
        FlaggedPointer {
            word,
            _marker: PhantomData,
        }
    }
}

impl<P: PointerLike, const FLAG_BIT: u32> Copy for FlaggedPointer<P, FLAG_BIT> {}

impl<P: PointerLike, const FLAG_BIT: u32> Clone for FlaggedPointer<P, FLAG_BIT> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: PointerLike, const FLAG_BIT: u32> PartialEq for FlaggedPointer<P, FLAG_BIT> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl<P: PointerLike, const FLAG_BIT: u32> Eq for FlaggedPointer<P, FLAG_BIT> {}

impl<P: PointerLike, const FLAG_BIT: u32> PartialOrd for FlaggedPointer<P, FLAG_BIT> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: PointerLike, const FLAG_BIT: u32> Ord for FlaggedPointer<P, FLAG_BIT> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(&other.word)
    }
}

impl<P: PointerLike, const FLAG_BIT: u32> Hash for FlaggedPointer<P, FLAG_BIT> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl<P: PointerLike, const FLAG_BIT: u32> fmt::Debug for FlaggedPointer<P, FLAG_BIT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FlaggedPointer({:?}, flag={})",
            self.pointer(),
            self.flag()
        )
    }
}

//! An integer disguised as a pointer-like value.

use std::fmt;

use crate::pointer_like::{low_bit_mask, PointerLike};

/// Error when a value does not fit in the embedded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedIntError {
    /// Value needs more than `bits` bits.
    Overflow {
        /// The rejected value.
        value: usize,
        /// Width of the embedded field.
        bits: u32,
    },
}

impl fmt::Display for EmbeddedIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddedIntError::Overflow { value, bits } => write!(
                f,
                "value {value} (0x{value:X}) does not fit in {bits} embedded bits"
            ),
        }
    }
}

impl std::error::Error for EmbeddedIntError {}

/// A `BITS`-wide unsigned integer packed where a handle would go.
///
/// The value sits in the *top* `BITS` bits of the word, leaving the low
/// `usize::BITS - BITS` bits spare. That lets an integer participate in
/// `PointerIntPair`, `PointerUnion`, and `PointerSumType` with a generous
/// spare-bit budget despite not referencing anything.
///
/// `BITS` must be in `1..=usize::BITS`; anything else is a compile-time
/// error.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct PointerEmbeddedInt<const BITS: u32> {
    word: usize,
}

impl<const BITS: u32> PointerEmbeddedInt<BITS> {
    const SHIFT: u32 = usize::BITS - BITS;
    const VALUE_MASK: usize = low_bit_mask(BITS);

    /// Embed a value, if it fits in `BITS` bits.
    #[inline]
    pub fn try_new(value: usize) -> Result<Self, EmbeddedIntError> {
        const { assert!(BITS >= 1 && BITS <= usize::BITS, "embedded width out of range") }
        if value > Self::VALUE_MASK {
            return Err(EmbeddedIntError::Overflow { value, bits: BITS });
        }
        Ok(PointerEmbeddedInt {
            word: value << Self::SHIFT,
        })
    }

    /// Embed a value.
    ///
    /// # Panics
    /// Panics if the value does not fit in `BITS` bits. Use `try_new` for
    /// the checked path.
    #[inline]
    pub fn new(value: usize) -> Self {
        match Self::try_new(value) {
            Ok(embedded) => embedded,
            Err(e) => panic!("{e}"),
        }
    }

    /// The embedded value.
    #[inline]
    pub fn value(self) -> usize {
        self.word >> Self::SHIFT
    }
}

impl<const BITS: u32> PointerLike for PointerEmbeddedInt<BITS> {
    const SPARE_LOW_BITS: u32 = usize::BITS - BITS;

    #[inline]
    fn into_word(self) -> usize {
        self.word
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        PointerEmbeddedInt { word }
    }
}

impl<const BITS: u32> fmt::Debug for PointerEmbeddedInt<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointerEmbeddedInt<{}>({})", BITS, self.value())
    }
}

//! Interned identifier handles and operator classification.

use std::fmt;
use std::hash::{Hash, Hasher};

use pola_ptr::{fx_hash_word, DenseKey, PointerLike};

use crate::interner::StringLookup;

/// Interned string identifier.
///
/// Layout: 32-bit index split into shard (4 bits) + local index (28 bits)
/// - Bits 31-28: shard index (0-15)
/// - Bits 27-0: local index within the shard
///
/// Two identifiers are equal iff their raw indices are equal; text is
/// never compared. The empty identifier is index 0, which also encodes as
/// the null packed word.
///
/// The interner caps local indices at [`Identifier::MAX_LOCAL`], so the
/// top raw values are never produced and stay free for the magic
/// base-name sentinels and the dense-map sentinel keys.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Identifier(u32);

impl Identifier {
    /// Pre-interned empty string.
    pub const EMPTY: Identifier = Identifier(0);

    /// Maximum local index per shard.
    ///
    /// Capped below the 28-bit limit so the top raw values stay reserved
    /// for sentinels.
    pub const MAX_LOCAL: u32 = 0x0FFF_FF00;

    /// Number of interner shards.
    pub const NUM_SHARDS: usize = 16;

    /// Create from shard and local index.
    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        Identifier((shard << 28) | local)
    }

    /// Create from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Identifier(raw)
    }

    /// Extract the shard index.
    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    /// Extract the local index.
    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & 0x0FFF_FFFF) as usize
    }

    /// The raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this is the empty identifier.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The identifier's text.
    #[inline]
    pub fn text<L: StringLookup + ?Sized>(self, lookup: &L) -> &str {
        lookup.lookup(self)
    }

    /// Whether the text names an operator, judged by its first code point.
    ///
    /// The empty identifier is not an operator.
    pub fn is_operator<L: StringLookup + ?Sized>(self, lookup: &L) -> bool {
        match self.text(lookup).chars().next() {
            Some(c) => is_operator_start_code_point(c),
            None => false,
        }
    }
}

impl Hash for Identifier {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier(shard={}, local={})", self.shard(), self.local())
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PointerLike for Identifier {
    const SPARE_LOW_BITS: u32 = 3;

    #[inline]
    fn into_word(self) -> usize {
        (self.0 as usize) << 3
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "encoded from u32")]
        let raw = (word >> 3) as u32;
        Identifier(raw)
    }
}

impl DenseKey for Identifier {
    #[inline]
    fn empty_key() -> Self {
        Identifier(u32::MAX)
    }

    #[inline]
    fn tombstone_key() -> Self {
        Identifier(u32::MAX - 1)
    }

    #[inline]
    fn hash_value(&self) -> u64 {
        fx_hash_word(self.0 as usize)
    }
}

/// Whether a code point can begin an operator identifier.
///
/// ASCII operator characters plus the fixed Unicode operator blocks
/// (punctuation, math/symbol, arrows, dingbats, box drawing, CJK symbol
/// subset). The exact ranges are a lexer compatibility contract.
pub const fn is_operator_start_code_point(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '*' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '.' | '?'
    ) || matches!(
        c as u32,
        0x00A1..=0x00A7
            | 0x00A9
            | 0x00AB
            | 0x00AC
            | 0x00AE
            | 0x00B0..=0x00B1
            | 0x00B6
            | 0x00BB
            | 0x00BF
            | 0x00D7
            | 0x00F7
            | 0x2016..=0x2017
            | 0x2020..=0x2027
            | 0x2030..=0x203E
            | 0x2041..=0x2053
            | 0x2055..=0x205E
            | 0x2190..=0x23FF
            | 0x2500..=0x2775
            | 0x2794..=0x2BFF
            | 0x2E00..=0x2E7F
            | 0x3001..=0x3003
            | 0x3008..=0x3030
    )
}

/// Whether a code point can continue an operator identifier.
///
/// Everything that can start one, plus combining characters and variation
/// selectors.
pub const fn is_operator_continuation_code_point(c: char) -> bool {
    is_operator_start_code_point(c)
        || matches!(
            c as u32,
            0x0300..=0x036F
                | 0x1DC0..=0x1DFF
                | 0x20D0..=0x20FF
                | 0xFE00..=0xFE0F
                | 0xFE20..=0xFE2F
                | 0xE0100..=0xE01EF
        )
}

// Size assertion: identifiers ride inside every name-carrying node.
mod size_asserts {
    use super::Identifier;
    pola_ptr::static_assert_size!(Identifier, 4);
}

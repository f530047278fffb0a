//! Generic parameter identity.
//!
//! A generic parameter is identified by its nesting depth and its index
//! within that depth, never by name. Substitution maps key on this pair.

use pola_ptr::{fx_hash_word, DenseKey};

/// Depth/index identity of a generic parameter.
///
/// Depth counts enclosing generic contexts from the outside in; index
/// counts parameters within one context left to right. The derived order
/// is depth-major, matching the order parameters are declared.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericParamKey {
    /// Nesting depth of the declaring generic context.
    pub depth: u16,
    /// Position within the declaring context.
    pub index: u16,
}

impl GenericParamKey {
    /// Key for the parameter at `depth.index`.
    #[inline]
    pub const fn new(depth: u16, index: u16) -> Self {
        GenericParamKey { depth, index }
    }

    /// Position of this key's parameter in a sequence sorted by key.
    ///
    /// Returns `None` when no element of the sequence has this key.
    pub fn find_index_in<T: GenericParamIndexed>(self, params: &[T]) -> Option<usize> {
        debug_assert!(
            params.windows(2).all(|w| w[0].param_key() < w[1].param_key()),
            "parameter sequence must be sorted by key"
        );
        params.binary_search_by_key(&self, GenericParamIndexed::param_key).ok()
    }
}

/// Sequence elements addressable by generic-parameter key.
pub trait GenericParamIndexed {
    /// The key of this element.
    fn param_key(&self) -> GenericParamKey;
}

impl GenericParamIndexed for GenericParamKey {
    #[inline]
    fn param_key(&self) -> GenericParamKey {
        *self
    }
}

impl DenseKey for GenericParamKey {
    #[inline]
    fn empty_key() -> Self {
        GenericParamKey::new(0xFFFF, 0xFFFF)
    }

    #[inline]
    fn tombstone_key() -> Self {
        GenericParamKey::new(0xFFFE, 0xFFFE)
    }

    #[inline]
    fn hash_value(&self) -> u64 {
        fx_hash_word((usize::from(self.depth) << 16) | usize::from(self.index))
    }
}

// Size assertions to prevent accidental regressions
mod size_asserts {
    use super::GenericParamKey;
    pola_ptr::static_assert_size!(GenericParamKey, 4);
}

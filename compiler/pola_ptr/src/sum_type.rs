//! N-way tagged union keyed by an explicit small-integer tag.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::pointer_like::{low_bit_mask, PointerLike};

/// Tag space of a `PointerSumType`.
///
/// Declares how many low bits the tag occupies and the minimum declared
/// tag index (the state `clear` resets to). Tag values need not be
/// contiguous, but each member's index must fit in `NUM_TAG_BITS` and
/// `NUM_TAG_BITS` must not exceed any member's spare bits; both are
/// enforced per member at compile time.
pub trait SumTag: Copy + Eq + fmt::Debug {
    /// Number of low bits the tag occupies.
    const NUM_TAG_BITS: u32;

    /// The minimum declared tag index.
    const MIN_INDEX: usize;

    /// Decode a tag from a masked index.
    ///
    /// Only indices actually stored by `create`/`set` reach this, so an
    /// implementation may panic on undeclared values.
    fn from_index(index: usize) -> Self;

    /// The tag's index.
    fn index(self) -> usize;
}

/// A member of a `PointerSumType` keyed by tag `T`.
pub trait SumMember<T: SumTag>: PointerLike {
    /// This member's tag index.
    const TAG_INDEX: usize;
}

/// Error from a failed `zero_tag_slot` access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SumTypeError {
    /// A non-zero tag was active when the zero-tag member was required.
    TagMismatch {
        /// Index of the tag that was actually active.
        active: usize,
    },
}

impl fmt::Display for SumTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumTypeError::TagMismatch { active } => write!(
                f,
                "zero-tag member required but tag {active} is active"
            ),
        }
    }
}

impl std::error::Error for SumTypeError {}

/// One word holding one of up to `2^NUM_TAG_BITS` members, discriminated
/// by an explicit tag in the low bits.
///
/// Unlike `PointerUnion`, the discriminant is a declared index rather than
/// a position in a nesting, so sparse tag assignments work.
///
/// When the minimum declared tag is zero, a zero-tag member's stored word
/// is bit-identical to the member's own encoding; `zero_tag_slot` exploits
/// that to hand out in-place access to the stored value.
pub struct PointerSumType<T: SumTag> {
    word: usize,
    _marker: PhantomData<T>,
}

impl<T: SumTag> PointerSumType<T> {
    const TAG_MASK: usize = low_bit_mask(T::NUM_TAG_BITS);

    /// Store `value` under its declared tag.
    #[inline]
    pub fn create<M: SumMember<T>>(value: M) -> Self {
        const {
            assert!(
                M::TAG_INDEX <= low_bit_mask(T::NUM_TAG_BITS),
                "member tag does not fit in the tag bits"
            );
            assert!(
                M::SPARE_LOW_BITS >= T::NUM_TAG_BITS,
                "member spare bits cannot hold the tag"
            );
        }
        let word = value.into_word();
        debug_assert!(word & Self::TAG_MASK == 0, "member word set tag bits");
        PointerSumType {
            word: word | M::TAG_INDEX,
            _marker: PhantomData,
        }
    }

    /// An empty sum: the minimum declared tag with a null member.
    #[inline]
    pub fn empty() -> Self {
        PointerSumType {
            word: T::MIN_INDEX,
            _marker: PhantomData,
        }
    }

    /// Replace the stored member.
    #[inline]
    pub fn set<M: SumMember<T>>(&mut self, value: M) {
        *self = Self::create(value);
    }

    /// Reset to the minimum declared tag with a null member.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::empty();
    }

    /// The active tag.
    #[inline]
    pub fn tag(self) -> T {
        T::from_index(self.word & Self::TAG_MASK)
    }

    /// The stored member, if `M`'s tag is active.
    #[inline]
    pub fn get<M: SumMember<T>>(self) -> Option<M> {
        (self.word & Self::TAG_MASK == M::TAG_INDEX)
            .then(|| M::from_word(self.word & !Self::TAG_MASK))
    }

    /// The stored member.
    ///
    /// # Panics
    /// Panics if `M`'s tag is not active. Use `get` for the checked path.
    #[inline]
    pub fn cast<M: SumMember<T>>(self) -> M {
        match self.get::<M>() {
            Some(value) => value,
            None => panic!(
                "sum member access: tag {} active, {} required",
                self.word & Self::TAG_MASK,
                M::TAG_INDEX
            ),
        }
    }

    /// In-place access to the zero-tag member.
    ///
    /// Zero-tag storage is bit-identical to the member's own encoding, so
    /// the slot reads and writes the stored word directly. Fails with
    /// `SumTypeError::TagMismatch` when another tag is active. Requiring a
    /// non-zero-tag member here is a compile-time error.
    #[inline]
    pub fn zero_tag_slot<M: SumMember<T>>(
        &mut self,
    ) -> Result<ZeroTagSlot<'_, T, M>, SumTypeError> {
        const {
            assert!(M::TAG_INDEX == 0, "zero_tag_slot requires the zero-tag member");
        }
        let active = self.word & Self::TAG_MASK;
        if active == 0 {
            Ok(ZeroTagSlot {
                storage: self,
                _marker: PhantomData,
            })
        } else {
            Err(SumTypeError::TagMismatch { active })
        }
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.word
    }
}

impl<T: SumTag> Default for PointerSumType<T> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: SumTag> Copy for PointerSumType<T> {}

impl<T: SumTag> Clone for PointerSumType<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SumTag> PartialEq for PointerSumType<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl<T: SumTag> Eq for PointerSumType<T> {}

impl<T: SumTag> Hash for PointerSumType<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl<T: SumTag> fmt::Debug for PointerSumType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointerSumType(tag={:?}, word={:#x})", self.tag(), self.word)
    }
}

/// In-place accessor for a sum's zero-tag member.
pub struct ZeroTagSlot<'a, T: SumTag, M: SumMember<T>> {
    storage: &'a mut PointerSumType<T>,
    _marker: PhantomData<M>,
}

impl<T: SumTag, M: SumMember<T>> ZeroTagSlot<'_, T, M> {
    /// Read the stored member. Bit-identical to the raw word.
    #[inline]
    pub fn get(&self) -> M {
        M::from_word(self.storage.word)
    }

    /// Overwrite the stored member, keeping tag zero.
    #[inline]
    pub fn set(&mut self, value: M) {
        let word = value.into_word();
        debug_assert!(
            word & PointerSumType::<T>::TAG_MASK == 0,
            "member word set tag bits"
        );
        self.storage.word = word;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    struct Exprish(u32);

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    struct Stmtish(u32);

    macro_rules! impl_test_ref {
        ($ty:ident) => {
            impl PointerLike for $ty {
                const SPARE_LOW_BITS: u32 = 3;

                fn into_word(self) -> usize {
                    (self.0 as usize) << 3
                }

                fn from_word(word: usize) -> Self {
                    #[expect(clippy::cast_possible_truncation, reason = "encoded from u32")]
                    let raw = (word >> 3) as u32;
                    $ty(raw)
                }
            }
        };
    }

    impl_test_ref!(Exprish);
    impl_test_ref!(Stmtish);

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    enum NodeTag {
        Expr,
        Stmt,
    }

    impl SumTag for NodeTag {
        const NUM_TAG_BITS: u32 = 2;
        const MIN_INDEX: usize = 0;

        fn from_index(index: usize) -> Self {
            match index {
                0 => NodeTag::Expr,
                2 => NodeTag::Stmt,
                _ => panic!("undeclared tag index {index}"),
            }
        }

        fn index(self) -> usize {
            match self {
                NodeTag::Expr => 0,
                NodeTag::Stmt => 2,
            }
        }
    }

    impl SumMember<NodeTag> for Exprish {
        const TAG_INDEX: usize = 0;
    }

    impl SumMember<NodeTag> for Stmtish {
        const TAG_INDEX: usize = 2;
    }

    type Sum = PointerSumType<NodeTag>;

    #[test]
    fn test_create_and_get() {
        let sum = Sum::create(Stmtish(12));
        assert_eq!(sum.tag(), NodeTag::Stmt);
        assert_eq!(sum.get::<Stmtish>(), Some(Stmtish(12)));
        assert_eq!(sum.get::<Exprish>(), None);
        assert_eq!(sum.cast::<Stmtish>(), Stmtish(12));
    }

    #[test]
    #[should_panic(expected = "sum member access")]
    fn test_cast_wrong_member_panics() {
        let sum = Sum::create(Stmtish(12));
        let _ = sum.cast::<Exprish>();
    }

    #[test]
    fn test_sparse_tags_round_trip() {
        // Tag 2 with tag 1 undeclared: the discriminant is the declared
        // index, not a member position.
        let sum = Sum::create(Stmtish(3));
        assert_eq!(sum.opaque_value() & 0b11, 2);
    }

    #[test]
    fn test_clear_resets_to_min_tag() {
        let mut sum = Sum::create(Stmtish(5));
        sum.clear();
        assert_eq!(sum.tag(), NodeTag::Expr);
        assert_eq!(sum.get::<Exprish>(), Some(Exprish(0)));
        assert_eq!(sum, Sum::empty());
    }

    #[test]
    fn test_zero_tag_is_bit_identical() {
        let value = Exprish(41);
        let sum = Sum::create(value);
        assert_eq!(sum.opaque_value(), value.into_word());
    }

    #[test]
    fn test_zero_tag_slot_aliases_storage() {
        let mut sum = Sum::create(Exprish(8));
        {
            let Ok(mut slot) = sum.zero_tag_slot::<Exprish>() else {
                panic!("zero tag should be active");
            };
            assert_eq!(slot.get(), Exprish(8));
            slot.set(Exprish(9));
        }
        assert_eq!(sum.get::<Exprish>(), Some(Exprish(9)));
    }

    #[test]
    fn test_zero_tag_slot_rejects_other_tags() {
        let mut sum = Sum::create(Stmtish(1));
        let result = sum.zero_tag_slot::<Exprish>();
        assert_eq!(result.err(), Some(SumTypeError::TagMismatch { active: 2 }));
    }

    #[test]
    fn test_set_replaces_member() {
        let mut sum = Sum::create(Exprish(1));
        sum.set(Stmtish(2));
        assert_eq!(sum.tag(), NodeTag::Stmt);
        assert_eq!(sum.get::<Stmtish>(), Some(Stmtish(2)));
    }

    #[test]
    fn test_error_display() {
        let err = SumTypeError::TagMismatch { active: 3 };
        assert!(format!("{err}").contains("tag 3"));
    }
}

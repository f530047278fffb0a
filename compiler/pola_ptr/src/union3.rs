//! Three-way tagged union built from nested two-way unions.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::pointer_like::PointerLike;
use crate::union2::PointerUnion;

/// A word holding one of three members.
///
/// Physically `PointerUnion<A, PointerUnion<B, C>>`: the inner union's tag
/// sits one bit above the outer's, so the two discriminants never collide.
/// The accessors resolve the nesting, presenting a flat three-way view.
pub struct PointerUnion3<A: PointerLike, B: PointerLike, C: PointerLike> {
    inner: PointerUnion<A, PointerUnion<B, C>>,
}

impl<A: PointerLike, B: PointerLike, C: PointerLike> PointerUnion3<A, B, C> {
    /// Store an `A`.
    #[inline]
    pub fn from_first(value: A) -> Self {
        PointerUnion3 {
            inner: PointerUnion::from_first(value),
        }
    }

    /// Store a `B`.
    #[inline]
    pub fn from_second(value: B) -> Self {
        PointerUnion3 {
            inner: PointerUnion::from_second(PointerUnion::from_first(value)),
        }
    }

    /// Store a `C`.
    #[inline]
    pub fn from_third(value: C) -> Self {
        PointerUnion3 {
            inner: PointerUnion::from_second(PointerUnion::from_second(value)),
        }
    }

    /// Whether the first member is active.
    #[inline]
    pub fn is_first(self) -> bool {
        self.inner.is_first()
    }

    /// Whether the second member is active.
    #[inline]
    pub fn is_second(self) -> bool {
        matches!(self.inner.try_second(), Some(nested) if nested.is_first())
    }

    /// Whether the third member is active.
    #[inline]
    pub fn is_third(self) -> bool {
        matches!(self.inner.try_second(), Some(nested) if nested.is_second())
    }

    /// The first member, if active.
    #[inline]
    pub fn try_first(self) -> Option<A> {
        self.inner.try_first()
    }

    /// The second member, if active.
    #[inline]
    pub fn try_second(self) -> Option<B> {
        self.inner.try_second().and_then(PointerUnion::try_first)
    }

    /// The third member, if active.
    #[inline]
    pub fn try_third(self) -> Option<C> {
        self.inner.try_second().and_then(PointerUnion::try_second)
    }

    /// Whether the active member decodes to null.
    #[inline]
    pub fn is_active_null(self) -> bool {
        self.inner.is_active_null()
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.inner.opaque_value()
    }

    /// Rebuild from a word previously produced by `opaque_value`.
    #[inline]
    pub fn from_opaque_value(word: usize) -> Self {
        PointerUnion3 {
            inner: PointerUnion::from_opaque_value(word),
        }
    }
}

impl<A: PointerLike, B: PointerLike, C: PointerLike> PointerLike for PointerUnion3<A, B, C> {
    const SPARE_LOW_BITS: u32 = <PointerUnion<A, PointerUnion<B, C>>>::SPARE_LOW_BITS;

    #[inline]
    fn into_word(self) -> usize {
        self.inner.into_word()
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        Self::from_opaque_value(word)
    }

    #[inline]
    fn is_null(self) -> bool {
        self.inner.is_null()
    }
}

impl<A: PointerLike, B: PointerLike, C: PointerLike> Copy for PointerUnion3<A, B, C> {}

impl<A: PointerLike, B: PointerLike, C: PointerLike> Clone for PointerUnion3<A, B, C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: PointerLike, B: PointerLike, C: PointerLike> PartialEq for PointerUnion3<A, B, C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.opaque_value() == other.inner.opaque_value()
    }
}

impl<A: PointerLike, B: PointerLike, C: PointerLike> Eq for PointerUnion3<A, B, C> {}

impl<A: PointerLike, B: PointerLike, C: PointerLike> Hash for PointerUnion3<A, B, C> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.opaque_value().hash(state);
    }
}

impl<A: PointerLike, B: PointerLike, C: PointerLike> fmt::Debug for PointerUnion3<A, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.try_first() {
            write!(f, "PointerUnion3(first: {first:?})")
        } else if let Some(second) = self.try_second() {
            write!(f, "PointerUnion3(second: {second:?})")
        } else if let Some(third) = self.try_third() {
            write!(f, "PointerUnion3(third: {third:?})")
        } else {
            write!(f, "PointerUnion3({:#x})", self.opaque_value())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    struct RefA(u32);

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    struct RefB(u32);

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    struct RefC(u32);

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

    impl_test_ref!(RefA);
    impl_test_ref!(RefB);
    impl_test_ref!(RefC);

    type Union = PointerUnion3<RefA, RefB, RefC>;

    #[test]
    fn test_exactly_one_member_active() {
        let u = Union::from_second(RefB(7));
        assert!(!u.is_first());
        assert!(u.is_second());
        assert!(!u.is_third());
        assert_eq!(u.try_first(), None);
        assert_eq!(u.try_second(), Some(RefB(7)));
        assert_eq!(u.try_third(), None);
    }

    #[test]
    fn test_all_three_members_round_trip() {
        assert_eq!(Union::from_first(RefA(1)).try_first(), Some(RefA(1)));
        assert_eq!(Union::from_second(RefB(2)).try_second(), Some(RefB(2)));
        assert_eq!(Union::from_third(RefC(3)).try_third(), Some(RefC(3)));
    }

    #[test]
    fn test_opaque_round_trip_keeps_tag_and_value() {
        let u = Union::from_third(RefC(44));
        let back = Union::from_opaque_value(u.opaque_value());
        assert!(back.is_third());
        assert_eq!(back.try_third(), Some(RefC(44)));
    }

    #[test]
    fn test_discriminants_are_disjoint() {
        // 3 spare bits each: inner tag at bit 2, outer tag at bit 1.
        let a = Union::from_first(RefA(0)).opaque_value();
        let b = Union::from_second(RefB(0)).opaque_value();
        let c = Union::from_third(RefC(0)).opaque_value();
        assert_eq!(a, 0b000);
        assert_eq!(b, 0b010);
        assert_eq!(c, 0b110);
    }

    #[test]
    fn test_null_tracking() {
        assert!(Union::from_first(RefA(0)).is_active_null());
        assert!(!Union::from_second(RefB(9)).is_active_null());
    }

    #[test]
    fn test_memory_size() {
        assert_eq!(std::mem::size_of::<Union>(), std::mem::size_of::<usize>());
    }
}

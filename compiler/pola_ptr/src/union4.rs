//! Four-way tagged union built from nested two-way unions.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::pointer_like::PointerLike;
use crate::union2::PointerUnion;

/// A word holding one of four members.
///
/// Physically `PointerUnion<PointerUnion<A, B>, PointerUnion<C, D>>`: the
/// outer tag picks a pair, the inner tag picks within it, and the
/// top-of-spare-range placement keeps the two bits disjoint.
pub struct PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
    inner: PointerUnion<PointerUnion<A, B>, PointerUnion<C, D>>,
}

impl<A, B, C, D> PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
    /// Store an `A`.
    #[inline]
    pub fn from_first(value: A) -> Self {
        PointerUnion4 {
            inner: PointerUnion::from_first(PointerUnion::from_first(value)),
        }
    }

    /// Store a `B`.
    #[inline]
    pub fn from_second(value: B) -> Self {
        PointerUnion4 {
            inner: PointerUnion::from_first(PointerUnion::from_second(value)),
        }
    }

    /// Store a `C`.
    #[inline]
    pub fn from_third(value: C) -> Self {
        PointerUnion4 {
            inner: PointerUnion::from_second(PointerUnion::from_first(value)),
        }
    }

    /// Store a `D`.
    #[inline]
    pub fn from_fourth(value: D) -> Self {
        PointerUnion4 {
            inner: PointerUnion::from_second(PointerUnion::from_second(value)),
        }
    }

    /// Whether the first member is active.
    #[inline]
    pub fn is_first(self) -> bool {
        matches!(self.inner.try_first(), Some(pair) if pair.is_first())
    }

    /// Whether the second member is active.
    #[inline]
    pub fn is_second(self) -> bool {
        matches!(self.inner.try_first(), Some(pair) if pair.is_second())
    }

    /// Whether the third member is active.
    #[inline]
    pub fn is_third(self) -> bool {
        matches!(self.inner.try_second(), Some(pair) if pair.is_first())
    }

    /// Whether the fourth member is active.
    #[inline]
    pub fn is_fourth(self) -> bool {
        matches!(self.inner.try_second(), Some(pair) if pair.is_second())
    }

    /// The first member, if active.
    #[inline]
    pub fn try_first(self) -> Option<A> {
        self.inner.try_first().and_then(PointerUnion::try_first)
    }

    /// The second member, if active.
    #[inline]
    pub fn try_second(self) -> Option<B> {
        self.inner.try_first().and_then(PointerUnion::try_second)
    }

    /// The third member, if active.
    #[inline]
    pub fn try_third(self) -> Option<C> {
        self.inner.try_second().and_then(PointerUnion::try_first)
    }

    /// The fourth member, if active.
    #[inline]
    pub fn try_fourth(self) -> Option<D> {
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
        PointerUnion4 {
            inner: PointerUnion::from_opaque_value(word),
        }
    }
}

impl<A, B, C, D> PointerLike for PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
    const SPARE_LOW_BITS: u32 =
        <PointerUnion<PointerUnion<A, B>, PointerUnion<C, D>>>::SPARE_LOW_BITS;

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

impl<A, B, C, D> Copy for PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
}

impl<A, B, C, D> Clone for PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B, C, D> PartialEq for PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner.opaque_value() == other.inner.opaque_value()
    }
}

impl<A, B, C, D> Eq for PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
}

impl<A, B, C, D> Hash for PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.opaque_value().hash(state);
    }
}

impl<A, B, C, D> fmt::Debug for PointerUnion4<A, B, C, D>
where
    A: PointerLike,
    B: PointerLike,
    C: PointerLike,
    D: PointerLike,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.try_first() {
            write!(f, "PointerUnion4(first: {first:?})")
        } else if let Some(second) = self.try_second() {
            write!(f, "PointerUnion4(second: {second:?})")
        } else if let Some(third) = self.try_third() {
            write!(f, "PointerUnion4(third: {third:?})")
        } else if let Some(fourth) = self.try_fourth() {
            write!(f, "PointerUnion4(fourth: {fourth:?})")
        } else {
            write!(f, "PointerUnion4({:#x})", self.opaque_value())
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

    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    struct RefD(u32);

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
    impl_test_ref!(RefD);

    type Union = PointerUnion4<RefA, RefB, RefC, RefD>;

    #[test]
    fn test_all_four_members_round_trip() {
        assert_eq!(Union::from_first(RefA(1)).try_first(), Some(RefA(1)));
        assert_eq!(Union::from_second(RefB(2)).try_second(), Some(RefB(2)));
        assert_eq!(Union::from_third(RefC(3)).try_third(), Some(RefC(3)));
        assert_eq!(Union::from_fourth(RefD(4)).try_fourth(), Some(RefD(4)));
    }

    #[test]
    fn test_exactly_one_member_active() {
        let u = Union::from_fourth(RefD(9));
        assert!(!u.is_first());
        assert!(!u.is_second());
        assert!(!u.is_third());
        assert!(u.is_fourth());
        assert_eq!(u.try_first(), None);
        assert_eq!(u.try_second(), None);
        assert_eq!(u.try_third(), None);
    }

    #[test]
    fn test_discriminants_are_disjoint() {
        // Inner pairs tag at bit 2, outer union tag at bit 1.
        let words: Vec<usize> = [
            Union::from_first(RefA(0)),
            Union::from_second(RefB(0)),
            Union::from_third(RefC(0)),
            Union::from_fourth(RefD(0)),
        ]
        .iter()
        .map(|u| u.opaque_value())
        .collect();
        assert_eq!(words, vec![0b000, 0b100, 0b010, 0b110]);
    }

    #[test]
    fn test_opaque_round_trip() {
        let u = Union::from_third(RefC(77));
        let back = Union::from_opaque_value(u.opaque_value());
        assert!(back.is_third());
        assert_eq!(back.try_third(), Some(RefC(77)));
    }

    #[test]
    fn test_memory_size() {
        assert_eq!(std::mem::size_of::<Union>(), std::mem::size_of::<usize>());
    }
}

//! Property-based tests for the word-packing primitives.
//!
//! These use proptest to drive the packers with arbitrary handle indices
//! and payload integers, verifying:
//! 1. Round-trip: decode(encode(x)) == x for every packer
//! 2. Field independence: writing one packed field never disturbs another
//! 3. Opaque-word round-trips preserve both tag and value

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pola_ptr::{
    PointerEmbeddedInt, PointerIntEnum, PointerIntPair, PointerLike, PointerUnion,
};
use proptest::prelude::*;

/// Arena-handle stand-in with 3 declared spare bits, the encoding every
/// compiler handle type uses.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Handle(u32);

impl PointerLike for Handle {
    const SPARE_LOW_BITS: u32 = 3;

    fn into_word(self) -> usize {
        (self.0 as usize) << 3
    }

    fn from_word(word: usize) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "encoded from u32")]
        let raw = (word >> 3) as u32;
        Handle(raw)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct OtherHandle(u32);

impl PointerLike for OtherHandle {
    const SPARE_LOW_BITS: u32 = 3;

    fn into_word(self) -> usize {
        (self.0 as usize) << 3
    }

    fn from_word(word: usize) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "encoded from u32")]
        let raw = (word >> 3) as u32;
        OtherHandle(raw)
    }
}

proptest! {
    #[test]
    fn handle_words_round_trip(raw in any::<u32>()) {
        let handle = Handle(raw);
        prop_assert_eq!(Handle::from_word(handle.into_word()), handle);
        // The declared spare bits really are zero.
        prop_assert_eq!(handle.into_word() & 0b111, 0);
    }

    #[test]
    fn int_pair_extracts_both_fields(raw in any::<u32>(), int in 0usize..8) {
        let pair: PointerIntPair<Handle, 3> = PointerIntPair::new(Handle(raw), int);
        prop_assert_eq!(pair.pointer(), Handle(raw));
        prop_assert_eq!(pair.int(), int);
    }

    #[test]
    fn int_pair_set_int_keeps_pointer(raw in any::<u32>(), a in 0usize..4, b in 0usize..4) {
        let mut pair: PointerIntPair<Handle, 2> = PointerIntPair::new(Handle(raw), a);
        pair.set_int(b);
        prop_assert_eq!(pair.pointer(), Handle(raw));
        prop_assert_eq!(pair.int(), b);
    }

    #[test]
    fn int_pair_opaque_round_trip(raw in any::<u32>(), int in 0usize..8) {
        let pair: PointerIntPair<Handle, 3> = PointerIntPair::new(Handle(raw), int);
        let back: PointerIntPair<Handle, 3> =
            PointerIntPair::from_opaque_value(pair.opaque_value());
        prop_assert_eq!(back, pair);
    }

    #[test]
    fn union_keeps_tag_and_value(raw in any::<u32>(), second in any::<bool>()) {
        type Union = PointerUnion<Handle, OtherHandle>;
        let u = if second {
            Union::from_second(OtherHandle(raw))
        } else {
            Union::from_first(Handle(raw))
        };
        prop_assert_eq!(u.is_second(), second);
        if second {
            prop_assert_eq!(u.try_second(), Some(OtherHandle(raw)));
            prop_assert_eq!(u.try_first(), None);
        } else {
            prop_assert_eq!(u.try_first(), Some(Handle(raw)));
            prop_assert_eq!(u.try_second(), None);
        }
        let back = Union::from_opaque_value(u.opaque_value());
        prop_assert_eq!(back, u);
    }

    #[test]
    fn embedded_int_round_trips(value in 0usize..(1 << 20)) {
        let embedded = PointerEmbeddedInt::<20>::try_new(value);
        prop_assert!(embedded.is_ok());
        let Ok(embedded) = embedded else { unreachable!() };
        prop_assert_eq!(embedded.value(), value);
        prop_assert_eq!(
            PointerEmbeddedInt::<20>::from_word(embedded.into_word()),
            embedded
        );
    }

    #[test]
    fn int_enum_index_cases_round_trip(kind in 1usize..8, index in 0usize..(1 << 40)) {
        let e: PointerIntEnum<Handle, 3> = PointerIntEnum::from_index(kind, index);
        prop_assert!(e.is_valid());
        prop_assert_eq!(e.kind(), kind);
        prop_assert_eq!(e.index(), Some(index));
    }

    #[test]
    fn int_enum_pointer_case_is_bit_identical(raw in any::<u32>()) {
        let e: PointerIntEnum<Handle, 3> = PointerIntEnum::from_pointer(Handle(raw));
        prop_assert_eq!(e.opaque_value(), Handle(raw).into_word());
        prop_assert_eq!(e.pointer(), Some(Handle(raw)));
    }
}

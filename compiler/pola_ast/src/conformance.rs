//! Interface conformance references.
//!
//! A conformance reference answers "how does this type satisfy that
//! interface" in one word: either a concrete, resolved conformance
//! record, or just the interface itself when the conforming type is
//! abstract (a generic parameter or existential).

use std::fmt;

use pola_ptr::{fx_hash_word, DenseKey, PointerLike, PointerUnion, EMPTY_WORD, TOMBSTONE_WORD};

use crate::node_ref::{ConformanceRef, InterfaceDeclRef};

/// Resolves conformance records back to the interface they implement.
pub trait ConformanceLookup {
    /// The interface a concrete conformance record implements.
    fn interface_of(&self, conformance: ConformanceRef) -> InterfaceDeclRef;
}

/// Abstract-or-concrete reference to an interface conformance.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceConformanceRef {
    inner: PointerUnion<InterfaceDeclRef, ConformanceRef>,
}

impl InterfaceConformanceRef {
    /// Reference a conformance to `interface`.
    ///
    /// With a resolved record the reference is concrete; without one it
    /// stays abstract and remembers only the interface.
    #[inline]
    pub fn new(interface: InterfaceDeclRef, conformance: Option<ConformanceRef>) -> Self {
        match conformance {
            Some(concrete) => InterfaceConformanceRef {
                inner: PointerUnion::from_second(concrete),
            },
            None => InterfaceConformanceRef {
                inner: PointerUnion::from_first(interface),
            },
        }
    }

    /// The invalid reference.
    #[inline]
    pub fn invalid() -> Self {
        InterfaceConformanceRef {
            inner: PointerUnion::from_first(InterfaceDeclRef::INVALID),
        }
    }

    /// Whether this reference is invalid.
    #[inline]
    pub fn is_invalid(self) -> bool {
        self.inner.is_null()
    }

    /// Whether this is an abstract reference (interface only).
    #[inline]
    pub fn is_abstract(self) -> bool {
        self.inner.is_first() && !self.is_invalid()
    }

    /// Whether this is a concrete, resolved conformance.
    #[inline]
    pub fn is_concrete(self) -> bool {
        self.inner.is_second() && !self.is_invalid()
    }

    /// The interface of an abstract reference.
    #[inline]
    pub fn abstract_interface(self) -> Option<InterfaceDeclRef> {
        if self.is_abstract() {
            self.inner.try_first()
        } else {
            None
        }
    }

    /// The record of a concrete reference.
    #[inline]
    pub fn concrete(self) -> Option<ConformanceRef> {
        if self.is_concrete() {
            self.inner.try_second()
        } else {
            None
        }
    }

    /// The interface this reference conforms to, resolving concrete
    /// records through the lookup. `None` for the invalid reference.
    pub fn interface_decl<L: ConformanceLookup + ?Sized>(
        self,
        lookup: &L,
    ) -> Option<InterfaceDeclRef> {
        if let Some(interface) = self.abstract_interface() {
            Some(interface)
        } else {
            self.concrete().map(|record| lookup.interface_of(record))
        }
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.inner.opaque_value()
    }

    /// Rebuild from a word previously produced by `opaque_value`.
    #[inline]
    pub fn from_opaque_value(word: usize) -> Self {
        InterfaceConformanceRef {
            inner: PointerUnion::from_opaque_value(word),
        }
    }
}

impl Default for InterfaceConformanceRef {
    fn default() -> Self {
        Self::invalid()
    }
}

impl fmt::Debug for InterfaceConformanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "InterfaceConformanceRef::invalid")
        } else if let Some(interface) = self.abstract_interface() {
            write!(f, "InterfaceConformanceRef(abstract {interface:?})")
        } else {
            write!(f, "InterfaceConformanceRef(concrete {:?})", self.inner.second())
        }
    }
}

impl DenseKey for InterfaceConformanceRef {
    #[inline]
    fn empty_key() -> Self {
        Self::from_opaque_value(EMPTY_WORD)
    }

    #[inline]
    fn tombstone_key() -> Self {
        Self::from_opaque_value(TOMBSTONE_WORD)
    }

    #[inline]
    fn hash_value(&self) -> u64 {
        fx_hash_word(self.opaque_value())
    }
}

// Size assertions to prevent accidental regressions
mod size_asserts {
    use super::InterfaceConformanceRef;
    pola_ptr::static_assert_size!(InterfaceConformanceRef, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockConformances;

    impl ConformanceLookup for MockConformances {
        fn interface_of(&self, conformance: ConformanceRef) -> InterfaceDeclRef {
            InterfaceDeclRef::new(conformance.raw() + 100)
        }
    }

    #[test]
    fn test_abstract_construction() {
        let interface = InterfaceDeclRef::new(7);
        let conf = InterfaceConformanceRef::new(interface, None);
        assert!(conf.is_abstract());
        assert!(!conf.is_concrete());
        assert!(!conf.is_invalid());
        assert_eq!(conf.abstract_interface(), Some(interface));
        assert_eq!(conf.concrete(), None);
    }

    #[test]
    fn test_concrete_construction() {
        let interface = InterfaceDeclRef::new(7);
        let record = ConformanceRef::new(3);
        let conf = InterfaceConformanceRef::new(interface, Some(record));
        assert!(conf.is_concrete());
        assert!(!conf.is_abstract());
        assert_eq!(conf.concrete(), Some(record));
        assert_eq!(conf.abstract_interface(), None);
    }

    #[test]
    fn test_invalid() {
        let invalid = InterfaceConformanceRef::invalid();
        assert!(invalid.is_invalid());
        assert!(!invalid.is_abstract());
        assert!(!invalid.is_concrete());
        assert_eq!(invalid.interface_decl(&MockConformances), None);
        assert_eq!(InterfaceConformanceRef::default(), invalid);
    }

    #[test]
    fn test_interface_decl_resolution() {
        let lookup = MockConformances;
        let interface = InterfaceDeclRef::new(7);

        let abstract_ref = InterfaceConformanceRef::new(interface, None);
        assert_eq!(abstract_ref.interface_decl(&lookup), Some(interface));

        let concrete = InterfaceConformanceRef::new(interface, Some(ConformanceRef::new(3)));
        assert_eq!(
            concrete.interface_decl(&lookup),
            Some(InterfaceDeclRef::new(103))
        );
    }

    #[test]
    fn test_abstract_and_concrete_words_differ() {
        let interface = InterfaceDeclRef::new(1);
        let a = InterfaceConformanceRef::new(interface, None);
        let c = InterfaceConformanceRef::new(interface, Some(ConformanceRef::new(1)));
        assert_ne!(a.opaque_value(), c.opaque_value());
        let round = InterfaceConformanceRef::from_opaque_value(c.opaque_value());
        assert_eq!(round, c);
    }

    #[test]
    fn test_dense_key_sentinels() {
        assert_ne!(
            InterfaceConformanceRef::empty_key(),
            InterfaceConformanceRef::tombstone_key()
        );
        assert_ne!(
            InterfaceConformanceRef::invalid(),
            InterfaceConformanceRef::empty_key()
        );
    }
}

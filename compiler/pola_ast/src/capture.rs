//! Closure capture records.

use std::fmt;

use bitflags::bitflags;
use pola_ptr::PointerIntPair;

use crate::node_ref::{DynamicSelfTypeRef, ValueDeclRef};

bitflags! {
    /// Properties of a single capture.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    pub struct CaptureFlags: u8 {
        /// Captured directly, not through another closure in between.
        const DIRECT = 1 << 0;
        /// The capture never escapes the capturing closure.
        const NO_ESCAPE = 1 << 1;
    }
}

/// One captured declaration plus its capture flags, in one word.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct CapturedValue {
    inner: PointerIntPair<ValueDeclRef, 2>,
}

impl CapturedValue {
    /// Record a capture of `decl` with the given flags.
    #[inline]
    pub fn new(decl: ValueDeclRef, flags: CaptureFlags) -> Self {
        CapturedValue {
            inner: PointerIntPair::new(decl, usize::from(flags.bits())),
        }
    }

    /// The captured declaration.
    #[inline]
    pub fn decl(self) -> ValueDeclRef {
        self.inner.pointer()
    }

    /// The capture flags.
    #[inline]
    pub fn flags(self) -> CaptureFlags {
        #[expect(clippy::cast_possible_truncation, reason = "2-bit field")]
        let bits = self.inner.int() as u8;
        CaptureFlags::from_bits_truncate(bits)
    }

    /// Whether the declaration is captured directly.
    #[inline]
    pub fn is_direct(self) -> bool {
        self.flags().contains(CaptureFlags::DIRECT)
    }

    /// Whether the capture never escapes.
    #[inline]
    pub fn is_no_escape(self) -> bool {
        self.flags().contains(CaptureFlags::NO_ESCAPE)
    }

    /// Combine two capture records of the same declaration.
    ///
    /// A merged capture is only direct or no-escape when both inputs
    /// are, so flags intersect.
    #[must_use]
    pub fn merge_flags(self, other: CapturedValue) -> CapturedValue {
        debug_assert_eq!(self.decl(), other.decl(), "merging captures of different decls");
        CapturedValue::new(self.decl(), self.flags() & other.flags())
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.inner.opaque_value()
    }
}

impl fmt::Debug for CapturedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapturedValue({:?}, {:?})", self.decl(), self.flags())
    }
}

/// The capture list of one closure or local function.
///
/// Borrows its capture slice from the arena that computed it.
#[derive(Copy, Clone, Debug)]
pub struct CaptureInfo<'a> {
    captures: &'a [CapturedValue],
    dynamic_self: Option<DynamicSelfTypeRef>,
    generic_param_captures: bool,
}

impl<'a> CaptureInfo<'a> {
    /// A capture list with the given contents.
    #[inline]
    pub fn new(
        captures: &'a [CapturedValue],
        dynamic_self: Option<DynamicSelfTypeRef>,
        generic_param_captures: bool,
    ) -> Self {
        CaptureInfo {
            captures,
            dynamic_self,
            generic_param_captures,
        }
    }

    /// The empty capture list.
    #[inline]
    pub const fn empty() -> Self {
        CaptureInfo {
            captures: &[],
            dynamic_self: None,
            generic_param_captures: false,
        }
    }

    /// Whether nothing at all is captured.
    #[inline]
    pub fn is_trivial(self) -> bool {
        self.captures.is_empty() && !self.generic_param_captures && self.dynamic_self.is_none()
    }

    /// The captured values.
    #[inline]
    pub fn captures(self) -> &'a [CapturedValue] {
        self.captures
    }

    /// Iterate over the captured values.
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = CapturedValue> + 'a {
        self.captures.iter().copied()
    }

    /// Whether the dynamic Self type is captured.
    #[inline]
    pub fn has_dynamic_self_capture(self) -> bool {
        self.dynamic_self.is_some()
    }

    /// The captured dynamic Self type, if any.
    #[inline]
    pub fn dynamic_self(self) -> Option<DynamicSelfTypeRef> {
        self.dynamic_self
    }

    /// Whether any generic parameter is captured.
    #[inline]
    pub fn has_generic_param_captures(self) -> bool {
        self.generic_param_captures
    }

    /// The capture record for a declaration, if it is captured.
    pub fn capture_for(self, decl: ValueDeclRef) -> Option<CapturedValue> {
        self.iter().find(|capture| capture.decl() == decl)
    }
}

impl Default for CaptureInfo<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

// Size assertions to prevent accidental regressions
mod size_asserts {
    use super::CapturedValue;
    pola_ptr::static_assert_size!(CapturedValue, 8);
}

//! Arena handles for externally-owned AST entities.
//!
//! Each handle is a `u32` index into an arena owned elsewhere (the parser
//! and semantic analysis allocate the nodes; this layer only references
//! them). Handles are word-packable with 3 declared spare bits: a valid
//! index `i` encodes as `(i + 1) << 3` and `INVALID` encodes as the null
//! word, so packed-null and invalid-handle coincide.

use pola_ptr::PointerLike;

macro_rules! node_ref {
    ($(#[doc = $doc:literal] $name:ident),+ $(,)?) => {
        $(
            #[doc = $doc]
            #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
            #[repr(transparent)]
            pub struct $name(u32);

            impl $name {
                /// Invalid handle (sentinel value).
                pub const INVALID: $name = $name(u32::MAX);

                /// Create a new handle from an arena index.
                #[inline]
                pub const fn new(index: u32) -> Self {
                    $name(index)
                }

                /// The index into the arena.
                #[inline]
                pub const fn index(self) -> usize {
                    self.0 as usize
                }

                /// The raw u32 value.
                #[inline]
                pub const fn raw(self) -> u32 {
                    self.0
                }

                /// Whether this is a valid handle.
                #[inline]
                pub const fn is_valid(self) -> bool {
                    self.0 != u32::MAX
                }
            }

            impl PointerLike for $name {
                const SPARE_LOW_BITS: u32 = 3;

                #[inline]
                fn into_word(self) -> usize {
                    if self.is_valid() {
                        ((self.0 as usize) + 1) << 3
                    } else {
                        0
                    }
                }

                #[inline]
                fn from_word(word: usize) -> Self {
                    if word == 0 {
                        return $name::INVALID;
                    }
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "encoded from u32 by into_word"
                    )]
                    let raw = ((word >> 3) - 1) as u32;
                    $name(raw)
                }
            }

            impl ::std::fmt::Debug for $name {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    if self.is_valid() {
                        write!(f, concat!(stringify!($name), "({})"), self.0)
                    } else {
                        write!(f, concat!(stringify!($name), "::INVALID"))
                    }
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::INVALID
                }
            }
        )+
    };
}

pub(crate) use node_ref;

node_ref! {
    /// Handle to an expression node.
    ExprRef,
    /// Handle to a statement node.
    StmtRef,
    /// Handle to a declaration node.
    DeclRef,
    /// Handle to a value declaration (var, param, function).
    ValueDeclRef,
    /// Handle to an interface declaration.
    InterfaceDeclRef,
    /// Handle to a resolved interface conformance record.
    ConformanceRef,
    /// Handle to a dynamic-Self type node.
    DynamicSelfTypeRef,
    /// Handle to a declaration context.
    DeclContextRef,
}

//! Declaration base names and full declaration names.
//!
//! A `DeclBaseName` is an identifier or one of the magic entry-point
//! names (subscript, constructor, destructor). A `DeclName` adds argument
//! labels: `foo`, `foo()`, `foo(x:y:)`. All of it stays one machine word.
//! Simple and zero-argument-compound names are encoded inline; names with
//! one or more labels point into the context's compound-name table.

use std::cmp::Ordering;
use std::fmt;

use pola_ptr::{
    fx_hash_word, DenseKey, PointerIntPair, PointerLike, PointerUnion, EMPTY_WORD, TOMBSTONE_WORD,
};
use smallvec::SmallVec;

use crate::context::AstContext;
use crate::ident::Identifier;
use crate::interner::StringLookup;
use crate::node_ref::node_ref;

// Magic base-name raws shift left by 3 when packed and must not wrap.
const _: () = assert!(usize::BITS >= 64, "packed names require 64-bit words");

/// What a base name refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclBaseNameKind {
    /// An ordinary interned identifier.
    Normal,
    /// The subscript entry point.
    Subscript,
    /// The constructor entry point.
    Constructor,
    /// The destructor entry point.
    Destructor,
}

/// The base of a declaration name: an identifier or a magic name.
///
/// Magic names live in the reserved raw band the interner never reaches,
/// so the wrapped `u32` alone distinguishes all four kinds.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct DeclBaseName(u32);

const SUBSCRIPT_RAW: u32 = 0xFFFF_FFFB;
const CONSTRUCTOR_RAW: u32 = 0xFFFF_FFFC;
const DESTRUCTOR_RAW: u32 = 0xFFFF_FFFD;

impl DeclBaseName {
    /// The empty identifier as a base name. Packs as the null word.
    pub const EMPTY: DeclBaseName = DeclBaseName(0);

    /// The magic subscript name.
    pub const SUBSCRIPT: DeclBaseName = DeclBaseName(SUBSCRIPT_RAW);

    /// The magic constructor name.
    pub const CONSTRUCTOR: DeclBaseName = DeclBaseName(CONSTRUCTOR_RAW);

    /// The magic destructor name.
    pub const DESTRUCTOR: DeclBaseName = DeclBaseName(DESTRUCTOR_RAW);

    /// Base name for an ordinary identifier.
    #[inline]
    pub const fn new(ident: Identifier) -> Self {
        DeclBaseName(ident.raw())
    }

    /// Which kind of base name this is.
    #[inline]
    pub const fn kind(self) -> DeclBaseNameKind {
        match self.0 {
            SUBSCRIPT_RAW => DeclBaseNameKind::Subscript,
            CONSTRUCTOR_RAW => DeclBaseNameKind::Constructor,
            DESTRUCTOR_RAW => DeclBaseNameKind::Destructor,
            _ => DeclBaseNameKind::Normal,
        }
    }

    /// The identifier, or `None` for a magic name.
    #[inline]
    pub const fn identifier(self) -> Option<Identifier> {
        match self.kind() {
            DeclBaseNameKind::Normal => Some(Identifier::from_raw(self.0)),
            _ => None,
        }
    }

    /// Whether this is one of the magic names.
    #[inline]
    pub const fn is_special(self) -> bool {
        !matches!(self.kind(), DeclBaseNameKind::Normal)
    }

    /// The text a user would write for this name.
    ///
    /// Magic names render as their keyword spellings.
    pub fn user_facing_text<L: StringLookup + ?Sized>(self, lookup: &L) -> &str {
        match self.kind() {
            DeclBaseNameKind::Normal => Identifier::from_raw(self.0).text(lookup),
            DeclBaseNameKind::Subscript => "subscript",
            DeclBaseNameKind::Constructor => "init",
            DeclBaseNameKind::Destructor => "deinit",
        }
    }

    /// Whether the name is an operator, judged by its first code point.
    /// Magic names never are.
    pub fn is_operator<L: StringLookup + ?Sized>(self, lookup: &L) -> bool {
        match self.identifier() {
            Some(ident) => ident.is_operator(lookup),
            None => false,
        }
    }
}

impl PointerLike for DeclBaseName {
    const SPARE_LOW_BITS: u32 = 3;

    #[inline]
    fn into_word(self) -> usize {
        (self.0 as usize) << 3
    }

    #[inline]
    fn from_word(word: usize) -> Self {
        #[expect(clippy::cast_possible_truncation, reason = "encoded from u32")]
        let raw = (word >> 3) as u32;
        DeclBaseName(raw)
    }
}

impl From<Identifier> for DeclBaseName {
    #[inline]
    fn from(ident: Identifier) -> Self {
        DeclBaseName::new(ident)
    }
}

impl fmt::Debug for DeclBaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            DeclBaseNameKind::Normal => {
                write!(f, "DeclBaseName({:?})", Identifier::from_raw(self.0))
            }
            kind => write!(f, "DeclBaseName::{kind:?}"),
        }
    }
}

node_ref! {
    /// Handle into the context's compound-name table.
    CompoundNameRef,
}

/// Interned record for a name with one or more argument labels.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CompoundNameData {
    /// The base the labels attach to.
    pub base: DeclBaseName,
    /// Argument labels, in declaration order. Empty labels are the empty
    /// identifier.
    pub labels: SmallVec<[Identifier; 4]>,
}

/// A full declaration name, one machine word.
///
/// Three shapes share the word:
/// - simple (`foo`): the base name inline, compound flag clear;
/// - zero-argument compound (`foo()`): the base name inline, compound
///   flag set, never heap-interned;
/// - labeled compound (`foo(x:y:)`): a handle into the context's
///   compound-name table.
///
/// Word equality is name equality: the context deduplicates labeled
/// compounds, so equal names always have equal words.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct DeclName {
    inner: PointerUnion<PointerIntPair<DeclBaseName, 1>, CompoundNameRef>,
}

const COMPOUND_FLAG: usize = 1;

impl DeclName {
    /// Simple name over an identifier.
    #[inline]
    pub fn simple(ident: Identifier) -> Self {
        Self::from_base(DeclBaseName::new(ident))
    }

    /// Simple name over a base name (identifier or magic).
    #[inline]
    pub fn from_base(base: DeclBaseName) -> Self {
        DeclName {
            inner: PointerUnion::from_first(PointerIntPair::from_pointer(base)),
        }
    }

    /// Zero-argument compound name, `base()`. Encoded inline.
    #[inline]
    pub fn zero_arg_compound(base: DeclBaseName) -> Self {
        DeclName {
            inner: PointerUnion::from_first(PointerIntPair::new(base, COMPOUND_FLAG)),
        }
    }

    /// Compound name backed by an interned record. Callers go through
    /// [`AstContext::compound_name`], which deduplicates.
    #[inline]
    pub(crate) fn from_compound_ref(compound: CompoundNameRef) -> Self {
        DeclName {
            inner: PointerUnion::from_second(compound),
        }
    }

    /// The empty name: a simple name over the empty identifier.
    #[inline]
    pub fn empty() -> Self {
        Self::from_base(DeclBaseName::EMPTY)
    }

    /// Whether this is the empty name.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.inner.opaque_value() == 0
    }

    /// Whether this is a bare base name with no argument-label list.
    #[inline]
    pub fn is_simple_name(self) -> bool {
        self.inner.try_first().is_some_and(|pair| pair.int() == 0)
    }

    /// Whether this name carries an argument-label list (possibly empty).
    #[inline]
    pub fn is_compound_name(self) -> bool {
        !self.is_simple_name()
    }

    /// The base name when it is stored inline, without touching the
    /// context. `None` for labeled compounds.
    #[inline]
    pub fn inline_base_name(self) -> Option<DeclBaseName> {
        self.inner.try_first().map(PointerIntPair::pointer)
    }

    /// The base name.
    pub fn base_name(self, context: &AstContext) -> DeclBaseName {
        match self.inner.try_first() {
            Some(pair) => pair.pointer(),
            None => context.compound_data(self.inner.second()).base,
        }
    }

    /// Whether the base is one of the magic names.
    pub fn is_special(self, context: &AstContext) -> bool {
        self.base_name(context).is_special()
    }

    /// The argument labels. Empty for simple and zero-argument names.
    pub fn argument_names(self, context: &AstContext) -> &[Identifier] {
        match self.inner.try_second() {
            Some(compound) => &context.compound_data(compound).labels,
            None => &[],
        }
    }

    /// Number of argument labels.
    pub fn arity(self, context: &AstContext) -> usize {
        self.argument_names(context).len()
    }

    /// Whether this name resolves a reference written as `other`.
    ///
    /// A compound name matches a simple reference when the base names
    /// agree; two compound names match only when identical.
    pub fn matches_ref(self, other: DeclName, context: &AstContext) -> bool {
        if other.is_simple_name() {
            self.base_name(context) == other.base_name(context)
        } else {
            self == other
        }
    }

    /// Total order for sorted output: by base-name kind, then base text,
    /// then argument labels. The empty name sorts last.
    pub fn compare(self, other: DeclName, context: &AstContext) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        let self_base = self.base_name(context);
        let other_base = other.base_name(context);
        self_base
            .kind()
            .cmp(&other_base.kind())
            .then_with(|| {
                self_base
                    .user_facing_text(context)
                    .cmp(other_base.user_facing_text(context))
            })
            .then_with(|| self.is_compound_name().cmp(&other.is_compound_name()))
            .then_with(|| {
                let self_labels = self.argument_names(context);
                let other_labels = other.argument_names(context);
                for (a, b) in self_labels.iter().zip(other_labels.iter()) {
                    let text_order = a.text(context).cmp(b.text(context));
                    if text_order != Ordering::Equal {
                        return text_order;
                    }
                }
                self_labels.len().cmp(&other_labels.len())
            })
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.inner.opaque_value()
    }

    /// Rebuild from a word previously produced by `opaque_value`.
    #[inline]
    pub fn from_opaque_value(word: usize) -> Self {
        DeclName {
            inner: PointerUnion::from_opaque_value(word),
        }
    }

    /// Render the name as a user would write it: `foo`, `foo()`,
    /// `foo(x:y:)`, with `_` for empty labels.
    pub fn display(self, context: &AstContext) -> impl fmt::Display + '_ {
        DeclNameDisplay {
            name: self,
            context,
        }
    }
}

impl Default for DeclName {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for DeclName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_first() {
            Some(pair) if pair.int() == 0 => {
                write!(f, "DeclName(simple {:?})", pair.pointer())
            }
            Some(pair) => write!(f, "DeclName(compound {:?}, no labels)", pair.pointer()),
            None => write!(f, "DeclName({:?})", self.inner.second()),
        }
    }
}

impl DenseKey for DeclName {
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

struct DeclNameDisplay<'c> {
    name: DeclName,
    context: &'c AstContext,
}

impl fmt::Display for DeclNameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.name.base_name(self.context);
        f.write_str(base.user_facing_text(self.context))?;
        if self.name.is_simple_name() {
            return Ok(());
        }
        f.write_str("(")?;
        for label in self.name.argument_names(self.context) {
            if label.is_empty() {
                f.write_str("_:")?;
            } else {
                write!(f, "{}:", label.text(self.context))?;
            }
        }
        f.write_str(")")
    }
}

// Size assertions to prevent accidental regressions
mod size_asserts {
    use super::{DeclBaseName, DeclName};
    pola_ptr::static_assert_size!(DeclBaseName, 4);
    pola_ptr::static_assert_size!(DeclName, 8);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_kinds() {
        let ctx = AstContext::new();
        let foo = DeclBaseName::new(ctx.identifier("foo"));
        assert_eq!(foo.kind(), DeclBaseNameKind::Normal);
        assert!(foo.identifier().is_some());
        assert!(!foo.is_special());

        assert_eq!(DeclBaseName::SUBSCRIPT.kind(), DeclBaseNameKind::Subscript);
        assert_eq!(
            DeclBaseName::CONSTRUCTOR.kind(),
            DeclBaseNameKind::Constructor
        );
        assert_eq!(DeclBaseName::DESTRUCTOR.kind(), DeclBaseNameKind::Destructor);
        assert!(DeclBaseName::SUBSCRIPT.is_special());
        assert_eq!(DeclBaseName::SUBSCRIPT.identifier(), None);
    }

    #[test]
    fn test_magic_raws_never_interned() {
        // The interner's raw ceiling stays below the magic band.
        let ceiling = Identifier::new(15, Identifier::MAX_LOCAL).raw();
        assert!(ceiling < 0xFFFF_FFFB);
    }

    #[test]
    fn test_user_facing_text() {
        let ctx = AstContext::new();
        let foo = DeclBaseName::new(ctx.identifier("foo"));
        assert_eq!(foo.user_facing_text(&ctx), "foo");
        assert_eq!(DeclBaseName::SUBSCRIPT.user_facing_text(&ctx), "subscript");
        assert_eq!(DeclBaseName::CONSTRUCTOR.user_facing_text(&ctx), "init");
        assert_eq!(DeclBaseName::DESTRUCTOR.user_facing_text(&ctx), "deinit");
    }

    #[test]
    fn test_base_name_word_round_trip() {
        let base = DeclBaseName::DESTRUCTOR;
        assert_eq!(DeclBaseName::from_word(base.into_word()), base);
        assert_eq!(base.into_word() & 0b111, 0);
        // The empty base is the null word.
        assert!(DeclBaseName::EMPTY.is_null());
    }

    #[test]
    fn test_simple_name() {
        let ctx = AstContext::new();
        let name = DeclName::simple(ctx.identifier("bar"));
        assert!(name.is_simple_name());
        assert!(!name.is_compound_name());
        assert!(!name.is_empty());
        assert_eq!(name.arity(&ctx), 0);
        assert!(name.argument_names(&ctx).is_empty());
        assert_eq!(
            name.base_name(&ctx).identifier(),
            Some(ctx.identifier("bar"))
        );
    }

    #[test]
    fn test_empty_name_is_null_word() {
        let name = DeclName::empty();
        assert!(name.is_empty());
        assert_eq!(name.opaque_value(), 0);
        assert_eq!(DeclName::default(), name);
    }

    #[test]
    fn test_zero_arg_compound_is_inline() {
        let ctx = AstContext::new();
        let base = DeclBaseName::new(ctx.identifier("run"));
        let name = DeclName::zero_arg_compound(base);
        assert!(name.is_compound_name());
        assert!(!name.is_simple_name());
        assert_eq!(name.arity(&ctx), 0);
        assert_eq!(name.inline_base_name(), Some(base));
        // Distinct from the simple name over the same base.
        assert_ne!(name, DeclName::from_base(base));
    }

    #[test]
    fn test_matches_ref() {
        let ctx = AstContext::new();
        let base = DeclBaseName::new(ctx.identifier("foo"));
        let x = ctx.identifier("x");
        let y = ctx.identifier("y");
        let simple = DeclName::from_base(base);
        let compound = ctx.compound_name(base, &[x, y]);

        // Compound resolves a simple reference with the same base.
        assert!(compound.matches_ref(simple, &ctx));
        // Compound references demand identity.
        assert!(compound.matches_ref(compound, &ctx));
        let other = ctx.compound_name(base, &[x]);
        assert!(!other.matches_ref(compound, &ctx));
        assert!(!simple.matches_ref(compound, &ctx));
    }

    #[test]
    fn test_compare_ordering() {
        let ctx = AstContext::new();
        let a = DeclName::simple(ctx.identifier("alpha"));
        let b = DeclName::simple(ctx.identifier("beta"));
        assert_eq!(a.compare(b, &ctx), Ordering::Less);
        assert_eq!(b.compare(a, &ctx), Ordering::Greater);
        assert_eq!(a.compare(a, &ctx), Ordering::Equal);

        // Normal names sort before magic names.
        let init = DeclName::from_base(DeclBaseName::CONSTRUCTOR);
        assert_eq!(b.compare(init, &ctx), Ordering::Less);

        // Simple sorts before compounds over the same base.
        let base = DeclBaseName::new(ctx.identifier("alpha"));
        let zero = DeclName::zero_arg_compound(base);
        let labeled = ctx.compound_name(base, &[ctx.identifier("x")]);
        assert_eq!(a.compare(zero, &ctx), Ordering::Less);
        assert_eq!(zero.compare(labeled, &ctx), Ordering::Less);

        // The empty name sorts last.
        assert_eq!(DeclName::empty().compare(a, &ctx), Ordering::Greater);
        assert_eq!(
            DeclName::empty().compare(DeclName::empty(), &ctx),
            Ordering::Equal
        );
    }

    #[test]
    fn test_display() {
        let ctx = AstContext::new();
        let base = DeclBaseName::new(ctx.identifier("foo"));
        assert_eq!(DeclName::from_base(base).display(&ctx).to_string(), "foo");
        assert_eq!(
            DeclName::zero_arg_compound(base).display(&ctx).to_string(),
            "foo()"
        );
        let name = ctx.compound_name(
            base,
            &[ctx.identifier("x"), Identifier::EMPTY, ctx.identifier("y")],
        );
        assert_eq!(name.display(&ctx).to_string(), "foo(x:_:y:)");
    }

    #[test]
    fn test_dense_key_sentinels() {
        assert_ne!(DeclName::empty_key(), DeclName::tombstone_key());
        assert_ne!(DeclName::empty_key(), DeclName::empty());
        let ctx = AstContext::new();
        let real = DeclName::simple(ctx.identifier("real"));
        assert_ne!(real, DeclName::empty_key());
        assert_ne!(real, DeclName::tombstone_key());
    }
}

//! One-word handle over the three node universes.

use std::fmt;

use pola_ptr::{fx_hash_word, DenseKey, PointerUnion3, EMPTY_WORD, TOMBSTONE_WORD};

use crate::node_ref::{DeclContextRef, DeclRef, ExprRef, StmtRef};
use crate::span::{SourceLoc, SourceRange};

/// Source-position and implicit-bit answers for node handles.
///
/// The arenas that own the actual node payloads implement this; the
/// handle layer stays ignorant of the node hierarchies.
pub trait NodeArena {
    /// Source range of an expression.
    fn expr_range(&self, expr: ExprRef) -> SourceRange;
    /// Source range of a statement.
    fn stmt_range(&self, stmt: StmtRef) -> SourceRange;
    /// Source range of a declaration.
    fn decl_range(&self, decl: DeclRef) -> SourceRange;

    /// Whether an expression was synthesized rather than written.
    fn expr_is_implicit(&self, expr: ExprRef) -> bool;
    /// Whether a statement was synthesized rather than written.
    fn stmt_is_implicit(&self, stmt: StmtRef) -> bool;
    /// Whether a declaration was synthesized rather than written.
    fn decl_is_implicit(&self, decl: DeclRef) -> bool;

    /// The declaration context a node introduces, when it introduces one.
    fn decl_context_of(&self, node: AstNode) -> Option<DeclContextRef> {
        let _ = node;
        None
    }
}

/// An expression, statement, or declaration handle in one word.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct AstNode {
    inner: PointerUnion3<ExprRef, StmtRef, DeclRef>,
}

impl AstNode {
    /// Whether this holds an expression handle.
    #[inline]
    pub fn is_expr(self) -> bool {
        self.inner.is_first()
    }

    /// Whether this holds a statement handle.
    #[inline]
    pub fn is_stmt(self) -> bool {
        self.inner.is_second()
    }

    /// Whether this holds a declaration handle.
    #[inline]
    pub fn is_decl(self) -> bool {
        self.inner.is_third()
    }

    /// The expression handle, when active.
    #[inline]
    pub fn expr(self) -> Option<ExprRef> {
        self.inner.try_first()
    }

    /// The statement handle, when active.
    #[inline]
    pub fn stmt(self) -> Option<StmtRef> {
        self.inner.try_second()
    }

    /// The declaration handle, when active.
    #[inline]
    pub fn decl(self) -> Option<DeclRef> {
        self.inner.try_third()
    }

    /// Whether the active handle is invalid.
    #[inline]
    pub fn is_null(self) -> bool {
        self.inner.is_active_null()
    }

    /// Source range of the node. Invalid handles yield the invalid range.
    pub fn source_range<A: NodeArena + ?Sized>(self, arena: &A) -> SourceRange {
        if let Some(expr) = self.expr() {
            if expr.is_valid() {
                return arena.expr_range(expr);
            }
        } else if let Some(stmt) = self.stmt() {
            if stmt.is_valid() {
                return arena.stmt_range(stmt);
            }
        } else if let Some(decl) = self.decl() {
            if decl.is_valid() {
                return arena.decl_range(decl);
            }
        }
        SourceRange::INVALID
    }

    /// Start of the node's source range.
    #[inline]
    pub fn start_loc<A: NodeArena + ?Sized>(self, arena: &A) -> SourceLoc {
        self.source_range(arena).start
    }

    /// End of the node's source range.
    #[inline]
    pub fn end_loc<A: NodeArena + ?Sized>(self, arena: &A) -> SourceLoc {
        self.source_range(arena).end
    }

    /// Whether the node was synthesized. Invalid handles answer false.
    pub fn is_implicit<A: NodeArena + ?Sized>(self, arena: &A) -> bool {
        if let Some(expr) = self.expr() {
            expr.is_valid() && arena.expr_is_implicit(expr)
        } else if let Some(stmt) = self.stmt() {
            stmt.is_valid() && arena.stmt_is_implicit(stmt)
        } else if let Some(decl) = self.decl() {
            decl.is_valid() && arena.decl_is_implicit(decl)
        } else {
            false
        }
    }

    /// The declaration context this node introduces, if any.
    pub fn as_decl_context<A: NodeArena + ?Sized>(self, arena: &A) -> Option<DeclContextRef> {
        if self.is_null() {
            return None;
        }
        arena.decl_context_of(self)
    }

    /// The raw encoded word.
    #[inline]
    pub fn opaque_value(self) -> usize {
        self.inner.opaque_value()
    }

    /// Rebuild from a word previously produced by `opaque_value`.
    #[inline]
    pub fn from_opaque_value(word: usize) -> Self {
        AstNode {
            inner: PointerUnion3::from_opaque_value(word),
        }
    }
}

impl From<ExprRef> for AstNode {
    #[inline]
    fn from(expr: ExprRef) -> Self {
        AstNode {
            inner: PointerUnion3::from_first(expr),
        }
    }
}

impl From<StmtRef> for AstNode {
    #[inline]
    fn from(stmt: StmtRef) -> Self {
        AstNode {
            inner: PointerUnion3::from_second(stmt),
        }
    }
}

impl From<DeclRef> for AstNode {
    #[inline]
    fn from(decl: DeclRef) -> Self {
        AstNode {
            inner: PointerUnion3::from_third(decl),
        }
    }
}

impl fmt::Debug for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(expr) = self.expr() {
            write!(f, "AstNode({expr:?})")
        } else if let Some(stmt) = self.stmt() {
            write!(f, "AstNode({stmt:?})")
        } else if let Some(decl) = self.decl() {
            write!(f, "AstNode({decl:?})")
        } else {
            write!(f, "AstNode(<null>)")
        }
    }
}

impl DenseKey for AstNode {
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
    use super::AstNode;
    pola_ptr::static_assert_size!(AstNode, 8);
}

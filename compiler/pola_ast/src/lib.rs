//! Pola AST - Node Identity, Interning, and Naming Model
//!
//! This crate contains the handle layer the Pola front end is built on:
//! - `SourceLoc`/`SourceRange` for source locations
//! - Arena handles (`ExprRef`, `StmtRef`, `DeclRef`, ...)
//! - `Identifier` and the sharded `StringInterner`
//! - `DeclBaseName`/`DeclName` with compound-name interning
//! - `AstNode` as the one-word expr/stmt/decl handle
//! - `CapturedValue`/`CaptureInfo`, `GenericParamKey`,
//!   `InterfaceConformanceRef`
//!
//! # Design Philosophy
//!
//! - **Intern everything**: strings become `Identifier(u32)`, compound
//!   names become one-word `DeclName`s; equality is integer compare.
//! - **One word per handle**: every cross-referencing type here is a
//!   single machine word built from the `pola_ptr` packers, so AST nodes
//!   stay compact and hash-map keys stay trivial.
//! - **Seams as traits**: span tables, implicit bits, and conformance
//!   resolution live behind `NodeArena`/`ConformanceLookup`, keeping this
//!   crate free of the node hierarchies themselves.

mod ast_node;
mod capture;
mod conformance;
mod context;
mod decl_name;
mod generic_param;
mod ident;
mod interner;
mod node_ref;
mod span;

pub use ast_node::{AstNode, NodeArena};
pub use capture::{CaptureFlags, CaptureInfo, CapturedValue};
pub use conformance::{ConformanceLookup, InterfaceConformanceRef};
pub use context::AstContext;
pub use decl_name::{
    CompoundNameData, CompoundNameRef, DeclBaseName, DeclBaseNameKind, DeclName,
};
pub use generic_param::{GenericParamIndexed, GenericParamKey};
pub use ident::{
    is_operator_continuation_code_point, is_operator_start_code_point, Identifier,
};
pub use interner::{InternError, StringInterner, StringLookup};
pub use node_ref::{
    ConformanceRef, DeclContextRef, DeclRef, DynamicSelfTypeRef, ExprRef, InterfaceDeclRef,
    StmtRef, ValueDeclRef,
};
pub use span::{RangeError, SourceLoc, SourceRange};

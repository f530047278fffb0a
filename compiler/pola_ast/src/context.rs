//! The interning context.
//!
//! Owns the string interner and the compound-name table. Everything
//! handed out is deduplicated, so name equality anywhere downstream is
//! word equality.

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::decl_name::{CompoundNameData, CompoundNameRef, DeclBaseName, DeclName};
use crate::ident::Identifier;
use crate::interner::{InternError, StringInterner, StringLookup};

#[derive(Default)]
struct CompoundTable {
    map: FxHashMap<CompoundNameData, CompoundNameRef>,
    entries: Vec<&'static CompoundNameData>,
}

/// Shared interning state for one compilation.
///
/// Thread-safe: the interner shards internally and the compound-name
/// table takes its own lock with the same double-checked insert pattern.
pub struct AstContext {
    interner: StringInterner,
    compounds: RwLock<CompoundTable>,
}

impl AstContext {
    /// Create a fresh context with the keyword table pre-interned.
    pub fn new() -> Self {
        AstContext {
            interner: StringInterner::new(),
            compounds: RwLock::new(CompoundTable::default()),
        }
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics on interner shard overflow. Use `try_identifier` for the
    /// checked path.
    #[inline]
    pub fn identifier(&self, text: &str) -> Identifier {
        self.interner.intern(text)
    }

    /// Intern a string, reporting shard overflow.
    #[inline]
    pub fn try_identifier(&self, text: &str) -> Result<Identifier, InternError> {
        self.interner.try_intern(text)
    }

    /// The underlying string interner.
    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Build a declaration name with argument labels.
    ///
    /// Zero labels yield the inline zero-argument form and never touch
    /// the table. One or more labels intern a `CompoundNameData` record;
    /// the same (base, labels) pair always returns a bit-identical name.
    pub fn compound_name(&self, base: DeclBaseName, labels: &[Identifier]) -> DeclName {
        if labels.is_empty() {
            return DeclName::zero_arg_compound(base);
        }
        let key = CompoundNameData {
            base,
            labels: SmallVec::from_slice(labels),
        };
        {
            let table = self.compounds.read();
            if let Some(&compound) = table.map.get(&key) {
                return DeclName::from_compound_ref(compound);
            }
        }

        let mut table = self.compounds.write();
        // Double check: another thread may have interned while we waited.
        if let Some(&compound) = table.map.get(&key) {
            return DeclName::from_compound_ref(compound);
        }

        let index = table.entries.len();
        #[expect(clippy::cast_possible_truncation, reason = "table is u32-indexed")]
        let compound = CompoundNameRef::new(index as u32);
        let leaked: &'static CompoundNameData = Box::leak(Box::new(key.clone()));
        table.entries.push(leaked);
        table.map.insert(key, compound);
        if table.entries.len().is_power_of_two() {
            tracing::debug!(len = table.entries.len(), "compound name table grew");
        }
        DeclName::from_compound_ref(compound)
    }

    /// The record behind a compound-name handle.
    ///
    /// # Panics
    /// Panics when the handle was not produced by this context.
    pub fn compound_data(&self, compound: CompoundNameRef) -> &CompoundNameData {
        match self.try_compound_data(compound) {
            Some(data) => data,
            None => panic!("{compound:?} was not produced by this context"),
        }
    }

    /// The record behind a compound-name handle, or `None` for a handle
    /// this context never produced.
    pub fn try_compound_data(&self, compound: CompoundNameRef) -> Option<&CompoundNameData> {
        let table = self.compounds.read();
        table.entries.get(compound.index()).copied()
    }

    /// Number of interned compound-name records.
    pub fn compound_name_count(&self) -> usize {
        self.compounds.read().entries.len()
    }
}

impl Default for AstContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StringLookup for AstContext {
    #[inline]
    fn lookup(&self, ident: Identifier) -> &str {
        self.interner.lookup(ident)
    }
}

impl fmt::Debug for AstContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstContext")
            .field("identifiers", &self.interner.len())
            .field("compound_names", &self.compound_name_count())
            .finish()
    }
}

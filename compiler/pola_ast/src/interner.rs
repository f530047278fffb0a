//! Sharded string interner.
//!
//! Interning is the identity model for every name in the front end:
//! a string goes in once, an `Identifier` comes out, and from then on
//! equality and hashing are integer operations. The table is sharded 16
//! ways so parsing threads rarely contend on the same lock, and interned
//! text is leaked to `'static` so lookups hand out plain `&str` without
//! holding a lock.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::ident::Identifier;

/// Keywords pre-interned at startup so the lexer's hot path never takes
/// the insert slow path for them.
const KEYWORDS: &[&str] = &[
    "associatedtype",
    "class",
    "deinit",
    "enum",
    "extension",
    "func",
    "import",
    "init",
    "inout",
    "interface",
    "internal",
    "let",
    "operator",
    "private",
    "public",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
    "break",
    "case",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "switch",
    "where",
    "while",
    "as",
    "catch",
    "false",
    "is",
    "nil",
    "rethrows",
    "self",
    "Self",
    "super",
    "throw",
    "throws",
    "true",
    "try",
];

/// Errors from the interning layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// A shard ran out of local index space.
    ShardOverflow {
        /// Which shard overflowed.
        shard: usize,
        /// Number of strings already in that shard.
        count: usize,
    },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::ShardOverflow { shard, count } => {
                write!(f, "interner shard {shard} overflow: {count} strings")
            }
        }
    }
}

impl std::error::Error for InternError {}

/// Read access to interned text.
///
/// Name-carrying types take this at the seam so callers can pass either
/// the raw interner or a context wrapping one.
pub trait StringLookup {
    /// The text for an interned identifier.
    ///
    /// # Panics
    /// Panics when the identifier was not produced by this interner.
    fn lookup(&self, ident: Identifier) -> &str;
}

#[derive(Default)]
struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Thread-safe sharded string interner.
///
/// Sixteen independent `RwLock` shards keyed by string hash. Lookups of
/// already-interned strings take a read lock only; inserts upgrade with
/// a double check under the write lock.
pub struct StringInterner {
    shards: [RwLock<Shard>; Identifier::NUM_SHARDS],
    count: AtomicUsize,
}

impl StringInterner {
    /// Create an interner with the empty string and the keyword table
    /// pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
            count: AtomicUsize::new(0),
        };
        // The empty string must occupy shard 0, local 0 so that
        // Identifier::EMPTY round-trips through lookup.
        {
            let mut shard = interner.shards[0].write();
            shard.map.insert("", 0);
            shard.strings.push("");
            interner.count.store(1, Ordering::Relaxed);
        }
        for keyword in KEYWORDS {
            interner.intern(keyword);
        }
        interner
    }

    fn shard_index(text: &str) -> usize {
        let mut hasher = FxHasher::default();
        text.hash(&mut hasher);
        #[expect(clippy::cast_possible_truncation, reason = "low bits select the shard")]
        let hash = hasher.finish() as usize;
        hash & (Identifier::NUM_SHARDS - 1)
    }

    /// Intern a string, returning its identifier.
    ///
    /// Returns the existing identifier when the string was seen before.
    pub fn try_intern(&self, text: &str) -> Result<Identifier, InternError> {
        if text.is_empty() {
            return Ok(Identifier::EMPTY);
        }
        let shard_index = Self::shard_index(text);
        {
            let shard = self.shards[shard_index].read();
            if let Some(&local) = shard.map.get(text) {
                #[expect(clippy::cast_possible_truncation, reason = "shard count fits u32")]
                let shard_index = shard_index as u32;
                return Ok(Identifier::new(shard_index, local));
            }
        }

        let mut shard = self.shards[shard_index].write();
        // Double check: another thread may have interned while we waited.
        if let Some(&local) = shard.map.get(text) {
            #[expect(clippy::cast_possible_truncation, reason = "shard count fits u32")]
            let shard_index = shard_index as u32;
            return Ok(Identifier::new(shard_index, local));
        }

        let local = shard.strings.len();
        if local > Identifier::MAX_LOCAL as usize {
            return Err(InternError::ShardOverflow {
                shard: shard_index,
                count: local,
            });
        }

        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        #[expect(clippy::cast_possible_truncation, reason = "capped at MAX_LOCAL")]
        let local = local as u32;
        shard.map.insert(leaked, local);
        shard.strings.push(leaked);
        self.count.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(text, shard = shard_index, local, "interned string");
        #[expect(clippy::cast_possible_truncation, reason = "shard count fits u32")]
        let shard_index = shard_index as u32;
        Ok(Identifier::new(shard_index, local))
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics on shard overflow. Use `try_intern` for the checked path.
    pub fn intern(&self, text: &str) -> Identifier {
        match self.try_intern(text) {
            Ok(ident) => ident,
            Err(e) => panic!("{e}"),
        }
    }

    /// Look up the identifier for a string without interning it.
    pub fn get(&self, text: &str) -> Option<Identifier> {
        if text.is_empty() {
            return Some(Identifier::EMPTY);
        }
        let shard_index = Self::shard_index(text);
        let shard = self.shards[shard_index].read();
        #[expect(clippy::cast_possible_truncation, reason = "shard count fits u32")]
        let shard_index = shard_index as u32;
        shard
            .map
            .get(text)
            .map(|&local| Identifier::new(shard_index, local))
    }

    /// The text for an identifier, or `None` for an identifier this
    /// interner never produced.
    pub fn try_lookup(&self, ident: Identifier) -> Option<&'static str> {
        let shard = self.shards[ident.shard()].read();
        shard.strings.get(ident.local()).copied()
    }

    /// Total number of interned strings across all shards.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    /// Whether no strings are interned. Never true in practice since the
    /// empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringLookup for StringInterner {
    fn lookup(&self, ident: Identifier) -> &str {
        match self.try_lookup(ident) {
            Some(text) => text,
            None => panic!("identifier {ident:?} was not produced by this interner"),
        }
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

//! Source locations and ranges.
//!
//! Compact 4-byte locations and 8-byte half-open ranges.

use std::fmt;

/// Error when creating a range from byte offsets that exceed `u32::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Range start exceeds `u32::MAX`.
    StartTooLarge(usize),
    /// Range end exceeds `u32::MAX`.
    EndTooLarge(usize),
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::StartTooLarge(v) => {
                write!(f, "range start {v} (0x{v:X}) exceeds u32::MAX")
            }
            RangeError::EndTooLarge(v) => {
                write!(f, "range end {v} (0x{v:X}) exceeds u32::MAX")
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// A byte offset into a source buffer.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SourceLoc(u32);

impl SourceLoc {
    /// Location for generated nodes with no source position.
    pub const INVALID: SourceLoc = SourceLoc(u32::MAX);

    /// Create from a byte offset.
    #[inline]
    pub const fn new(offset: u32) -> Self {
        SourceLoc(offset)
    }

    /// The byte offset.
    #[inline]
    pub const fn offset(self) -> u32 {
        self.0
    }

    /// Whether this points at real source.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "SourceLoc({})", self.0)
        } else {
            write!(f, "SourceLoc::INVALID")
        }
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        Self::INVALID
    }
}

/// A half-open byte range in a source buffer.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct SourceRange {
    pub start: SourceLoc,
    pub end: SourceLoc,
}

impl SourceRange {
    /// Range for generated nodes with no source position.
    pub const INVALID: SourceRange = SourceRange {
        start: SourceLoc::INVALID,
        end: SourceLoc::INVALID,
    };

    /// Create a new range.
    #[inline]
    pub const fn new(start: SourceLoc, end: SourceLoc) -> Self {
        SourceRange { start, end }
    }

    /// Try to create a range from byte offsets.
    ///
    /// Returns an error when either offset exceeds `u32::MAX` bytes.
    #[inline]
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, RangeError> {
        let start =
            u32::try_from(range.start).map_err(|_| RangeError::StartTooLarge(range.start))?;
        let end = u32::try_from(range.end).map_err(|_| RangeError::EndTooLarge(range.end))?;
        Ok(SourceRange::new(SourceLoc::new(start), SourceLoc::new(end)))
    }

    /// Create from byte offsets.
    ///
    /// # Panics
    /// Panics when either offset exceeds `u32::MAX` bytes. Use
    /// `try_from_range` for the checked path.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        match Self::try_from_range(range) {
            Ok(r) => r,
            Err(e) => panic!("{e}"),
        }
    }

    /// Whether both endpoints point at real source.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.start.is_valid() && self.end.is_valid()
    }

    /// Whether the range covers no bytes.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// A zero-length range at one location.
    #[inline]
    pub const fn point(loc: SourceLoc) -> Self {
        SourceRange { start: loc, end: loc }
    }

    /// Whether an offset falls inside the range.
    #[inline]
    pub fn contains(self, loc: SourceLoc) -> bool {
        self.start <= loc && loc < self.end
    }

    /// The smallest range covering both inputs.
    ///
    /// Invalid endpoints are sticky: merging with an invalid range yields
    /// an invalid endpoint, flagging generated code.
    #[inline]
    #[must_use]
    pub fn merge(self, other: SourceRange) -> SourceRange {
        if !self.is_valid() || !other.is_valid() {
            return SourceRange::INVALID;
        }
        SourceRange {
            start: if self.start <= other.start {
                self.start
            } else {
                other.start
            },
            end: if self.end >= other.end {
                self.end
            } else {
                other.end
            },
        }
    }
}

impl fmt::Debug for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}..{}", self.start.offset(), self.end.offset())
        } else {
            write!(f, "<invalid range>")
        }
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Default for SourceRange {
    fn default() -> Self {
        Self::INVALID
    }
}

// Size assertions to prevent accidental regressions
mod size_asserts {
    use super::{SourceLoc, SourceRange};
    pola_ptr::static_assert_size!(SourceLoc, 4);
    pola_ptr::static_assert_size!(SourceRange, 8);
}

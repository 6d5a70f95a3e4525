//! Byte-range patches applied over an immutable original buffer.
//!
//! A write never edits the original in place. It produces a [`PatchSet`]
//! describing exactly which bytes change, and [`PatchSet::apply`] copies the
//! original and overwrites only those ranges.

use std::ops::Range;

use crate::error::{Result, SpcError};

/// Replacement bytes for one contiguous range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub offset: usize,
    pub bytes: Vec<u8>,
}

impl Patch {
    #[must_use]
    pub fn new(offset: usize, bytes: Vec<u8>) -> Self {
        Self { offset, bytes }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.bytes.len()
    }
}

/// Validated, non-overlapping patches against a buffer of known length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSet {
    buffer_len: usize,
    patches: Vec<Patch>,
}

impl PatchSet {
    /// Empty set for a buffer of `buffer_len` bytes.
    #[must_use]
    pub fn new(buffer_len: usize) -> Self {
        Self {
            buffer_len,
            patches: Vec::new(),
        }
    }

    /// Add a patch, rejecting out-of-bounds or overlapping ranges.
    pub fn push(&mut self, patch: Patch) -> Result<()> {
        let end = patch
            .offset
            .checked_add(patch.bytes.len())
            .filter(|&end| end <= self.buffer_len)
            .ok_or(SpcError::PatchOutOfBounds {
                offset: patch.offset,
                len: patch.bytes.len(),
                buffer_len: self.buffer_len,
            })?;

        if let Some(existing) = self
            .patches
            .iter()
            .find(|p| p.offset < end && patch.offset < p.range().end)
        {
            return Err(SpcError::PatchOverlap {
                offset: patch.offset,
                previous_end: existing.range().end,
            });
        }

        let index = self.patches.partition_point(|p| p.offset < patch.offset);
        self.patches.insert(index, patch);
        Ok(())
    }

    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Byte ranges that [`apply`](Self::apply) overwrites, in ascending order.
    pub fn touched(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.patches.iter().map(Patch::range)
    }

    /// Whether `offset` lies inside any patch.
    #[must_use]
    pub fn touches(&self, offset: usize) -> bool {
        self.touched().any(|range| range.contains(&offset))
    }

    /// Copy `original` and overwrite the patched ranges.
    pub fn apply(&self, original: &[u8]) -> Result<Vec<u8>> {
        if original.len() != self.buffer_len {
            return Err(SpcError::PatchTargetMismatch {
                expected: self.buffer_len,
                actual: original.len(),
            });
        }
        let mut out = original.to_vec();
        for patch in &self.patches {
            out[patch.range()].copy_from_slice(&patch.bytes);
        }
        Ok(out)
    }
}

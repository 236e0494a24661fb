//! Structured text change deltas.
//!
//! Incremental consumers (the decoration store, check sessions) need **structured edits**
//! rather than old/new text diffs. This module defines a small, UI-agnostic delta format
//! expressed in **character offsets** (Unicode scalar values). The host editor's transaction
//! layer is expected to produce one [`TextDelta`] per accepted transaction.

/// A single text edit expressed in character offsets.
///
/// Semantics:
/// - `start` is a character offset in the document **at the time this edit is applied**.
/// - The deleted range is defined by the length (in `char`s) of `deleted_text`.
/// - Edits inside a [`TextDelta`] must be applied **in order** to transform the "before"
///   document into the "after" document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// A pure insertion at `start`.
    pub fn insert(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: String::new(),
            inserted_text: text.into(),
        }
    }

    /// A pure deletion of `text` at `start`.
    pub fn delete(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: text.into(),
            inserted_text: String::new(),
        }
    }

    /// A replacement of `deleted` with `inserted` at `start`.
    pub fn replace(start: usize, deleted: impl Into<String>, inserted: impl Into<String>) -> Self {
        Self {
            start,
            deleted_text: deleted.into(),
            inserted_text: inserted.into(),
        }
    }

    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset of the deleted range in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }
}

/// A structured description of one document change (ordered edits).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDelta {
    /// Ordered list of edits that transforms the "before" document into the "after" document.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// A delta holding a single edit.
    pub fn single(edit: TextDeltaEdit) -> Self {
        Self { edits: vec![edit] }
    }

    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

//! Overlay state façade.
//!
//! [`OverlayState`] ties one document to its decoration store, alert registry, and severity
//! class table, and is the single place where document edits and effects are applied. The host
//! editor binding is expected to be a thin adapter: forward every accepted transaction as a
//! [`TextDelta`], dispatch effects for user interactions, and render from
//! [`OverlayState::store`].
//!
//! Subscribers observe every accepted transition as an [`OverlayChange`]; this is how the
//! status/panel collaborators stay in sync without polling.

use crate::alerts::{AlertRegistry, Finding};
use crate::delta::{TextDelta, TextDeltaEdit};
use crate::document::Document;
use crate::marks::{SeverityClassTable, build_marks};
use crate::store::{DecorationStore, Effect};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of one overlay-managed buffer.
///
/// Check sessions capture this at initiation time so a completion arriving after the user
/// switched buffers can be matched against the buffer that was actually checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Allocate a fresh, process-unique buffer id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// What kind of transition a state change notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayChangeKind {
    /// The document text changed and ranges were remapped.
    DocumentModified,
    /// A check completed and the visual set was replaced.
    MarksReplaced,
    /// Ranges were cleared (all or a span).
    MarksCleared,
    /// The selection channel changed.
    SelectionChanged,
    /// The highlight channel changed.
    HighlightChanged,
}

/// One accepted state transition, delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayChange {
    /// The kind of transition.
    pub kind: OverlayChangeKind,
    /// Store version after the transition.
    pub store_version: u64,
    /// Document version after the transition.
    pub doc_version: u64,
}

/// Callback invoked after every accepted transition.
pub type OverlayChangeCallback = Box<dyn FnMut(&OverlayChange)>;

/// Owner of one buffer's overlay state: document, decoration store, alert registry, and
/// severity class table.
pub struct OverlayState {
    buffer: BufferId,
    doc: Document,
    doc_version: u64,
    store: DecorationStore,
    registry: AlertRegistry,
    classes: SeverityClassTable,
    subscribers: Vec<OverlayChangeCallback>,
}

impl OverlayState {
    /// Create overlay state for a buffer with the given initial text.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: BufferId::next(),
            doc: Document::from_text(text),
            doc_version: 0,
            store: DecorationStore::new(),
            registry: AlertRegistry::new(),
            classes: SeverityClassTable::default(),
            subscribers: Vec::new(),
        }
    }

    /// This buffer's identity.
    pub fn buffer_id(&self) -> BufferId {
        self.buffer
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Document version, incremented once per applied delta.
    pub fn doc_version(&self) -> u64 {
        self.doc_version
    }

    /// The decoration store (read access; all mutation goes through this façade).
    pub fn store(&self) -> &DecorationStore {
        &self.store
    }

    /// The alert registry for the most recent check.
    pub fn registry(&self) -> &AlertRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub(crate) fn registry_mut(&mut self) -> &mut AlertRegistry {
        &mut self.registry
    }

    /// The severity class table used when building marks.
    pub fn classes(&self) -> &SeverityClassTable {
        &self.classes
    }

    /// Replace the severity class table (takes effect on the next check).
    pub fn set_classes(&mut self, classes: SeverityClassTable) {
        self.classes = classes;
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&mut self, callback: impl FnMut(&OverlayChange) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    fn notify(&mut self, kind: OverlayChangeKind) {
        let change = OverlayChange {
            kind,
            store_version: self.store.version(),
            doc_version: self.doc_version,
        };
        for callback in &mut self.subscribers {
            callback(&change);
        }
    }

    /// Apply a document change: mutate the text and remap every range, synchronously, within
    /// this call. The decoration set is consistent with the document when this returns.
    pub fn apply_delta(&mut self, delta: &TextDelta) {
        if delta.is_empty() {
            return;
        }
        for edit in &delta.edits {
            self.doc.apply_edit(edit);
        }
        self.doc_version += 1;
        self.store.apply_delta(delta);
        self.notify(OverlayChangeKind::DocumentModified);
    }

    /// Convenience wrapper applying a single edit.
    pub fn apply_edit(&mut self, edit: TextDeltaEdit) {
        self.apply_delta(&TextDelta::single(edit));
    }

    /// Dispatch one effect to the store.
    pub fn apply_effect(&mut self, effect: Effect) {
        let kind = match &effect {
            Effect::Add(_) => OverlayChangeKind::MarksReplaced,
            Effect::ClearAll | Effect::ClearRange { .. } => OverlayChangeKind::MarksCleared,
            Effect::Select(_) => OverlayChangeKind::SelectionChanged,
            Effect::Highlight(_) => OverlayChangeKind::HighlightChanged,
        };
        self.store.apply(effect);
        self.notify(kind);
    }

    /// Apply a completed check: reset the registry and replace the visual set.
    ///
    /// The registry keeps every finding (panels list them all); the visual set only gets the
    /// ranges that resolve to a non-degenerate span in the *current* document.
    pub fn apply_check_result(&mut self, findings: Vec<Finding>) {
        let marks = build_marks(&findings, &self.doc, &self.classes);
        self.registry.reset(findings);
        self.apply_effect(Effect::Add(marks));
    }
}

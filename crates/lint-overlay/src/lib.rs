#![warn(missing_docs)]
//! Lint Overlay - Headless Prose-Lint Decoration Engine
//!
//! # Overview
//!
//! `lint-overlay` keeps structured findings from an external prose linter overlaid on a live,
//! user-editable text buffer, and keeps those overlays correct as the user types. It is
//! headless: the host editor supplies text transactions and interaction offsets, and renders
//! from the decoration set; this crate owns the bookkeeping in between.
//!
//! # Core Features
//!
//! - **Byte/character translation**: the linter reports UTF-8 byte columns, the editor
//!   addresses characters; [`position`] bridges the two with clamping at every boundary
//! - **Versioned decorations**: a sorted, versioned [`store::DecorationSet`] transitioned by a
//!   small sum type of effects
//! - **Edit survival**: interval mapping with non-sticky ends, applied synchronously on every
//!   keystroke in time proportional to the number of ranges
//! - **Interaction correlation**: click/hover offsets resolve back to the originating finding
//! - **Reset-on-check registry**: finding ids are stable within a check and deliberately die
//!   with it
//!
//! # Quick Start
//!
//! ```rust
//! use lint_overlay::{ByteSpan, Finding, OverlayState, Severity, TextDeltaEdit};
//!
//! let mut state = OverlayState::new("Hello wörld");
//!
//! // A completed check delivers findings (already converted to 0-based half-open spans).
//! state.apply_check_result(vec![Finding {
//!     line: 0,
//!     span: ByteSpan::new(6, 12),
//!     severity: Severity::Warning,
//!     matched: "wörld".to_string(),
//!     message: "possible misspelling".to_string(),
//!     rule: Some("Spelling.Unknown".to_string()),
//! }]);
//!
//! let mark = &state.store().set().ranges()[0];
//! assert_eq!((mark.from, mark.to), (6, 11)); // character offsets, not bytes
//!
//! // Typing in front of the flagged span shifts the mark with the text.
//! state.apply_edit(TextDeltaEdit::insert(0, ">> "));
//! let mark = &state.store().set().ranges()[0];
//! assert_eq!((mark.from, mark.to), (9, 14));
//! ```
//!
//! # Module Description
//!
//! - [`document`] - rope-backed document text
//! - [`delta`] - structured text change deltas
//! - [`position`] - byte-column / character-offset translation
//! - [`alerts`] - finding data model and per-check registry
//! - [`marks`] - visual ranges and the finding-to-decoration factory
//! - [`store`] - versioned decoration store and its effects
//! - [`state`] - per-buffer façade tying the pieces together
//! - [`correlate`] - interaction-to-finding resolution
//! - [`navigate`] - scroll-to-finding requests
//!
//! The check-session lifecycle (captured buffer identity, superseding checks) and linter
//! payload parsing live in the companion crate `lint-overlay-check`.

pub mod alerts;
pub mod correlate;
pub mod delta;
pub mod document;
pub mod marks;
pub mod navigate;
pub mod position;
pub mod state;
pub mod store;

pub use alerts::{AlertRegistry, ByteSpan, Finding, FindingId, Severity};
pub use correlate::{PanelEvent, finding_at, resolve_at, select_at};
pub use delta::{TextDelta, TextDeltaEdit};
pub use document::Document;
pub use marks::{SeverityClassTable, VisualRange, build_marks};
pub use navigate::{ScrollRequest, scroll_to};
pub use position::{resolve_offset, resolve_position};
pub use state::{BufferId, OverlayChange, OverlayChangeKind, OverlayState};
pub use store::{DecorationSet, DecorationStore, Effect};

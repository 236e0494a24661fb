#![warn(missing_docs)]
//! Check integration for `lint-overlay`.
//!
//! The core crate is deliberately ignorant of where findings come from. This crate owns the
//! boundary with the external prose linter and the host editor's interaction layer:
//!
//! - [`payload`] - parse the linter's JSON alert output into findings, normalizing its
//!   1-based lines and inclusive byte spans exactly once
//! - [`session`] - the check lifecycle: capture the target buffer's identity at initiation,
//!   match completions against it, and let the newest applied check win
//! - [`interact`] - pointer/hover handlers over the core correlator
//!
//! The linter subprocess itself (spawning, timeouts, early termination) belongs to the host;
//! this crate only reacts to completed results.
//!
//! ```rust
//! use lint_overlay::OverlayState;
//! use lint_overlay_check::session::CheckSession;
//! use serde_json::json;
//!
//! let mut state = OverlayState::new("This is very good.");
//! let mut session = CheckSession::new();
//!
//! // Initiation: capture the target buffer before handing off to the linter.
//! let ticket = session.begin(&state);
//!
//! // ... the linter runs out-of-band; later its payload arrives ...
//! let payload = json!([{
//!     "Line": 1, "Span": [9, 12], "Severity": "suggestion",
//!     "Match": "very", "Message": "Consider removing 'very'.",
//! }]);
//! session.complete_payload(ticket, &mut state, &payload).unwrap();
//! assert_eq!(state.store().set().len(), 1);
//! ```

pub mod interact;
pub mod payload;
pub mod session;

pub use interact::{HoverInfo, handle_click, hover_at};
pub use payload::{PayloadError, findings_from_payload, findings_from_str};
pub use session::{CheckOutcome, CheckSession, CheckTicket};

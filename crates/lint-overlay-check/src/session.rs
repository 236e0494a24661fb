//! Check-session lifecycle.
//!
//! The linter check is asynchronous and out-of-band; its completion arrives via a callback at
//! an arbitrary later time. Two hazards follow:
//!
//! 1. **Stale target** - the user may have switched buffers while the check was in flight. A
//!    check is therefore initiated against a [`CheckTicket`] capturing the target buffer's
//!    identity, and completion is matched against that ticket, never against "whatever buffer
//!    is active now". The ticket is the check-invocation and check-completion ends of a
//!    single-shot channel carrying the target's identity.
//! 2. **Superseding checks** - a newer check invalidates any still-in-flight older check for
//!    the same buffer. The most recently *applied* result wins; an older completion arriving
//!    after a newer one has been applied is discarded.
//!
//! Both failure modes are recovered silently (a debug log at most): no decorations appear,
//! nothing propagates to the invoking collaborator.

use crate::payload::{PayloadError, findings_from_payload};
use lint_overlay::{BufferId, Finding, OverlayState};
use serde_json::Value;

/// Captured identity of one in-flight check.
///
/// Created by [`CheckSession::begin`] at initiation and handed back at completion. The
/// document version is informational (the overlay clamps stale offsets defensively); the
/// buffer id and generation decide whether the result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket {
    buffer: BufferId,
    doc_version: u64,
    generation: u64,
}

impl CheckTicket {
    /// The buffer this check was initiated against.
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// Document version at initiation time.
    pub fn doc_version(&self) -> u64 {
        self.doc_version
    }
}

/// Outcome of delivering a completed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The result was applied: registry reset, marks replaced.
    Applied,
    /// The result targeted a different buffer than the one provided.
    WrongBuffer,
    /// A newer check for this buffer was already applied.
    Superseded,
}

/// Per-buffer check bookkeeping: issues tickets and decides whether completions still apply.
#[derive(Debug, Default)]
pub struct CheckSession {
    next_generation: u64,
    last_applied: Option<u64>,
}

impl CheckSession {
    /// Create a session with no checks issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initiate a check against `state`, capturing its identity for the completion handler.
    ///
    /// The caller hands the returned ticket to whatever owns the linter subprocess and passes
    /// it back with the result.
    pub fn begin(&mut self, state: &OverlayState) -> CheckTicket {
        self.next_generation += 1;
        CheckTicket {
            buffer: state.buffer_id(),
            doc_version: state.doc_version(),
            generation: self.next_generation,
        }
    }

    /// Deliver a completed check's findings for the buffer owning `state`.
    ///
    /// Applies last-write-wins: the result is discarded if its ticket targets a different
    /// buffer or if a newer check was already applied. Discards are silent no-ops.
    pub fn complete(
        &mut self,
        ticket: CheckTicket,
        state: &mut OverlayState,
        findings: Vec<Finding>,
    ) -> CheckOutcome {
        if ticket.buffer != state.buffer_id() {
            log::debug!(
                "discarding check result for {:?}: buffer is {:?}",
                ticket.buffer,
                state.buffer_id()
            );
            return CheckOutcome::WrongBuffer;
        }
        if self
            .last_applied
            .is_some_and(|applied| applied >= ticket.generation)
        {
            log::debug!(
                "discarding superseded check result (generation {})",
                ticket.generation
            );
            return CheckOutcome::Superseded;
        }

        if ticket.doc_version != state.doc_version() {
            // Not a discard: the factory clamps stale spans against the current text.
            log::debug!(
                "applying check result from doc version {} at version {}",
                ticket.doc_version,
                state.doc_version()
            );
        }

        self.last_applied = Some(ticket.generation);
        state.apply_check_result(findings);
        CheckOutcome::Applied
    }

    /// Deliver a completed check from the linter's raw JSON payload.
    ///
    /// Parse errors are reported to the caller; stale/superseded results are silent no-ops,
    /// as in [`CheckSession::complete`].
    pub fn complete_payload(
        &mut self,
        ticket: CheckTicket,
        state: &mut OverlayState,
        payload: &Value,
    ) -> Result<CheckOutcome, PayloadError> {
        let findings = findings_from_payload(payload)?;
        Ok(self.complete(ticket, state, findings))
    }
}

//! Finding navigation.
//!
//! Given a finding (typically picked from the panel), compute where it lives in the *current*
//! document and ask the host to scroll there. Offsets captured at check time may be stale, so
//! resolution always happens at call time.

use crate::alerts::FindingId;
use crate::position;
use crate::state::OverlayState;
use crate::store::Effect;

/// A request for the host editor to bring a region into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    /// Start character offset of the target region.
    pub from: usize,
    /// End character offset of the target region (may equal `from` for a collapsed span).
    pub to: usize,
    /// Whether the host should center the region in the viewport.
    pub center: bool,
}

/// Compute the scroll target for `finding` and optionally select it.
///
/// Returns `None` (a no-op) when the id no longer resolves, e.g. a panel entry from a
/// superseded check. Offsets are re-resolved against the current document, so the target is
/// correct even after edits moved the flagged text.
pub fn scroll_to(state: &mut OverlayState, id: &FindingId, select: bool) -> Option<ScrollRequest> {
    let finding = state.registry().get(id)?;
    let doc = state.document();
    let from = position::resolve_offset(doc, finding.line, finding.span.start);
    let to = position::resolve_offset(doc, finding.line, finding.span.end);

    if select {
        state.apply_effect(Effect::Select(Some(id.clone())));
    }

    Some(ScrollRequest {
        from,
        to,
        center: true,
    })
}

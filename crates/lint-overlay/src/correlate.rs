//! Interaction-to-finding correlation.
//!
//! Resolves a document offset (the host maps screen coordinates to offsets before calling in)
//! to the visual range under it, then to the originating finding, and drives the selection
//! channel plus the panel-facing notifications.

use crate::alerts::{Finding, FindingId};
use crate::state::OverlayState;
use crate::store::Effect;

/// Notification for the panel collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// A finding was selected; carries the full record for display.
    Selected(Finding),
    /// The selection was cleared (interaction outside any decoration, or a stale id).
    Deselected,
}

/// Resolve the finding under `offset`, without side effects.
///
/// Zero-width query against the current set; when ranges stack (two rules flagging the same or
/// nested spans), the first in `(from, to)` sort order wins.
pub fn resolve_at(state: &OverlayState, offset: usize) -> Option<FindingId> {
    state
        .store()
        .set()
        .at_offset(offset)
        .first()
        .map(|range| range.finding.clone())
}

/// Handle a click/tap at `offset`: update the selection channel and report what the panel
/// should show.
///
/// A hit dispatches `Select(id)` and returns the full finding; a miss (or a range whose id no
/// longer resolves after a registry reset) dispatches `Select(None)` and returns
/// [`PanelEvent::Deselected`]. A stale id is a no-op, never an error.
pub fn select_at(state: &mut OverlayState, offset: usize) -> PanelEvent {
    match resolve_at(state, offset) {
        Some(id) => match state.registry().get(&id).cloned() {
            Some(finding) => {
                state.apply_effect(Effect::Select(Some(id)));
                PanelEvent::Selected(finding)
            }
            None => {
                log::debug!("range under cursor has stale finding id {id}, deselecting");
                state.apply_effect(Effect::Select(None));
                PanelEvent::Deselected
            }
        },
        None => {
            state.apply_effect(Effect::Select(None));
            PanelEvent::Deselected
        }
    }
}

/// Resolve the finding under `offset` for hover/tooltip display. No state transition.
pub fn finding_at(state: &OverlayState, offset: usize) -> Option<&Finding> {
    let id = resolve_at(state, offset)?;
    state.registry().get(&id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{ByteSpan, Severity};

    fn finding(line: usize, start: usize, end: usize, matched: &str) -> Finding {
        Finding {
            line,
            span: ByteSpan::new(start, end),
            severity: Severity::Warning,
            matched: matched.to_string(),
            message: format!("avoid '{matched}'"),
            rule: None,
        }
    }

    fn checked_state() -> OverlayState {
        let mut state = OverlayState::new("very bad and just wrong");
        state.apply_check_result(vec![
            finding(0, 0, 4, "very"),
            finding(0, 13, 17, "just"),
        ]);
        state
    }

    #[test]
    fn click_on_mark_selects_and_notifies() {
        let mut state = checked_state();
        let event = select_at(&mut state, 2);
        match event {
            PanelEvent::Selected(found) => assert_eq!(found.matched, "very"),
            PanelEvent::Deselected => panic!("expected a selection"),
        }
        assert!(state.store().set().selected().is_some());
    }

    #[test]
    fn click_outside_marks_deselects() {
        let mut state = checked_state();
        select_at(&mut state, 2);
        let event = select_at(&mut state, 8);
        assert_eq!(event, PanelEvent::Deselected);
        assert!(state.store().set().selected().is_none());
    }

    #[test]
    fn selection_moves_between_findings() {
        let mut state = checked_state();
        select_at(&mut state, 2);
        select_at(&mut state, 14);
        let selected = state.store().set().selected().unwrap();
        assert_eq!((selected.from, selected.to), (13, 17));
        assert_eq!(
            state.store().set().ranges().iter().filter(|r| r.selected).count(),
            1
        );
    }

    #[test]
    fn stacked_ranges_resolve_to_first_in_sort_order() {
        let mut state = OverlayState::new("irregardless");
        let outer = finding(0, 0, 12, "irregardless");
        let inner = finding(0, 0, 5, "irreg");
        state.apply_check_result(vec![outer, inner.clone()]);
        // Shorter span sorts first on equal `from`.
        assert_eq!(resolve_at(&state, 2), Some(inner.id()));
    }

    #[test]
    fn stale_range_id_is_a_no_op_deselect() {
        let mut state = checked_state();
        // Reset the registry without rebuilding marks: ids in the store go stale.
        state.registry_mut().reset([]);
        let event = select_at(&mut state, 2);
        assert_eq!(event, PanelEvent::Deselected);
        assert!(state.store().set().selected().is_none());
    }

    #[test]
    fn hover_resolves_without_state_change() {
        let state = checked_state();
        let version = state.store().version();
        let found = finding_at(&state, 14).expect("hover hit");
        assert_eq!(found.message, "avoid 'just'");
        assert_eq!(state.store().version(), version);
    }

    #[test]
    fn hover_outside_marks_is_none() {
        let state = checked_state();
        assert!(finding_at(&state, 8).is_none());
    }

    #[test]
    fn query_respects_exclusive_end() {
        let state = checked_state();
        assert!(resolve_at(&state, 4).is_none());
        assert!(resolve_at(&state, 3).is_some());
    }
}

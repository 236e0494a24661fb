//! Host interaction handlers.
//!
//! Thin wrappers over the core correlator for the host's pointer and hover plumbing. The host
//! converts screen coordinates to document offsets (that mapping needs its layout engine) and
//! calls in here; everything below is offset-based and unit-testable without a live editor.

use lint_overlay::{Finding, OverlayState, PanelEvent, Severity};

/// Handle a pointer click at a document offset.
///
/// Updates the selection channel and returns the event the panel collaborator should receive:
/// [`PanelEvent::Selected`] with the full finding on a hit, [`PanelEvent::Deselected`]
/// otherwise.
pub fn handle_click(state: &mut OverlayState, offset: usize) -> PanelEvent {
    lint_overlay::select_at(state, offset)
}

/// Tooltip content for a hover hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    /// The linter's message for the finding.
    pub message: String,
    /// Rule identifier, when the linter provided one.
    pub rule: Option<String>,
    /// Finding severity, for tooltip styling.
    pub severity: Severity,
}

impl HoverInfo {
    fn from_finding(finding: &Finding) -> Self {
        Self {
            message: finding.message.clone(),
            rule: finding.rule.clone(),
            severity: finding.severity,
        }
    }
}

/// Resolve hover content at a document offset. No state transition.
pub fn hover_at(state: &OverlayState, offset: usize) -> Option<HoverInfo> {
    lint_overlay::finding_at(state, offset).map(HoverInfo::from_finding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lint_overlay::{ByteSpan, Finding};

    fn checked_state() -> OverlayState {
        let mut state = OverlayState::new("very bad text");
        state.apply_check_result(vec![Finding {
            line: 0,
            span: ByteSpan::new(0, 4),
            severity: Severity::Suggestion,
            matched: "very".to_string(),
            message: "Consider removing 'very'.".to_string(),
            rule: Some("Style.Weasel".to_string()),
        }]);
        state
    }

    #[test]
    fn click_selects_and_reports() {
        let mut state = checked_state();
        match handle_click(&mut state, 1) {
            PanelEvent::Selected(finding) => assert_eq!(finding.matched, "very"),
            PanelEvent::Deselected => panic!("expected a hit"),
        }
        assert!(state.store().set().selected().is_some());
    }

    #[test]
    fn click_miss_deselects() {
        let mut state = checked_state();
        handle_click(&mut state, 1);
        assert_eq!(handle_click(&mut state, 10), PanelEvent::Deselected);
        assert!(state.store().set().selected().is_none());
    }

    #[test]
    fn hover_returns_tooltip_content() {
        let state = checked_state();
        let info = hover_at(&state, 2).expect("hover hit");
        assert_eq!(info.message, "Consider removing 'very'.");
        assert_eq!(info.rule.as_deref(), Some("Style.Weasel"));
        assert_eq!(info.severity, Severity::Suggestion);
    }

    #[test]
    fn hover_miss_is_none() {
        let state = checked_state();
        assert!(hover_at(&state, 10).is_none());
    }
}

//! Visual ranges and the finding-to-decoration factory.
//!
//! A [`VisualRange`] is one rendered highlight over a character range, tagged with the
//! originating finding, a severity class for styling, and its interaction state. The factory
//! ([`build_marks`]) turns a check's findings into visual ranges against the current document.

use crate::alerts::{Finding, FindingId, Severity};
use crate::document::Document;
use crate::position;

/// Default CSS-like class for error findings.
pub const ERROR_CLASS: &str = "lint-error";
/// Default CSS-like class for warning findings.
pub const WARNING_CLASS: &str = "lint-warning";
/// Default CSS-like class for suggestion findings.
pub const SUGGESTION_CLASS: &str = "lint-suggestion";

/// Severity-to-visual-class mapping.
///
/// Hosts that style the defaults directly can use [`SeverityClassTable::default`]; hosts with
/// their own theme substitute per-severity classes via [`SeverityClassTable::with_class`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityClassTable {
    error: String,
    warning: String,
    suggestion: String,
}

impl Default for SeverityClassTable {
    fn default() -> Self {
        Self {
            error: ERROR_CLASS.to_string(),
            warning: WARNING_CLASS.to_string(),
            suggestion: SUGGESTION_CLASS.to_string(),
        }
    }
}

impl SeverityClassTable {
    /// The class for a severity.
    pub fn class_for(&self, severity: Severity) -> &str {
        match severity {
            Severity::Error => &self.error,
            Severity::Warning => &self.warning,
            Severity::Suggestion => &self.suggestion,
        }
    }

    /// Replace the class for one severity.
    pub fn with_class(mut self, severity: Severity, class: impl Into<String>) -> Self {
        match severity {
            Severity::Error => self.error = class.into(),
            Severity::Warning => self.warning = class.into(),
            Severity::Suggestion => self.suggestion = class.into(),
        }
        self
    }
}

/// A rendered highlight over a half-open character range `[from, to)`.
///
/// Invariant at creation: `from < to` and `to ≤ document length` (the factory drops anything
/// else). Selection and highlight are independent channels; the store guarantees at most one
/// range carries each at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRange {
    /// Start character offset (inclusive).
    pub from: usize,
    /// End character offset (exclusive).
    pub to: usize,
    /// Id of the originating finding.
    pub finding: FindingId,
    /// Severity class tag used by the renderer.
    pub class: String,
    /// Whether this range is the current selection.
    pub selected: bool,
    /// Whether this range is the current hover/panel highlight.
    pub highlighted: bool,
}

impl VisualRange {
    /// Create a new range in the normal state.
    pub fn new(from: usize, to: usize, finding: FindingId, class: impl Into<String>) -> Self {
        Self {
            from,
            to,
            finding,
            class: class.into(),
            selected: false,
            highlighted: false,
        }
    }

    /// Zero-width containment test: does this range cover `offset`?
    pub fn contains(&self, offset: usize) -> bool {
        self.from <= offset && offset < self.to
    }

    /// Does this range overlap the half-open range `[from, to)`?
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        self.from < to && from < self.to
    }
}

/// Build one visual range per finding against the current document.
///
/// Findings whose spans resolve to a degenerate range (`from >= to`, e.g. an empty match or a
/// span clamped away because the document changed since the check was requested) are skipped
/// with a debug log; they stay resolvable in the registry for panel display. Two findings that
/// resolve to the same range both survive as independent ranges.
pub fn build_marks(
    findings: &[Finding],
    doc: &Document,
    classes: &SeverityClassTable,
) -> Vec<VisualRange> {
    let mut out = Vec::with_capacity(findings.len());
    for finding in findings {
        let from = position::resolve_offset(doc, finding.line, finding.span.start);
        let to = position::resolve_offset(doc, finding.line, finding.span.end);
        if from >= to {
            log::debug!(
                "skipping finding {} with degenerate range {}..{}",
                finding.id(),
                from,
                to
            );
            continue;
        }
        out.push(VisualRange::new(
            from,
            to,
            finding.id(),
            classes.class_for(finding.severity),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::ByteSpan;

    fn finding(line: usize, start: usize, end: usize, matched: &str, severity: Severity) -> Finding {
        Finding {
            line,
            span: ByteSpan::new(start, end),
            severity,
            matched: matched.to_string(),
            message: String::new(),
            rule: None,
        }
    }

    #[test]
    fn builds_one_range_per_finding() {
        let doc = Document::from_text("very bad and very wrong");
        let findings = vec![
            finding(0, 0, 4, "very", Severity::Warning),
            finding(0, 13, 17, "very", Severity::Error),
        ];
        let marks = build_marks(&findings, &doc, &SeverityClassTable::default());
        assert_eq!(marks.len(), 2);
        assert_eq!((marks[0].from, marks[0].to), (0, 4));
        assert_eq!(marks[0].class, WARNING_CLASS);
        assert_eq!((marks[1].from, marks[1].to), (13, 17));
        assert_eq!(marks[1].class, ERROR_CLASS);
    }

    #[test]
    fn multibyte_spans_resolve_to_char_offsets() {
        let doc = Document::from_text("Hello wörld");
        let findings = vec![finding(0, 6, 12, "wörld", Severity::Suggestion)];
        let marks = build_marks(&findings, &doc, &SeverityClassTable::default());
        assert_eq!((marks[0].from, marks[0].to), (6, 11));
    }

    #[test]
    fn degenerate_ranges_are_dropped() {
        let doc = Document::from_text("short");
        let findings = vec![
            finding(0, 3, 3, "", Severity::Warning), // empty match
            finding(0, 20, 25, "gone", Severity::Warning), // clamped off the line
            finding(0, 0, 5, "short", Severity::Warning),
        ];
        let marks = build_marks(&findings, &doc, &SeverityClassTable::default());
        assert_eq!(marks.len(), 1);
        assert_eq!((marks[0].from, marks[0].to), (0, 5));
    }

    #[test]
    fn identical_ranges_both_survive() {
        let doc = Document::from_text("irregardless");
        let findings = vec![
            finding(0, 0, 12, "irregardless", Severity::Error),
            finding(0, 0, 12, "irregardless!", Severity::Suggestion),
        ];
        let marks = build_marks(&findings, &doc, &SeverityClassTable::default());
        assert_eq!(marks.len(), 2);
        assert_ne!(marks[0].finding, marks[1].finding);
    }

    #[test]
    fn custom_classes_substitute_defaults() {
        let doc = Document::from_text("very");
        let classes =
            SeverityClassTable::default().with_class(Severity::Warning, "theme-squiggle");
        let findings = vec![finding(0, 0, 4, "very", Severity::Warning)];
        let marks = build_marks(&findings, &doc, &classes);
        assert_eq!(marks[0].class, "theme-squiggle");
    }
}

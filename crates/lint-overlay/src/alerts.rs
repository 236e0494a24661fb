//! Finding data model and the per-check alert registry.
//!
//! A [`Finding`] is one reported issue from the external prose linter. Findings are immutable
//! once received; the [`AlertRegistry`] maps their deterministic ids back to the full records
//! for panel display and navigation.
//!
//! The registry's lifecycle is **reset on check**: every completed check replaces the whole
//! table atomically, and ids from a previous check become unresolvable immediately afterwards.
//! Consumers must treat a missing lookup as "no-op", never as an error.

use std::collections::HashMap;
use std::fmt;

/// Finding severity, as reported by the linter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// An error-level finding.
    Error,
    /// A warning-level finding.
    Warning,
    /// A suggestion-level finding.
    Suggestion,
}

/// A half-open `[start, end)` byte span within a single line.
///
/// Offsets are 0-based UTF-8 byte offsets from the start of the line (the linter's 1-based
/// inclusive spans are converted at the payload boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl ByteSpan {
    /// Create a new byte span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One reported issue from the external linter. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Line containing the span, 0-based (converted from the linter's 1-based lines at the
    /// payload boundary).
    pub line: usize,
    /// Byte span of the flagged text within the line.
    pub span: ByteSpan,
    /// Severity reported by the linter.
    pub severity: Severity,
    /// The exact text the linter matched.
    pub matched: String,
    /// Human-readable message. Opaque to the overlay engine.
    pub message: String,
    /// Rule identifier (e.g. `"Style.Weasel"`), if the linter provided one.
    pub rule: Option<String>,
}

impl Finding {
    /// The deterministic id for this finding. See [`FindingId`].
    pub fn id(&self) -> FindingId {
        FindingId::of(self)
    }
}

/// Deterministic finding identifier.
///
/// Derived from (line, byte span, matched text), so it is stable across re-renders of the same
/// check result. It is **not** stable across successive checks: after a registry reset, old ids
/// simply stop resolving. Two findings from one check share an id only if they are genuine
/// duplicates, in which case the registry keeps the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FindingId(String);

impl FindingId {
    /// Derive the id for a finding.
    pub fn of(finding: &Finding) -> Self {
        Self(format!(
            "{}:{}-{}:{}",
            finding.line, finding.span.start, finding.span.end, finding.matched
        ))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Id-to-finding table for the most recent check.
///
/// Single writer (the check-completion handler, via [`AlertRegistry::reset`]); shared readers
/// (correlation, navigation, the panel collaborator). A check result is all-or-nothing: there
/// are no partial updates.
#[derive(Debug, Default)]
pub struct AlertRegistry {
    findings: HashMap<FindingId, Finding>,
}

impl AlertRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire table with the findings of a new check.
    ///
    /// The new table is built first and swapped in whole, so readers never observe a partially
    /// populated check. Duplicate ids follow last-write-wins.
    pub fn reset(&mut self, findings: impl IntoIterator<Item = Finding>) {
        let mut next = HashMap::new();
        for finding in findings {
            next.insert(finding.id(), finding);
        }
        self.findings = next;
    }

    /// Look up a finding by id. Ids from a previous check return `None`.
    pub fn get(&self, id: &FindingId) -> Option<&Finding> {
        self.findings.get(id)
    }

    /// Number of findings in the current check.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Returns `true` if the current check had no findings.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Iterate over the current check's findings (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&FindingId, &Finding)> {
        self.findings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(line: usize, start: usize, end: usize, matched: &str) -> Finding {
        Finding {
            line,
            span: ByteSpan::new(start, end),
            severity: Severity::Warning,
            matched: matched.to_string(),
            message: format!("avoid '{matched}'"),
            rule: Some("Style.Test".to_string()),
        }
    }

    #[test]
    fn id_is_deterministic() {
        let a = finding(3, 5, 9, "very");
        let b = finding(3, 5, 9, "very");
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn distinct_findings_get_distinct_ids() {
        let a = finding(3, 5, 9, "very");
        let b = finding(3, 5, 9, "just");
        let c = finding(4, 5, 9, "very");
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[test]
    fn reset_replaces_everything() {
        let mut registry = AlertRegistry::new();
        let old = finding(1, 0, 4, "very");
        registry.reset([old.clone()]);
        assert!(registry.get(&old.id()).is_some());

        let new = finding(2, 3, 7, "just");
        registry.reset([new.clone()]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&old.id()).is_none(), "stale id must not resolve");
        assert_eq!(registry.get(&new.id()), Some(&new));
    }

    #[test]
    fn duplicate_ids_last_write_wins() {
        let mut registry = AlertRegistry::new();
        let mut first = finding(1, 0, 4, "very");
        first.message = "first".to_string();
        let mut second = finding(1, 0, 4, "very");
        second.message = "second".to_string();

        registry.reset([first.clone(), second.clone()]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(&first.id()).unwrap().message, "second");
    }

    #[test]
    fn empty_check_is_valid() {
        let mut registry = AlertRegistry::new();
        registry.reset([finding(1, 0, 4, "very")]);
        registry.reset([]);
        assert!(registry.is_empty());
    }
}

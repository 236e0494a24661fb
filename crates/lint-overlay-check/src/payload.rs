//! Linter payload parsing.
//!
//! Parses the prose linter's JSON alert output into [`Finding`]s. Like the rest of this crate,
//! it works on raw `serde_json::Value` rather than a typed protocol crate: the linter's schema
//! is small and loosely specified across versions, and consumers may need to carry unknown
//! fields through.
//!
//! This is the **boundary** where the linter's coordinate conventions are normalized, exactly
//! once:
//! - 1-based lines become 0-based;
//! - 1-based *inclusive* byte spans (`Span: [7, 12]`) become 0-based half-open
//!   (`[6, 12)`).
//!
//! A malformed alert is skipped with a log line; it must not block the rest of the check's
//! results from rendering.

use lint_overlay::{ByteSpan, Finding, Severity};
use serde_json::Value;
use thiserror::Error;

/// Error for payloads that cannot be interpreted as a check result at all.
///
/// Individual malformed alerts are not errors; they are skipped.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload was not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload's root was not an array of alerts.
    #[error("expected an array of alerts, got {0}")]
    NotAnArray(&'static str),
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn parse_severity(value: &Value) -> Option<Severity> {
    match value.as_str()?.to_ascii_lowercase().as_str() {
        "error" => Some(Severity::Error),
        "warning" => Some(Severity::Warning),
        "suggestion" => Some(Severity::Suggestion),
        _ => None,
    }
}

/// Parse one alert object. `None` means "skip this alert".
fn parse_alert(alert: &Value) -> Option<Finding> {
    let line = alert.get("Line")?.as_u64()? as usize;
    if line == 0 {
        // Lines are 1-based on the wire; 0 is malformed.
        return None;
    }

    let span = alert.get("Span")?.as_array()?;
    let start = span.first()?.as_u64()? as usize;
    let end = span.get(1)?.as_u64()? as usize;
    if start == 0 || end < start {
        return None;
    }

    let severity = parse_severity(alert.get("Severity")?)?;
    let matched = alert.get("Match")?.as_str()?.to_string();
    let message = alert
        .get("Message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let rule = alert
        .get("Check")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(Finding {
        line: line - 1,
        // 1-based inclusive [start, end] -> 0-based half-open [start - 1, end).
        span: ByteSpan::new(start - 1, end),
        severity,
        matched,
        message,
        rule,
    })
}

/// Parse a check result payload (an array of alert objects) into findings.
///
/// An empty array is a valid "no issues" result. Malformed individual alerts are skipped with
/// a warning log; only a payload that is not an array at all is an error.
pub fn findings_from_payload(payload: &Value) -> Result<Vec<Finding>, PayloadError> {
    let alerts = payload
        .as_array()
        .ok_or_else(|| PayloadError::NotAnArray(value_kind(payload)))?;

    let mut findings = Vec::with_capacity(alerts.len());
    for (index, alert) in alerts.iter().enumerate() {
        match parse_alert(alert) {
            Some(finding) => findings.push(finding),
            None => log::warn!("skipping malformed alert at index {index}: {alert}"),
        }
    }
    Ok(findings)
}

/// Parse a check result from raw JSON text.
pub fn findings_from_str(payload: &str) -> Result<Vec<Finding>, PayloadError> {
    let value: Value = serde_json::from_str(payload)?;
    findings_from_payload(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_a_complete_alert() {
        let payload = json!([{
            "Line": 3,
            "Span": [5, 8],
            "Severity": "warning",
            "Match": "very",
            "Message": "Consider removing 'very'.",
            "Check": "Style.Weasel",
        }]);
        let findings = findings_from_payload(&payload).unwrap();
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.line, 2, "1-based line becomes 0-based");
        assert_eq!((f.span.start, f.span.end), (4, 8), "inclusive span becomes half-open");
        assert_eq!(f.severity, Severity::Warning);
        assert_eq!(f.matched, "very");
        assert_eq!(f.rule.as_deref(), Some("Style.Weasel"));
    }

    #[test]
    fn span_conversion_matches_multibyte_expectations() {
        // "Hello wörld": the linter flags "wörld" as Line 1, Span [7, 12]. After conversion
        // the byte span is [6, 12), which resolves to character offsets [6, 11).
        let payload = json!([{
            "Line": 1,
            "Span": [7, 12],
            "Severity": "error",
            "Match": "wörld",
        }]);
        let findings = findings_from_payload(&payload).unwrap();
        let f = &findings[0];
        assert_eq!((f.line, f.span.start, f.span.end), (0, 6, 12));

        let doc = lint_overlay::Document::from_text("Hello wörld");
        let from = lint_overlay::resolve_offset(&doc, f.line, f.span.start);
        let to = lint_overlay::resolve_offset(&doc, f.line, f.span.end);
        assert_eq!((from, to), (6, 11));
    }

    #[test]
    fn severity_is_case_insensitive() {
        let payload = json!([
            {"Line": 1, "Span": [1, 2], "Severity": "Error", "Match": "a"},
            {"Line": 1, "Span": [3, 4], "Severity": "SUGGESTION", "Match": "b"},
        ]);
        let findings = findings_from_payload(&payload).unwrap();
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[1].severity, Severity::Suggestion);
    }

    #[test]
    fn empty_array_is_no_issues() {
        assert!(findings_from_payload(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn malformed_alerts_are_skipped_not_fatal() {
        let payload = json!([
            {"Line": 0, "Span": [1, 4], "Severity": "warning", "Match": "x"}, // bad line
            {"Line": 2, "Span": [4, 1], "Severity": "warning", "Match": "x"}, // end < start
            {"Line": 2, "Span": [1, 4], "Severity": "loud", "Match": "x"},    // unknown severity
            {"Line": 2, "Severity": "warning", "Match": "x"},                 // missing span
            "not even an object",
            {"Line": 2, "Span": [1, 4], "Severity": "warning", "Match": "ok"},
        ]);
        let findings = findings_from_payload(&payload).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].matched, "ok");
    }

    #[test]
    fn non_array_root_is_an_error() {
        let err = findings_from_payload(&json!({"Alerts": []})).unwrap_err();
        assert!(matches!(err, PayloadError::NotAnArray("an object")));
    }

    #[test]
    fn parses_from_raw_text() {
        let findings =
            findings_from_str(r#"[{"Line": 1, "Span": [1, 3], "Severity": "error", "Match": "ab"}]"#)
                .unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings_from_str("not json").is_err());
    }
}

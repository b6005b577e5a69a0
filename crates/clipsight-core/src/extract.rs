use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::types::{AnalysisOutcome, AnalysisSegment};

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap());
static ANY_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").unwrap());

/// Interpret an analysis description string defensively.
///
/// The server embeds its segment list in freeform model output, usually (but
/// not reliably) inside a ```` ```json ```` fence. This never fails: anything
/// that does not parse comes back as [`AnalysisOutcome::OtherJson`] or
/// [`AnalysisOutcome::Unparsed`] so the caller can still show it.
pub fn extract_analysis(desc: &str) -> AnalysisOutcome {
    let candidate = fenced_candidate(desc).unwrap_or_else(|| desc.trim());

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Array(items)) => {
            AnalysisOutcome::Segments(items.iter().map(segment_from_value).collect())
        }
        Ok(_) => AnalysisOutcome::OtherJson(candidate.to_string()),
        Err(_) => AnalysisOutcome::Unparsed(candidate.to_string()),
    }
}

/// Body of the first fenced block, if any. A `json`-tagged fence anywhere in
/// the text wins over an untagged one.
fn fenced_candidate(desc: &str) -> Option<&str> {
    JSON_FENCE
        .captures(desc)
        .or_else(|| ANY_FENCE.captures(desc))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Read the three expected fields straight off the element. String values are
/// kept verbatim; any other present value (null included) renders as its JSON
/// text, so a missing field stays distinguishable from an explicit null.
fn segment_from_value(value: &Value) -> AnalysisSegment {
    AnalysisSegment {
        start_time: field_text(value, "start_time"),
        end_time: field_text(value, "end_time"),
        description: field_text(value, "description"),
    }
}

fn field_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: &str, end: &str, desc: &str) -> AnalysisSegment {
        AnalysisSegment {
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            description: Some(desc.to_string()),
        }
    }

    #[test]
    fn json_fence_parses_to_segments() {
        let desc = "```json\n[{\"start_time\":\"0:00\",\"end_time\":\"0:05\",\"description\":\"intro\"}]\n```";
        assert_eq!(
            extract_analysis(desc),
            AnalysisOutcome::Segments(vec![segment("0:00", "0:05", "intro")])
        );
    }

    #[test]
    fn untagged_fence_body_is_the_candidate() {
        assert_eq!(
            extract_analysis("```\nnot json\n```"),
            AnalysisOutcome::Unparsed("not json".to_string())
        );
    }

    #[test]
    fn plain_text_without_fence() {
        assert_eq!(
            extract_analysis("plain text, no fence"),
            AnalysisOutcome::Unparsed("plain text, no fence".to_string())
        );
    }

    #[test]
    fn bare_object_is_other_json() {
        assert_eq!(
            extract_analysis("{\"a\":1}"),
            AnalysisOutcome::OtherJson("{\"a\":1}".to_string())
        );
    }

    #[test]
    fn bare_scalar_is_other_json() {
        assert_eq!(
            extract_analysis("5"),
            AnalysisOutcome::OtherJson("5".to_string())
        );
    }

    #[test]
    fn json_tag_wins_over_earlier_untagged_fence() {
        let desc = "```\n{\"a\":1}\n```\nand then\n```json\n[]\n```";
        assert_eq!(extract_analysis(desc), AnalysisOutcome::Segments(vec![]));
    }

    #[test]
    fn only_first_fence_is_used() {
        let desc = "```json\n[]\n```\ntrailing\n```json\n{\"a\":1}\n```";
        assert_eq!(extract_analysis(desc), AnalysisOutcome::Segments(vec![]));
    }

    #[test]
    fn fence_body_is_trimmed_before_parsing() {
        let desc = "leading prose\n```json\n\n  [{\"start_time\":\"0:01\",\"end_time\":\"0:02\",\"description\":\"x\"}]  \n\n```\ntrailing prose";
        assert_eq!(
            extract_analysis(desc),
            AnalysisOutcome::Segments(vec![segment("0:01", "0:02", "x")])
        );
    }

    #[test]
    fn non_string_and_missing_fields_are_preserved() {
        let desc = r#"[{"start_time": 5, "end_time": null}]"#;
        assert_eq!(
            extract_analysis(desc),
            AnalysisOutcome::Segments(vec![AnalysisSegment {
                start_time: Some("5".to_string()),
                end_time: Some("null".to_string()),
                description: None,
            }])
        );
    }

    #[test]
    fn non_object_elements_yield_empty_segments() {
        assert_eq!(
            extract_analysis(r#"["hello", 3]"#),
            AnalysisOutcome::Segments(vec![
                AnalysisSegment { start_time: None, end_time: None, description: None },
                AnalysisSegment { start_time: None, end_time: None, description: None },
            ])
        );
    }

    #[test]
    fn empty_input_is_unparsed() {
        assert_eq!(extract_analysis(""), AnalysisOutcome::Unparsed(String::new()));
    }

    #[test]
    fn extraction_is_deterministic() {
        let desc = "```json\n[{\"start_time\":\"0:00\",\"end_time\":\"0:05\",\"description\":\"intro\"}]\n```";
        assert_eq!(extract_analysis(desc), extract_analysis(desc));
    }

    #[test]
    fn fence_with_other_language_tag_falls_back_to_untagged_match() {
        assert_eq!(
            extract_analysis("```python\nprint(1)\n```"),
            AnalysisOutcome::Unparsed("python\nprint(1)".to_string())
        );
    }
}

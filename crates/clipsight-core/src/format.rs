use crate::types::{AnalysisOutcome, AnalysisSegment};

/// Diagnostic line shown when the candidate text was not valid JSON. The
/// wording is part of the displayed contract and is matched by downstream
/// tooling, so it stays verbatim.
pub const PARSE_FAILURE_LINE: &str = "Not able to parse jsonStr to array";

/// Token rendered for a field the server left out of a segment record.
pub const ABSENT_FIELD: &str = "undefined";

/// Format one segment as `"{start_time} - {end_time} : {description}"`.
pub fn format_segment_line(segment: &AnalysisSegment) -> String {
    format!(
        "{} - {} : {}",
        segment.start_time.as_deref().unwrap_or(ABSENT_FIELD),
        segment.end_time.as_deref().unwrap_or(ABSENT_FIELD),
        segment.description.as_deref().unwrap_or(ABSENT_FIELD),
    )
}

/// Map an extraction outcome to the lines shown to the user.
///
/// Parse failures stay visible: the raw candidate is printed after a
/// diagnostic line rather than being swallowed.
pub fn display_lines(outcome: &AnalysisOutcome) -> Vec<String> {
    match outcome {
        AnalysisOutcome::Segments(segments) => {
            segments.iter().map(format_segment_line).collect()
        }
        AnalysisOutcome::OtherJson(text) => vec![text.clone()],
        AnalysisOutcome::Unparsed(text) => {
            vec![PARSE_FAILURE_LINE.to_string(), text.clone()]
        }
    }
}

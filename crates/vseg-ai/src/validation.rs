//! Re-validation of the model's reply.
//!
//! The schema directive is a request, not a guarantee, so every reply is
//! checked here before it reaches callers.

use serde_json::{Map, Value};
use vseg_models::{validate_timestamps, SegmentResult, SEGMENT_RESULT_FIELDS};

use crate::error::AnalysisFailure;

/// Parse the model's text into validated segment results.
///
/// The text is trimmed and may be wrapped in a Markdown code fence. The
/// root must be an array of objects, each carrying every field as a
/// non-blank string. Timestamps must parse with start before end, with
/// minutes and seconds below 60 after a leading component. They are
/// returned normalized to `HH:MM:SS`, with `.mmm` kept only for fractional
/// seconds. Unknown extra fields are ignored.
pub fn parse_segment_results(text: &str) -> Result<Vec<SegmentResult>, AnalysisFailure> {
    let json = strip_code_fence(text.trim());
    let root: Value =
        serde_json::from_str(json).map_err(|e| AnalysisFailure::MalformedJson(e.to_string()))?;

    let items = root.as_array().ok_or_else(|| {
        AnalysisFailure::SchemaMismatch(format!("expected a JSON array, got {}", kind_of(&root)))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| segment_from_value(index, item))
        .collect()
}

fn strip_code_fence(text: &str) -> &str {
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

fn segment_from_value(index: usize, item: &Value) -> Result<SegmentResult, AnalysisFailure> {
    let object = item.as_object().ok_or_else(|| {
        AnalysisFailure::SchemaMismatch(format!(
            "result {} is {}, expected an object",
            index,
            kind_of(item)
        ))
    })?;

    let [question, start, end, reasoning] = SEGMENT_RESULT_FIELDS;
    let question = string_field(object, index, question)?;
    let start = string_field(object, index, start)?;
    let end = string_field(object, index, end)?;
    let reasoning = string_field(object, index, reasoning)?;

    let times = validate_timestamps(&start, &end, None).map_err(|e| {
        AnalysisFailure::InvalidTimestamps {
            index,
            reason: e.to_string(),
        }
    })?;

    Ok(SegmentResult::new(question, times.start, times.end, reasoning))
}

fn string_field(
    object: &Map<String, Value>,
    index: usize,
    name: &str,
) -> Result<String, AnalysisFailure> {
    match object.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::String(_)) => Err(AnalysisFailure::SchemaMismatch(format!(
            "result {} has an empty `{}`",
            index, name
        ))),
        Some(other) => Err(AnalysisFailure::SchemaMismatch(format!(
            "`{}` in result {} is {}, expected a string",
            name,
            index,
            kind_of(other)
        ))),
        None => Err(AnalysisFailure::SchemaMismatch(format!(
            "result {} is missing `{}`",
            index, name
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Describe how `results` fail to line up with `questions`, if they do.
///
/// Checks that the counts match and that every result echoes one of the
/// submitted questions (trimmed text comparison).
pub fn correspondence_mismatch(questions: &[String], results: &[SegmentResult]) -> Option<String> {
    let mut problems = Vec::new();

    if results.len() != questions.len() {
        problems.push(format!(
            "expected {} results, got {}",
            questions.len(),
            results.len()
        ));
    }

    let unknown: Vec<&str> = results
        .iter()
        .filter(|r| !questions.iter().any(|q| r.answers(q)))
        .map(|r| r.question.as_str())
        .collect();
    if !unknown.is_empty() {
        problems.push(format!("unrecognized questions {:?}", unknown));
    }

    if problems.is_empty() {
        None
    } else {
        Some(problems.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EIFFEL: &str = r#"[{"question":"When was the Eiffel Tower built?","startTime":"00:02:15","endTime":"00:02:45","reasoning":"Historical fact segment"}]"#;

    #[test]
    fn test_parses_valid_reply() {
        let results = parse_segment_results(&format!("  \n{}\n ", EIFFEL)).unwrap();
        assert_eq!(
            results,
            vec![SegmentResult::new(
                "When was the Eiffel Tower built?",
                "00:02:15",
                "00:02:45",
                "Historical fact segment"
            )]
        );
    }

    #[test]
    fn test_strips_code_fence() {
        let fenced = format!("```json\n{}\n```", EIFFEL);
        assert_eq!(parse_segment_results(&fenced).unwrap().len(), 1);
    }

    #[test]
    fn test_normalizes_short_timestamps() {
        let reply = r#"[{"question":"Q","startTime":"2:15","endTime":"165","reasoning":"r"}]"#;
        let results = parse_segment_results(reply).unwrap();
        assert_eq!(results[0].start_time, "00:02:15");
        assert_eq!(results[0].end_time, "00:02:45");
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(matches!(
            parse_segment_results("not json"),
            Err(AnalysisFailure::MalformedJson(_))
        ));
    }

    #[test]
    fn test_rejects_non_array_root() {
        assert!(matches!(
            parse_segment_results(r#"{"question":"Q"}"#),
            Err(AnalysisFailure::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_rejects_missing_field() {
        let reply = r#"[{"question":"Q","startTime":"00:00:01","endTime":"00:00:02"}]"#;
        let err = parse_segment_results(reply).unwrap_err();
        assert_eq!(
            err,
            AnalysisFailure::SchemaMismatch("result 0 is missing `reasoning`".to_string())
        );
    }

    #[test]
    fn test_rejects_blank_and_mistyped_fields() {
        let blank = r#"[{"question":"  ","startTime":"00:00:01","endTime":"00:00:02","reasoning":"r"}]"#;
        assert!(matches!(
            parse_segment_results(blank),
            Err(AnalysisFailure::SchemaMismatch(_))
        ));

        let number = r#"[{"question":"Q","startTime":1,"endTime":"00:00:02","reasoning":"r"}]"#;
        assert!(matches!(
            parse_segment_results(number),
            Err(AnalysisFailure::SchemaMismatch(_))
        ));

        assert!(matches!(
            parse_segment_results(r#"["Q"]"#),
            Err(AnalysisFailure::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_rejects_bad_timestamps() {
        let reversed = r#"[{"question":"Q","startTime":"00:00:05","endTime":"00:00:02","reasoning":"r"}]"#;
        assert!(matches!(
            parse_segment_results(reversed),
            Err(AnalysisFailure::InvalidTimestamps { index: 0, .. })
        ));

        let garbage = r#"[{"question":"Q","startTime":"soon","endTime":"later","reasoning":"r"}]"#;
        assert!(matches!(
            parse_segment_results(garbage),
            Err(AnalysisFailure::InvalidTimestamps { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_timestamps() {
        let reply = r#"[{"question":"Q","startTime":"00:01:75","endTime":"0:0:1e3","reasoning":"r"}]"#;
        let err = parse_segment_results(reply).unwrap_err();
        assert!(matches!(
            err,
            AnalysisFailure::InvalidTimestamps { index: 0, ref reason } if reason.contains("75")
        ));

        let exponent = r#"[{"question":"Q","startTime":"00:00:01","endTime":"0:0:1e3","reasoning":"r"}]"#;
        assert!(matches!(
            parse_segment_results(exponent),
            Err(AnalysisFailure::InvalidTimestamps { index: 0, .. })
        ));
    }

    #[test]
    fn test_keeps_fractional_seconds() {
        let reply = r#"[{"question":"Q","startTime":"00:02:15.5","endTime":"00:02:45","reasoning":"r"}]"#;
        let results = parse_segment_results(reply).unwrap();
        assert_eq!(results[0].start_time, "00:02:15.500");
        assert_eq!(results[0].end_time, "00:02:45");
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(parse_segment_results("[]").unwrap().is_empty());
    }

    #[test]
    fn test_correspondence() {
        let questions = vec!["Q1".to_string(), "Q2".to_string()];
        let both = vec![
            SegmentResult::new("Q2", "00:00:01", "00:00:02", "r"),
            SegmentResult::new("Q1", "00:00:03", "00:00:04", "r"),
        ];
        assert_eq!(correspondence_mismatch(&questions, &both), None);

        let short = vec![both[0].clone()];
        assert_eq!(
            correspondence_mismatch(&questions, &short).as_deref(),
            Some("expected 2 results, got 1")
        );

        let stranger = vec![
            both[0].clone(),
            SegmentResult::new("Q3", "00:00:01", "00:00:02", "r"),
        ];
        let mismatch = correspondence_mismatch(&questions, &stranger).unwrap();
        assert!(mismatch.contains("Q3"));
        assert!(!mismatch.contains("expected"));
    }
}

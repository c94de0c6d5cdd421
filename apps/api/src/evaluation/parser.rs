//! Response parsing — pulls the structured evaluation out of the model's raw reply.
//!
//! The model is told to answer with bare JSON but sometimes wraps it in prose or
//! code fences. We take the first balanced top-level `{...}` span and decode it.
//! One attempt only: a reply that does not decode is a parse failure carrying
//! the raw text, never a record with defaults filled in.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::evaluation::models::{Evaluation, EvaluationError};

static SCORE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ATS\s+Score\s*:\s*([0-9]+)").expect("score pattern is valid")
});

/// Returns the first balanced top-level `{...}` span, honouring JSON string
/// literals so braces inside strings do not count. `None` if there is no `{`
/// or the first one is never closed.
pub fn find_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses the model's raw reply into an `Evaluation`.
pub fn parse_evaluation(raw_text: &str) -> Result<Evaluation, EvaluationError> {
    let parse_error = |reason: String| EvaluationError::Parse {
        reason,
        raw_text: raw_text.to_string(),
    };

    let span = find_json_object(raw_text)
        .ok_or_else(|| parse_error("response contains no JSON object".to_string()))?;

    let evaluation: Evaluation =
        serde_json::from_str(span).map_err(|e| parse_error(format!("invalid evaluation JSON: {e}")))?;

    if evaluation.score > 100 {
        return Err(parse_error(format!(
            "score {} is outside 0-100",
            evaluation.score
        )));
    }

    Ok(evaluation)
}

/// Legacy score-only contract: reads `ATS Score: <n>` from free text.
///
/// A reply without the pattern scores 0. That can hide a refusal or an
/// off-format answer, so it is logged rather than silently accepted.
pub fn parse_score_line(raw_text: &str) -> u8 {
    let Some(captures) = SCORE_LINE.captures(raw_text) else {
        warn!("No 'ATS Score' line in model reply, defaulting score to 0");
        return 0;
    };

    // ASCII digits only; a run that overflows u64 is still "more than 100".
    captures[1].parse::<u64>().map_or(100, |n| n.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::models::Verdict;

    const WRAPPED: &str = "Here you go: {\"score\": 72, \"strengths\": [\"A\"], \"missing_skills\": [], \"verdict\": \"Consider\", \"recommendations\": [\"B\"]} Thanks!";

    #[test]
    fn test_parses_json_wrapped_in_commentary() {
        let evaluation = parse_evaluation(WRAPPED).unwrap();
        assert_eq!(evaluation.score, 72);
        assert_eq!(evaluation.verdict, Verdict::Consider);
        assert_eq!(evaluation.strengths, vec!["A".to_string()]);
        assert!(evaluation.missing_skills.is_empty());
        assert_eq!(evaluation.recommendations, vec!["B".to_string()]);
    }

    #[test]
    fn test_parse_is_idempotent_on_extracted_span() {
        let first = parse_evaluation(WRAPPED).unwrap();
        let span = find_json_object(WRAPPED).unwrap();
        let second = parse_evaluation(span).unwrap();
        assert_eq!(first, second);
        assert_eq!(find_json_object(span), Some(span));
    }

    #[test]
    fn test_no_json_object_is_parse_failure_with_raw_text() {
        let raw = "I'm sorry, I can't evaluate this resume.";
        match parse_evaluation(raw).unwrap_err() {
            EvaluationError::Parse { raw_text, .. } => assert_eq!(raw_text, raw),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_key_is_parse_failure_not_default() {
        let raw = r#"{"score": 90, "strengths": [], "missing_skills": [], "recommendations": []}"#;
        match parse_evaluation(raw).unwrap_err() {
            EvaluationError::Parse { reason, raw_text } => {
                assert!(reason.contains("verdict"));
                assert_eq!(raw_text, raw);
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_score_above_100_is_rejected() {
        let raw = r#"{"score": 140, "strengths": [], "missing_skills": [], "verdict": "Shortlist", "recommendations": []}"#;
        assert!(matches!(
            parse_evaluation(raw),
            Err(EvaluationError::Parse { .. })
        ));
    }

    #[test]
    fn test_fractional_score_is_rejected() {
        let raw = r#"{"score": 72.5, "strengths": [], "missing_skills": [], "verdict": "Consider", "recommendations": []}"#;
        assert!(matches!(
            parse_evaluation(raw),
            Err(EvaluationError::Parse { .. })
        ));
    }

    #[test]
    fn test_code_fenced_json_is_accepted() {
        let raw = "```json\n{\"score\": 15, \"strengths\": [], \"missing_skills\": [\"Go\"], \"verdict\": \"Not a Match\", \"recommendations\": []}\n```";
        let evaluation = parse_evaluation(raw).unwrap();
        assert_eq!(evaluation.verdict, Verdict::NotAMatch);
        assert_eq!(evaluation.missing_skills, vec!["Go".to_string()]);
    }

    #[test]
    fn test_first_object_wins_over_trailing_object() {
        let raw = r#"{"score": 60, "strengths": [], "missing_skills": [], "verdict": "Consider", "recommendations": []} and also {"note": "ignore me"}"#;
        assert_eq!(parse_evaluation(raw).unwrap().score, 60);
    }

    #[test]
    fn test_braces_inside_strings_do_not_end_the_span() {
        let raw = r#"x {"a": "closing } brace \" and {open", "b": {"c": 1}} y"#;
        assert_eq!(
            find_json_object(raw),
            Some(r#"{"a": "closing } brace \" and {open", "b": {"c": 1}}"#)
        );
    }

    #[test]
    fn test_unclosed_object_has_no_span() {
        assert_eq!(find_json_object(r#"{"score": 72, "strengths": ["#), None);
        assert_eq!(find_json_object("no braces here"), None);
    }

    #[test]
    fn test_score_line_is_found_anywhere() {
        assert_eq!(parse_score_line("Some preamble ATS Score: 85/100 trailing"), 85);
        assert_eq!(parse_score_line("ats score:42"), 42);
    }

    #[test]
    fn test_missing_score_line_defaults_to_zero() {
        assert_eq!(parse_score_line("The resume looks strong."), 0);
        assert_eq!(parse_score_line(""), 0);
    }

    #[test]
    fn test_non_ascii_digits_do_not_count_as_a_score() {
        assert_eq!(parse_score_line("ATS Score: \u{0668}\u{0665}/100"), 0);
        assert_eq!(parse_score_line("ATS Score: \u{FF18}\u{FF15}/100"), 0);
    }

    #[test]
    fn test_score_line_is_clamped_to_100() {
        assert_eq!(parse_score_line("ATS Score: 150/100"), 100);
        assert_eq!(parse_score_line("ATS Score: 99999999999999999999999"), 100);
    }
}

//! Final output parsing: answer-key sections and the error sentinel.
//!
//! The pipeline hands the caller one concatenated string. Two reserved
//! markers structure it:
//!
//! - [`ANSWER_KEY_SEPARATOR`] divides questions from the answer key. The
//!   generator is instructed to emit it verbatim, but models drift, so
//!   splitting is case-insensitive with surrounding whitespace trimmed.
//! - [`ERROR_PREFIX`] marks a failed run. A failure never crosses the
//!   pipeline boundary as a raised fault; it arrives as ordinary stream
//!   text starting with this prefix, detectable without parsing the rest.

use serde::{Deserialize, Serialize};

/// Tag separating questions from the answer key in generated output.
pub const ANSWER_KEY_SEPARATOR: &str = "---ANSWER KEY---";

/// Prefix of the single chunk emitted when a pipeline invocation fails.
pub const ERROR_PREFIX: &str = "An error occurred:";

/// The two sections of a finished generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSections {
    /// Everything before the separator (or the whole text if absent).
    pub questions: String,
    /// Everything after the separator, when present and non-blank.
    pub answer_key: Option<String>,
}

/// Split a finished generation on the answer-key separator.
///
/// The separator is matched case-insensitively; whitespace around it is
/// trimmed away from both sections. Only the first occurrence splits —
/// the remainder stays in the answer key untouched, which makes the
/// operation idempotent on its own output.
pub fn split_answer_key(text: &str) -> AnswerSections {
    match find_separator(text) {
        Some((start, end)) => {
            let questions = text[..start].trim_end().to_string();
            let answer_key = text[end..].trim_start();
            AnswerSections {
                questions,
                answer_key: if answer_key.is_empty() {
                    None
                } else {
                    Some(answer_key.to_string())
                },
            }
        }
        None => AnswerSections {
            questions: text.to_string(),
            answer_key: None,
        },
    }
}

/// Check whether a finished generation is the error sentinel.
pub fn is_error_text(text: &str) -> bool {
    text.starts_with(ERROR_PREFIX)
}

/// Format a failure message as the user-visible error sentinel string.
pub fn error_text(message: impl std::fmt::Display) -> String {
    format!("{} {}", ERROR_PREFIX, message)
}

/// Locate the first case-insensitive occurrence of the separator.
///
/// Returns the byte range of the matched separator. The separator is
/// pure ASCII, so an ASCII-uppercase scan is a faithful case fold.
fn find_separator(text: &str) -> Option<(usize, usize)> {
    let needle = ANSWER_KEY_SEPARATOR;
    let haystack = text.to_ascii_uppercase();
    haystack.find(needle).map(|i| (i, i + needle.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let sections = split_answer_key("Q1...\n---ANSWER KEY---\nA1...");
        assert_eq!(sections.questions, "Q1...");
        assert_eq!(sections.answer_key.as_deref(), Some("A1..."));
    }

    #[test]
    fn test_split_case_insensitive() {
        let sections = split_answer_key("Q1\n---Answer Key---\nA1");
        assert_eq!(sections.questions, "Q1");
        assert_eq!(sections.answer_key.as_deref(), Some("A1"));
    }

    #[test]
    fn test_split_without_separator() {
        let sections = split_answer_key("Q1\nQ2\nQ3");
        assert_eq!(sections.questions, "Q1\nQ2\nQ3");
        assert!(sections.answer_key.is_none());
    }

    #[test]
    fn test_split_blank_answer_key_is_none() {
        let sections = split_answer_key("Q1\n---ANSWER KEY---\n   ");
        assert_eq!(sections.questions, "Q1");
        assert!(sections.answer_key.is_none());
    }

    #[test]
    fn test_split_only_first_separator() {
        let sections = split_answer_key("Q\n---ANSWER KEY---\nA\n---ANSWER KEY---\nB");
        assert_eq!(sections.questions, "Q");
        assert_eq!(
            sections.answer_key.as_deref(),
            Some("A\n---ANSWER KEY---\nB")
        );
    }

    #[test]
    fn test_split_is_idempotent_on_questions() {
        let text = "Q1\n---ANSWER KEY---\nA1";
        let first = split_answer_key(text);
        let second = split_answer_key(&first.questions);
        assert_eq!(second.questions, first.questions);
        assert!(second.answer_key.is_none());
    }

    #[test]
    fn test_error_sentinel() {
        let msg = error_text("quota exhausted");
        assert_eq!(msg, "An error occurred: quota exhausted");
        assert!(is_error_text(&msg));
        assert!(!is_error_text("Q1. What is osmosis?"));
    }
}

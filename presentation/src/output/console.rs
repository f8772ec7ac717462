//! Console output formatter for finished generations

use colored::Colorize;
use examforge_domain::{is_error_text, split_answer_key};

/// Formats a finished generation for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the final concatenated output.
    ///
    /// Splits on the answer-key separator and renders the two sections
    /// under headers. Error-sentinel output is rendered as an error
    /// line. When an answer key was requested but the model failed to
    /// provide one, a warning nudges the user to re-phrase.
    pub fn format_final(content: &str, answer_key_requested: bool) -> String {
        if is_error_text(content) {
            return format!("{}", content.red().bold());
        }

        let sections = split_answer_key(content);
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "Generation complete".green().bold()));
        output.push_str(sections.questions.trim_end());
        output.push('\n');

        match sections.answer_key {
            Some(answers) => {
                output.push_str(&Self::section_header("Answer Key"));
                output.push_str(answers.trim_end());
                output.push('\n');
            }
            None if answer_key_requested => {
                output.push_str(&format!(
                    "\n{}\n",
                    "An answer key was requested but the model did not provide one. \
                     Try re-phrasing your prompt."
                        .yellow()
                ));
            }
            None => {}
        }

        output
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use examforge_domain::error_text;

    #[test]
    fn test_format_splits_sections() {
        let output = ConsoleFormatter::format_final("Q1\n---ANSWER KEY---\nA1", true);
        assert!(output.contains("Q1"));
        assert!(output.contains("Answer Key"));
        assert!(output.contains("A1"));
        assert!(!output.contains("---ANSWER KEY---"));
    }

    #[test]
    fn test_format_warns_on_missing_requested_key() {
        let output = ConsoleFormatter::format_final("Q1\nQ2", true);
        assert!(output.contains("did not provide one"));
    }

    #[test]
    fn test_format_silent_when_key_not_requested() {
        let output = ConsoleFormatter::format_final("Q1\nQ2", false);
        assert!(!output.contains("did not provide one"));
    }

    #[test]
    fn test_format_renders_error_sentinel() {
        let output = ConsoleFormatter::format_final(&error_text("quota exhausted"), true);
        assert!(output.contains("An error occurred:"));
        assert!(!output.contains("Generation complete"));
    }
}

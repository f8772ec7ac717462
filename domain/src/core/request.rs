//! Generation request value object

use serde::{Deserialize, Serialize};

/// Placeholder used when the caller supplies no example questions.
pub const NO_EXAMPLES_PLACEHOLDER: &str = "No examples provided.";

/// A request to generate exam questions (Value Object)
///
/// Immutable once constructed; lives for the duration of one pipeline
/// invocation. The prompt must be non-empty; the example text defaults
/// to [`NO_EXAMPLES_PLACEHOLDER`] when blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    user_prompt: String,
    example_text: String,
    include_answer_key: bool,
}

impl GenerationRequest {
    /// Create a new request
    ///
    /// # Panics
    /// Panics if the prompt is empty or only whitespace
    pub fn new(user_prompt: impl Into<String>) -> Self {
        let user_prompt = user_prompt.into();
        assert!(
            !user_prompt.trim().is_empty(),
            "Generation request cannot be empty"
        );
        Self {
            user_prompt,
            example_text: NO_EXAMPLES_PLACEHOLDER.to_string(),
            include_answer_key: true,
        }
    }

    /// Try to create a new request, returning None if the prompt is blank
    pub fn try_new(user_prompt: impl Into<String>) -> Option<Self> {
        let user_prompt = user_prompt.into();
        if user_prompt.trim().is_empty() {
            None
        } else {
            Some(Self::new(user_prompt))
        }
    }

    /// Set the example questions whose style the generator should match.
    ///
    /// Blank text is normalized to [`NO_EXAMPLES_PLACEHOLDER`] so prompt
    /// templates never interpolate an empty slot.
    pub fn with_examples(mut self, example_text: impl Into<String>) -> Self {
        let example_text = example_text.into();
        self.example_text = if example_text.trim().is_empty() {
            NO_EXAMPLES_PLACEHOLDER.to_string()
        } else {
            example_text
        };
        self
    }

    /// Set whether the generated output must carry an answer key section.
    pub fn with_answer_key(mut self, include: bool) -> Self {
        self.include_answer_key = include;
        self
    }

    /// The user's request text
    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    /// Example questions to imitate (never empty)
    pub fn example_text(&self) -> &str {
        &self.example_text
    }

    /// Whether an answer key was requested
    pub fn include_answer_key(&self) -> bool {
        self.include_answer_key
    }
}

impl std::fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let r = GenerationRequest::new("Generate 5 questions on osmosis");
        assert_eq!(r.user_prompt(), "Generate 5 questions on osmosis");
        assert_eq!(r.example_text(), NO_EXAMPLES_PLACEHOLDER);
        assert!(r.include_answer_key());
    }

    #[test]
    #[should_panic]
    fn test_empty_request_panics() {
        GenerationRequest::new("   ");
    }

    #[test]
    fn test_try_new() {
        assert!(GenerationRequest::try_new("").is_none());
        assert!(GenerationRequest::try_new("  \n ").is_none());
        assert!(GenerationRequest::try_new("3 true/false questions").is_some());
    }

    #[test]
    fn test_blank_examples_normalized() {
        let r = GenerationRequest::new("q").with_examples("  ");
        assert_eq!(r.example_text(), NO_EXAMPLES_PLACEHOLDER);

        let r = GenerationRequest::new("q").with_examples("Q1. What is 2+2?");
        assert_eq!(r.example_text(), "Q1. What is 2+2?");
    }

    #[test]
    fn test_answer_key_toggle() {
        let r = GenerationRequest::new("q").with_answer_key(false);
        assert!(!r.include_answer_key());
    }
}

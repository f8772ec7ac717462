//! Prompt templates for the generation pipeline
//!
//! Pure data → string transformations: each function fills a fixed
//! template with slots from the request, the retrieved context, and
//! prior agent outputs. No mutable state.

use crate::core::request::GenerationRequest;
use crate::critique::ACCEPT_SENTINEL;
use crate::output::ANSWER_KEY_SEPARATOR;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// The answer-key clause injected into every Generator prompt.
    pub fn answer_key_instruction(include_answer_key: bool) -> String {
        if include_answer_key {
            format!(
                "You MUST include a detailed, step-by-step answer key. \
                 Separate the questions from the answer key with the tag '{}'.",
                ANSWER_KEY_SEPARATOR
            )
        } else {
            "Do NOT include an answer key.".to_string()
        }
    }

    /// Generator prompt for the document-grounded pipeline.
    pub fn grounded_generator(request: &GenerationRequest, context: &str) -> String {
        format!(
            r#"You are an expert exam question generator. Your task is to create a set of questions (a "v1 draft") based on the user's request.
You MUST use the provided context from the course material.
You MUST match the style, tone, and difficulty of the example questions.
{answer_key_instruction}

**CONTEXT FROM COURSE MATERIAL:**
{context}

**EXAMPLE QUESTIONS (Follow this style):**
{examples}

**USER REQUEST:**
{request}

**V1 DRAFT (Format your entire response using rich Markdown. Use lists, bolding, and LaTeX for any mathematical expressions):**
"#,
            answer_key_instruction = Self::answer_key_instruction(request.include_answer_key()),
            context = context,
            examples = request.example_text(),
            request = request.user_prompt(),
        )
    }

    /// Generator prompt for the general-knowledge pipeline (no context slot).
    pub fn general_generator(request: &GenerationRequest) -> String {
        format!(
            r#"You are an expert exam question generator.
Your task is to create a set of questions based on the user's request using your general knowledge.
You MUST match the style, tone, and difficulty of the example questions.
{answer_key_instruction}

**EXAMPLE QUESTIONS (Follow this style):**
{examples}

**USER REQUEST:**
{request}

**GENERATED QUESTIONS (Format your entire response using rich Markdown. Use lists, bolding, and LaTeX for any mathematical expressions):**
"#,
            answer_key_instruction = Self::answer_key_instruction(request.include_answer_key()),
            examples = request.example_text(),
            request = request.user_prompt(),
        )
    }

    /// Marker prompt: a strict examiner critiques the v1 draft.
    ///
    /// The critique is internal scratch work — the user never sees it.
    /// A flawless draft must be answered with the bare acceptance word.
    pub fn marker(request: &GenerationRequest, context: &str, v1_draft: &str) -> String {
        format!(
            r#"You are an expert 'Marker' agent, a harsh and strict university examiner.
Your job is to write an internal critique of the 'v1 Draft' questions.
You must be BRUTALLY HONEST. The user will NOT see this. Your critique will be used to fix the draft.
Focus on 100% factual accuracy of the questions AND the answer key.

**THE RUBRIC (Be harsh):**
1.  **Factual Accuracy:** Are the questions AND the answer key 100% correct according to the CONTEXT? Point out every single error.
2.  **Prompt Relevance:** Do the questions directly address the USER'S REQUEST?
3.  **Style Match:** Do the questions match the style of the EXAMPLE QUESTIONS?
4.  **Answer Key (if requested):** Was the instruction '{answer_key_instruction}' followed perfectly? Is the answer key detailed and correct?

**--- INPUTS FOR YOUR REVIEW ---**
1. CONTEXT FROM COURSE MATERIAL: {context}
2. EXAMPLE QUESTIONS (The style to match): {examples}
3. USER'S ORIGINAL REQUEST: {request}
4. THE 'V1 DRAFT' (Your target for critique): {v1_draft}

**--- YOUR TASK ---**
Provide a concise, constructive, and harsh critique. List every single error you find.
If there are no errors, simply write "{accept}".
"#,
            answer_key_instruction = Self::answer_key_instruction(request.include_answer_key()),
            context = context,
            examples = request.example_text(),
            request = request.user_prompt(),
            v1_draft = v1_draft,
            accept = ACCEPT_SENTINEL,
        )
    }

    /// Refiner prompt: rewrite the v1 draft to resolve every critique point.
    pub fn refiner(request: &GenerationRequest, v1_draft: &str, critique: &str) -> String {
        format!(
            r#"You are an expert 'Refiner' agent. Your job is to rewrite a 'v1 Draft' to fix all issues from a 'Critique'.
You must fix every point in the critique. Do not add your own opinions.
You MUST preserve the original format, including the '{separator}' separator if present.

**--- INPUTS ---**

1. USER'S ORIGINAL REQUEST: {request}

2. THE 'V1 DRAFT' (The original version):
{v1_draft}

3. THE 'HARSH CRITIQUE' (The issues you must fix):
{critique}

**--- YOUR TASK ---**
Rewrite the 'v1 Draft' to perfectly fix all issues from the 'Critique'.
Output *only* the final, corrected text.

**REFINED V2 DRAFT (Format your entire response using rich Markdown. Use lists, bolding, and LaTeX for any mathematical expressions. Preserve the '{separator}' separator):**
"#,
            separator = ANSWER_KEY_SEPARATOR,
            request = request.user_prompt(),
            v1_draft = v1_draft,
            critique = critique,
        )
    }
}

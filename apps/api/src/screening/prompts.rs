// LLM prompt constants for technical question generation.
// The system prompt is shared and lives in llm_client::prompts.
// The layout below is exactly what `parser::parse_questions` reads back.

/// Number of questions requested from the model.
pub const QUESTION_COUNT: usize = 5;

/// Question generation prompt. Replace `{count}` and `{tech_stack}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate exactly {count} technical multiple-choice questions (MCQs) related to the following technologies:

{tech_stack}

Each question must follow this format exactly:

Q<number>. <question text>
a) <option text>
b) <option text>
c) <option text>
d) <option text>
Answer: <letter>

Example:

Q1. Which HTTP method is idempotent?
a) POST
b) PUT
c) PATCH
d) CONNECT
Answer: b

Rules:
- Exactly {count} questions, numbered Q1 to Q{count}
- Exactly four options per question, lettered a) to d) in that order
- Exactly one "Answer:" line per question, giving the letter of the correct option
- Return only the questions in that format. No introduction, explanations, headings or closing remarks."#;

/// Builds the question generation instruction for a candidate's tech stack.
pub fn build_questions_prompt(tech_stack: &str) -> String {
    QUESTIONS_PROMPT_TEMPLATE
        .replace("{count}", &QUESTION_COUNT.to_string())
        .replace("{tech_stack}", tech_stack.trim())
}

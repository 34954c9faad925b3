use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Deserialize;

/// Option letters every question must carry, in display order.
pub const OPTION_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Points awarded for each correctly answered question.
pub const POINTS_PER_QUESTION: u32 = 10;

/// A candidate's profile as submitted through the intake form.
/// Only built from a validated `ProfileForm`; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub years_of_experience: u32,
    pub desired_role: String,
    pub location: String,
    pub tech_stack: String,
}

impl CandidateProfile {
    /// Individual technologies from the comma-separated tech stack.
    pub fn tech_stack_items(&self) -> Vec<&str> {
        self.tech_stack
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Raw profile form fields, exactly as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub years_of_experience: String,
    #[serde(default)]
    pub desired_role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tech_stack: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub letter: char,
    pub text: String,
}

/// A validated multiple-choice question: four distinct-lettered options and
/// an answer letter that names one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub answer: char,
}

impl Question {
    /// Renders the question in the layout the model is asked to produce.
    /// `number` is 1-based.
    pub fn render(&self, number: usize) -> String {
        let mut out = format!("Q{number}. {}\n", self.question);
        for opt in &self.options {
            let _ = writeln!(out, "{}) {}", opt.letter, opt.text);
        }
        let _ = writeln!(out, "Answer: {}", self.answer);
        out
    }

    pub fn option_text(&self, letter: char) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.letter == letter)
            .map(|o| o.text.as_str())
    }
}

/// Renders a list of questions back into model-output form, blank line between blocks.
pub fn render_questions(questions: &[Question]) -> String {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| q.render(i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The candidate's selections, keyed by zero-based question index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    selections: BTreeMap<usize, char>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the selection for a question.
    pub fn select(&mut self, index: usize, letter: char) {
        self.selections.insert(index, letter);
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.selections.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn is_complete(&self, question_count: usize) -> bool {
        self.len() == question_count
    }

    /// Zero-based indices in `0..question_count` with no selection yet.
    pub fn missing(&self, question_count: usize) -> Vec<usize> {
        (0..question_count)
            .filter(|i| !self.selections.contains_key(i))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub index: usize,
    pub selected: char,
    pub correct: char,
    pub is_correct: bool,
    pub points: u32,
}

/// Outcome of scoring a complete answer set. Computed once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub results: Vec<QuestionResult>,
    pub total: u32,
    pub max: u32,
}

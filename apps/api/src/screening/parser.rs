//! Response parser: turns the model's free-text reply into validated `Question` records.
//!
//! The reply is split into blocks at every `Q<n>.` line, each block's lines are
//! classified as question / option / answer, and only blocks that form a complete
//! question (text, four distinct options, an answer letter) survive.
//! Malformed blocks are dropped whole; the parser never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::screening::models::{AnswerOption, Question, OPTION_LETTERS};

static QUESTION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Q\d+\.").unwrap());
static QUESTION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Q\d+\.\s*(.*)$").unwrap());
static OPTION_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-dA-D])\)\s*(.*)$").unwrap());
static ANSWER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^answer\s*:?\s*([a-d])\b").unwrap());

/// Why a block was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    MissingQuestion,
    WrongOptionCount(usize),
    DuplicateOptionLetters,
    MissingAnswer,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::MissingQuestion => write!(f, "no question text"),
            DropReason::WrongOptionCount(n) => write!(f, "expected 4 options, found {n}"),
            DropReason::DuplicateOptionLetters => write!(f, "option letters are not distinct"),
            DropReason::MissingAnswer => write!(f, "no answer line"),
        }
    }
}

/// Parse result with diagnostics, for logging and the "too few questions" view.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub questions: Vec<Question>,
    pub blocks_seen: usize,
    pub dropped: Vec<(usize, DropReason)>,
}

#[derive(Debug, Default)]
struct BlockDraft {
    question: Option<String>,
    options: Vec<AnswerOption>,
    answer: Option<char>,
}

impl BlockDraft {
    fn classify(&mut self, line: &str) {
        if let Some(caps) = QUESTION_LINE.captures(line) {
            if self.question.is_none() {
                self.question = Some(caps[1].trim().to_string());
            }
        } else if let Some(caps) = OPTION_LINE.captures(line) {
            self.options.push(AnswerOption {
                letter: first_lower(&caps[1]),
                text: caps[2].trim().to_string(),
            });
        } else if let Some(caps) = ANSWER_LINE.captures(line) {
            self.answer = Some(first_lower(&caps[1]));
        }
    }

    fn into_question(self) -> Result<Question, DropReason> {
        let question = self
            .question
            .filter(|q| !q.is_empty())
            .ok_or(DropReason::MissingQuestion)?;

        if self.options.len() != OPTION_LETTERS.len() {
            return Err(DropReason::WrongOptionCount(self.options.len()));
        }
        let distinct = OPTION_LETTERS
            .iter()
            .all(|l| self.options.iter().any(|o| o.letter == *l));
        if !distinct {
            return Err(DropReason::DuplicateOptionLetters);
        }

        // Letters are a..d and all four are present, so any answer letter names an option.
        let answer = self.answer.ok_or(DropReason::MissingAnswer)?;

        Ok(Question {
            question,
            options: self.options,
            answer,
        })
    }
}

fn first_lower(s: &str) -> char {
    s.chars().next().map(|c| c.to_ascii_lowercase()).unwrap_or_default()
}

/// Splits text into blocks, starting a new block at every question marker line.
/// Lines are trimmed and blank lines skipped.
fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if QUESTION_MARKER.is_match(line) || blocks.is_empty() {
            blocks.push(Vec::new());
        }
        if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks
}

/// Parses raw model output, keeping per-block diagnostics.
pub fn parse_report(raw: Option<&str>) -> ParseOutcome {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return ParseOutcome::default(),
    };

    let mut outcome = ParseOutcome::default();
    for (idx, lines) in split_blocks(raw).into_iter().enumerate() {
        outcome.blocks_seen += 1;
        let mut draft = BlockDraft::default();
        for line in lines {
            draft.classify(line);
        }
        match draft.into_question() {
            Ok(q) => outcome.questions.push(q),
            Err(reason) => {
                debug!("Dropping block {idx}: {reason}");
                outcome.dropped.push((idx, reason));
            }
        }
    }
    debug!(
        "Parsed {} of {} blocks ({} dropped)",
        outcome.questions.len(),
        outcome.blocks_seen,
        outcome.dropped.len()
    );
    outcome
}

/// Parses raw model output into valid questions, in the order they appear.
/// Absent or empty input yields an empty vector.
pub fn parse_questions(raw: Option<&str>) -> Vec<Question> {
    parse_report(raw).questions
}

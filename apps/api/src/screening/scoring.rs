use crate::screening::models::{AnswerSet, Question, QuestionResult, ScoreReport, POINTS_PER_QUESTION};
use crate::screening::session::SessionError;

/// Scores a complete answer set: 10 points per correct answer, max = 10 × N.
/// Fails if any question is unanswered.
pub fn score(questions: &[Question], answers: &AnswerSet) -> Result<ScoreReport, SessionError> {
    if !answers.is_complete(questions.len()) {
        return Err(SessionError::IncompleteAnswers(answers.missing(questions.len())));
    }

    let results: Vec<QuestionResult> = questions
        .iter()
        .enumerate()
        .filter_map(|(index, q)| {
            let selected = answers.get(index)?;
            let is_correct = selected == q.answer;
            Some(QuestionResult {
                index,
                selected,
                correct: q.answer,
                is_correct,
                points: if is_correct { POINTS_PER_QUESTION } else { 0 },
            })
        })
        .collect();

    let total = results.iter().map(|r| r.points).sum();
    Ok(ScoreReport {
        results,
        total,
        max: POINTS_PER_QUESTION * questions.len() as u32,
    })
}

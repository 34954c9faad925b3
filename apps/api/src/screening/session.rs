//! Session state machine: one explicit state value per candidate session.
//!
//! `transition` is a pure function from (state, event) to the next state. A
//! rejected event hands the unchanged state back together with the reason, so
//! callers never lose a session on a failed guard.

use thiserror::Error;

use crate::screening::chat::{self, ChatIntent, ChatLine, Speaker};
use crate::screening::models::{AnswerSet, CandidateProfile, ProfileForm, Question, ScoreReport, OPTION_LETTERS};
use crate::screening::parser::parse_report;
use crate::screening::scoring::score;
use crate::screening::validation::{validate_profile, FieldError};

/// Default number of parsed questions required before answering can start.
pub const DEFAULT_MIN_QUESTIONS: usize = 3;

/// Per-deployment settings carried into every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// Fewest valid questions accepted from a generation round.
    pub min_questions: usize,
    /// Model identifier passed to the language model.
    pub model: String,
    /// Sampling temperature passed to the language model.
    pub temperature: f32,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            min_questions: DEFAULT_MIN_QUESTIONS,
            model: crate::llm_client::DEFAULT_MODEL.to_string(),
            temperature: crate::llm_client::DEFAULT_TEMPERATURE,
        }
    }
}

/// Why the last generation round did not produce usable questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    /// The language model call itself failed.
    Transport(String),
    /// The reply parsed into fewer questions than required.
    TooFewQuestions {
        raw: String,
        parsed: Vec<Question>,
        required: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    CollectingProfile,
    RequestingQuestions {
        profile: CandidateProfile,
        failure: Option<GenerationFailure>,
    },
    CollectingAnswers {
        profile: CandidateProfile,
        questions: Vec<Question>,
        answers: AnswerSet,
    },
    Scored {
        profile: CandidateProfile,
        questions: Vec<Question>,
        answers: AnswerSet,
        report: ScoreReport,
    },
    Ended {
        candidate_name: Option<String>,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::CollectingProfile => "collecting profile",
            SessionState::RequestingQuestions { .. } => "requesting questions",
            SessionState::CollectingAnswers { .. } => "collecting answers",
            SessionState::Scored { .. } => "scored",
            SessionState::Ended { .. } => "ended",
        }
    }

    pub fn profile(&self) -> Option<&CandidateProfile> {
        match self {
            SessionState::RequestingQuestions { profile, .. }
            | SessionState::CollectingAnswers { profile, .. }
            | SessionState::Scored { profile, .. } => Some(profile),
            SessionState::CollectingProfile | SessionState::Ended { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ProfileSubmitted(ProfileForm),
    /// Raw model output, or the transport error message.
    QuestionsReceived(Result<String, String>),
    AnswerSelected { index: usize, letter: char },
    AnswersSubmitted,
    Reset,
    Exit,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::ProfileSubmitted(_) => "submit profile",
            Event::QuestionsReceived(_) => "receive questions",
            Event::AnswerSelected { .. } => "select answer",
            Event::AnswersSubmitted => "submit answers",
            Event::Reset => "reset",
            Event::Exit => "exit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please fix the following: {}", join_fields(.0))]
    InvalidProfile(Vec<FieldError>),

    #[error("Question {} does not exist", question_number(.0))]
    UnknownQuestion(usize),

    #[error("'{0}' is not one of a, b, c, d")]
    InvalidLetter(char),

    #[error("Please answer question(s): {}", join_numbers(.0))]
    IncompleteAnswers(Vec<usize>),

    #[error("Cannot {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn question_number(index: &usize) -> usize {
    index + 1
}

fn join_numbers(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A refused event: the state as it was, plus the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub state: SessionState,
    pub error: SessionError,
}

impl Rejected {
    fn new(state: SessionState, error: SessionError) -> Self {
        Self { state, error }
    }
}

pub fn transition(
    state: SessionState,
    event: Event,
    ctx: &SessionContext,
) -> Result<SessionState, Rejected> {
    use SessionState::*;

    match (state, event) {
        (_, Event::Reset) => Ok(CollectingProfile),

        (state, Event::Exit) => Ok(Ended {
            candidate_name: state.profile().map(|p| p.name.clone()),
        }),

        (CollectingProfile, Event::ProfileSubmitted(form)) => match validate_profile(&form) {
            Ok(profile) => Ok(RequestingQuestions {
                profile,
                failure: None,
            }),
            Err(errors) => Err(Rejected::new(
                CollectingProfile,
                SessionError::InvalidProfile(errors),
            )),
        },

        (RequestingQuestions { profile, .. }, Event::QuestionsReceived(Err(message))) => {
            Ok(RequestingQuestions {
                profile,
                failure: Some(GenerationFailure::Transport(message)),
            })
        }

        (RequestingQuestions { profile, .. }, Event::QuestionsReceived(Ok(raw))) => {
            let outcome = parse_report(Some(&raw));
            if outcome.questions.len() >= ctx.min_questions {
                Ok(CollectingAnswers {
                    profile,
                    questions: outcome.questions,
                    answers: AnswerSet::new(),
                })
            } else {
                Ok(RequestingQuestions {
                    profile,
                    failure: Some(GenerationFailure::TooFewQuestions {
                        raw,
                        parsed: outcome.questions,
                        required: ctx.min_questions,
                    }),
                })
            }
        }

        (
            CollectingAnswers {
                profile,
                questions,
                mut answers,
            },
            Event::AnswerSelected { index, letter },
        ) => {
            let letter = letter.to_ascii_lowercase();
            let error = if index >= questions.len() {
                Some(SessionError::UnknownQuestion(index))
            } else if !OPTION_LETTERS.contains(&letter) {
                Some(SessionError::InvalidLetter(letter))
            } else {
                answers.select(index, letter);
                None
            };
            let state = CollectingAnswers {
                profile,
                questions,
                answers,
            };
            match error {
                Some(error) => Err(Rejected::new(state, error)),
                None => Ok(state),
            }
        }

        (
            CollectingAnswers {
                profile,
                questions,
                answers,
            },
            Event::AnswersSubmitted,
        ) => match score(&questions, &answers) {
            Ok(report) => Ok(Scored {
                profile,
                questions,
                answers,
                report,
            }),
            Err(error) => Err(Rejected::new(
                CollectingAnswers {
                    profile,
                    questions,
                    answers,
                },
                error,
            )),
        },

        (state, event) => {
            let error = SessionError::InvalidTransition {
                state: state.name(),
                event: event.name(),
            };
            Err(Rejected::new(state, error))
        }
    }
}

/// Everything held for one browser session: the state machine value, the chat
/// transcript, and a one-shot notice shown on the next page render.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub state: SessionState,
    pub chat: Vec<ChatLine>,
    pub notice: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an event in place. On rejection the state is left as it was.
    pub fn apply(&mut self, event: Event, ctx: &SessionContext) -> Result<(), SessionError> {
        let wipe = matches!(event, Event::Reset);
        let current = std::mem::take(&mut self.state);
        match transition(current, event, ctx) {
            Ok(next) => {
                self.state = next;
                if wipe {
                    self.chat.clear();
                    self.notice = None;
                }
                Ok(())
            }
            Err(rejected) => {
                self.state = rejected.state;
                Err(rejected.error)
            }
        }
    }

    /// Handles a chat box submission: exit keywords end the session, anything
    /// else gets the fallback reply once a profile exists.
    pub fn chat(&mut self, input: &str, ctx: &SessionContext) {
        match chat::classify(input) {
            ChatIntent::Ignore => {}
            ChatIntent::Exit => {
                self.push_chat(Speaker::Candidate, input.trim());
                self.push_chat(Speaker::Assistant, chat::GOODBYE_MESSAGE);
                // Exit is accepted from every state.
                let _ = self.apply(Event::Exit, ctx);
            }
            ChatIntent::Other(text) => {
                if self.state.profile().is_some() {
                    self.push_chat(Speaker::Candidate, &text);
                    self.push_chat(Speaker::Assistant, chat::FALLBACK_MESSAGE);
                }
            }
        }
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    fn push_chat(&mut self, speaker: Speaker, message: &str) {
        self.chat.push(ChatLine {
            speaker,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_BLOCKS: &str = "Q1. One?\na) 1\nb) 2\nc) 3\nd) 4\nAnswer: a\n\n\
        Q2. Two?\na) 1\nb) 2\nc) 3\nd) 4\nAnswer: b\n\n\
        Q3. Three?\na) 1\nb) 2\nc) 3\nd) 4\nAnswer: c\n\n\
        Q4. Four?\na) 1\nb) 2\nc) 3\nd) 4\nAnswer: d\n\n\
        Q5. Five?\na) 1\nb) 2\nc) 3\nd) 4\nAnswer: a\n";

    fn form() -> ProfileForm {
        ProfileForm {
            name: "Linus".to_string(),
            email: "linus@example.org".to_string(),
            phone: "555-0199".to_string(),
            years_of_experience: "12".to_string(),
            desired_role: "Kernel Engineer".to_string(),
            location: "Portland".to_string(),
            tech_stack: "C, Git".to_string(),
        }
    }

    fn ctx() -> SessionContext {
        SessionContext::default()
    }

    fn requesting() -> SessionState {
        transition(
            SessionState::CollectingProfile,
            Event::ProfileSubmitted(form()),
            &ctx(),
        )
        .unwrap()
    }

    fn answering(raw: &str) -> SessionState {
        transition(requesting(), Event::QuestionsReceived(Ok(raw.to_string())), &ctx()).unwrap()
    }

    #[test]
    fn test_valid_profile_moves_to_requesting() {
        match requesting() {
            SessionState::RequestingQuestions { profile, failure } => {
                assert_eq!(profile.name, "Linus");
                assert!(failure.is_none());
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_invalid_profile_is_rejected_in_place() {
        let mut bad = form();
        bad.email = "linus-at-example".to_string();
        let rejected = transition(
            SessionState::CollectingProfile,
            Event::ProfileSubmitted(bad),
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(rejected.state, SessionState::CollectingProfile);
        assert!(matches!(rejected.error, SessionError::InvalidProfile(ref e) if e[0].field == "email"));
        assert!(rejected.error.to_string().contains("email"));
    }

    #[test]
    fn test_five_good_blocks_then_perfect_score() {
        let state = answering(GOOD_BLOCKS);
        let SessionState::CollectingAnswers { ref questions, .. } = state else {
            panic!("expected CollectingAnswers, got {state:?}");
        };
        let correct: Vec<char> = questions.iter().map(|q| q.answer).collect();
        assert_eq!(correct.len(), 5);

        let mut state = state;
        for (index, letter) in correct.into_iter().enumerate() {
            state = transition(state, Event::AnswerSelected { index, letter }, &ctx()).unwrap();
        }
        let state = transition(state, Event::AnswersSubmitted, &ctx()).unwrap();
        match state {
            SessionState::Scored { report, .. } => {
                assert_eq!(report.total, 50);
                assert_eq!(report.max, 50);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_one_short_block_still_proceeds_with_four() {
        let raw = GOOD_BLOCKS.replacen("Q3. Three?\na) 1\nb) 2\nc) 3\n", "Q3. Three?\na) 1\nb) 2\n", 1);
        match answering(&raw) {
            SessionState::CollectingAnswers { questions, answers, .. } => {
                assert_eq!(questions.len(), 4);
                assert!(answers.is_empty());
                assert!(questions.iter().all(|q| q.question != "Three?"));
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_empty_reply_stays_requesting_with_failure() {
        let state = transition(requesting(), Event::QuestionsReceived(Ok(String::new())), &ctx())
            .unwrap();
        match state {
            SessionState::RequestingQuestions {
                failure: Some(GenerationFailure::TooFewQuestions { parsed, required, .. }),
                ..
            } => {
                assert!(parsed.is_empty());
                assert_eq!(required, 3);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_transport_error_stays_requesting() {
        let state = transition(
            requesting(),
            Event::QuestionsReceived(Err("connection refused".to_string())),
            &ctx(),
        )
        .unwrap();
        assert!(matches!(
            state,
            SessionState::RequestingQuestions {
                failure: Some(GenerationFailure::Transport(ref m)),
                ..
            } if m == "connection refused"
        ));
    }

    #[test]
    fn test_retry_after_failure_can_succeed() {
        let failed = transition(
            requesting(),
            Event::QuestionsReceived(Err("timeout".to_string())),
            &ctx(),
        )
        .unwrap();
        let state = transition(failed, Event::QuestionsReceived(Ok(GOOD_BLOCKS.to_string())), &ctx())
            .unwrap();
        assert!(matches!(state, SessionState::CollectingAnswers { .. }));
    }

    #[test]
    fn test_threshold_is_configurable() {
        let two = "Q1. One?\na) 1\nb) 2\nc) 3\nd) 4\nAnswer: a\n\nQ2. Two?\na) 1\nb) 2\nc) 3\nd) 4\nAnswer: b";
        let strict = SessionContext { min_questions: 5, ..ctx() };
        let lenient = SessionContext { min_questions: 2, ..ctx() };

        let state = transition(requesting(), Event::QuestionsReceived(Ok(two.to_string())), &strict)
            .unwrap();
        assert!(matches!(state, SessionState::RequestingQuestions { failure: Some(_), .. }));

        let state = transition(requesting(), Event::QuestionsReceived(Ok(two.to_string())), &lenient)
            .unwrap();
        assert!(matches!(state, SessionState::CollectingAnswers { .. }));
    }

    #[test]
    fn test_incomplete_answers_block_scoring() {
        let state = answering(GOOD_BLOCKS);
        let state = transition(state, Event::AnswerSelected { index: 0, letter: 'A' }, &ctx()).unwrap();
        let rejected = transition(state, Event::AnswersSubmitted, &ctx()).unwrap_err();
        assert_eq!(rejected.error, SessionError::IncompleteAnswers(vec![1, 2, 3, 4]));
        assert_eq!(rejected.error.to_string(), "Please answer question(s): 2, 3, 4, 5");
        match rejected.state {
            SessionState::CollectingAnswers { answers, .. } => assert_eq!(answers.get(0), Some('a')),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_answer_selection_guards() {
        let state = answering(GOOD_BLOCKS);
        let rejected = transition(state, Event::AnswerSelected { index: 9, letter: 'a' }, &ctx())
            .unwrap_err();
        assert_eq!(rejected.error, SessionError::UnknownQuestion(9));

        let rejected = transition(
            rejected.state,
            Event::AnswerSelected { index: 0, letter: 'e' },
            &ctx(),
        )
        .unwrap_err();
        assert_eq!(rejected.error, SessionError::InvalidLetter('e'));
    }

    #[test]
    fn test_out_of_order_event_is_invalid() {
        let rejected = transition(SessionState::CollectingProfile, Event::AnswersSubmitted, &ctx())
            .unwrap_err();
        assert_eq!(
            rejected.error,
            SessionError::InvalidTransition {
                state: "collecting profile",
                event: "submit answers"
            }
        );
    }

    #[test]
    fn test_reset_wipes_everything() {
        let mut session = Session::new();
        session.apply(Event::ProfileSubmitted(form()), &ctx()).unwrap();
        session.chat("hello there", &ctx());
        session.notice = Some("Info submitted".to_string());
        assert_eq!(session.chat.len(), 2);

        session.apply(Event::Reset, &ctx()).unwrap();
        assert_eq!(session.state, SessionState::CollectingProfile);
        assert!(session.chat.is_empty());
        assert!(session.notice.is_none());
    }

    #[test]
    fn test_scored_is_terminal_until_reset() {
        let mut session = Session::new();
        session.apply(Event::ProfileSubmitted(form()), &ctx()).unwrap();
        session
            .apply(Event::QuestionsReceived(Ok(GOOD_BLOCKS.to_string())), &ctx())
            .unwrap();
        for index in 0..5 {
            session
                .apply(Event::AnswerSelected { index, letter: 'b' }, &ctx())
                .unwrap();
        }
        session.apply(Event::AnswersSubmitted, &ctx()).unwrap();
        let scored = session.state.clone();

        let err = session
            .apply(Event::AnswerSelected { index: 0, letter: 'a' }, &ctx())
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { state: "scored", .. }));
        assert_eq!(session.state, scored);
    }

    #[test]
    fn test_chat_exit_ends_session() {
        let mut session = Session::new();
        session.apply(Event::ProfileSubmitted(form()), &ctx()).unwrap();
        session.chat("Bye", &ctx());
        assert_eq!(
            session.state,
            SessionState::Ended {
                candidate_name: Some("Linus".to_string())
            }
        );
        assert_eq!(session.chat.last().unwrap().message, chat::GOODBYE_MESSAGE);
    }

    #[test]
    fn test_chat_before_profile_is_ignored() {
        let mut session = Session::new();
        session.chat("what now?", &ctx());
        assert!(session.chat.is_empty());
        assert_eq!(session.state, SessionState::CollectingProfile);
    }
}

pub mod layout;
pub mod profile;
pub mod questions;
pub mod report;

use maud::{html, Markup};

use crate::screening::models::ProfileForm;
use crate::screening::session::{Session, SessionState};

pub use layout::page;

/// Renders the page for whatever state the session is in.
/// `errors` are shown on the form that produced them.
pub fn session_page(session: &Session, notice: Option<&str>, errors: &[String]) -> Markup {
    session_page_with_form(session, notice, errors, &ProfileForm::default())
}

pub fn session_page_with_form(
    session: &Session,
    notice: Option<&str>,
    errors: &[String],
    form: &ProfileForm,
) -> Markup {
    let (title, body) = match &session.state {
        SessionState::CollectingProfile => ("Candidate profile", profile::profile_form(form, errors)),
        SessionState::RequestingQuestions { profile, failure } => (
            "Technical questions",
            questions::generation_status(profile, failure.as_ref()),
        ),
        SessionState::CollectingAnswers {
            questions, answers, ..
        } => (
            "Technical questions",
            questions::answer_form(questions, answers, errors),
        ),
        SessionState::Scored {
            profile,
            questions,
            report,
            ..
        } => ("Results", report::score_report(profile, questions, report)),
        SessionState::Ended { candidate_name } => {
            ("Goodbye", report::goodbye(candidate_name.as_deref()))
        }
    };

    let body = html! {
        (layout::notice(notice))
        (body)
    };
    page(title, body, &session.chat)
}

/// Standalone error page for failures outside the normal form flow.
pub fn error_page(message: &str) -> Markup {
    let body = html! {
        h2 { "Something went wrong" }
        (layout::errors(&[message.to_string()]))
        p { a href=(crate::names::HOME_URL) { "Back to TalentScout" } }
    };
    page("Error", body, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::models::{AnswerOption, AnswerSet, CandidateProfile, Question};
    use crate::screening::scoring::score;
    use crate::screening::session::GenerationFailure;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Barbara".to_string(),
            email: "barbara@example.com".to_string(),
            phone: "555".to_string(),
            years_of_experience: 3,
            desired_role: "SRE".to_string(),
            location: "Boston".to_string(),
            tech_stack: "CLU, Rust".to_string(),
        }
    }

    fn question() -> Question {
        Question {
            question: "Which one?".to_string(),
            options: ['a', 'b', 'c', 'd']
                .iter()
                .map(|l| AnswerOption { letter: *l, text: format!("option {l}") })
                .collect(),
            answer: 'c',
        }
    }

    fn render(state: SessionState) -> String {
        let session = Session {
            state,
            ..Session::default()
        };
        session_page(&session, None, &[]).into_string()
    }

    #[test]
    fn test_profile_page_has_all_fields() {
        let html = render(SessionState::CollectingProfile);
        for field in [
            "name=\"name\"",
            "name=\"email\"",
            "name=\"phone\"",
            "name=\"years_of_experience\"",
            "name=\"desired_role\"",
            "name=\"location\"",
            "name=\"tech_stack\"",
        ] {
            assert!(html.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_failure_page_offers_retry_and_back() {
        let html = render(SessionState::RequestingQuestions {
            profile: profile(),
            failure: Some(GenerationFailure::TooFewQuestions {
                raw: "Sorry, I cannot help".to_string(),
                parsed: vec![],
                required: 3,
            }),
        });
        assert!(html.contains("Retry"));
        assert!(html.contains("Back to profile"));
        assert!(html.contains("Sorry, I cannot help"));
        assert!(html.contains("0 parsed, at least 3 needed"));
    }

    #[test]
    fn test_answer_form_keeps_selection() {
        let mut answers = AnswerSet::new();
        answers.select(0, 'b');
        let html = render(SessionState::CollectingAnswers {
            profile: profile(),
            questions: vec![question()],
            answers,
        });
        assert!(html.contains("name=\"q0\" value=\"b\" checked"));
        assert!(html.contains("Q1. Which one?"));
    }

    #[test]
    fn test_report_shows_total() {
        let mut answers = AnswerSet::new();
        answers.select(0, 'c');
        let questions = vec![question()];
        let report = score(&questions, &answers).unwrap();
        let html = render(SessionState::Scored {
            profile: profile(),
            questions,
            answers,
            report,
        });
        assert!(html.contains("Total Score: 10 / 10"));
        assert!(html.contains("Score for this question: 10/10"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut p = profile();
        p.tech_stack = "<script>alert(1)</script>".to_string();
        let html = render(SessionState::RequestingQuestions {
            profile: p,
            failure: None,
        });
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}

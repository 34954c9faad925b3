use maud::{html, Markup};

use crate::screening::models::{CandidateProfile, Question, ScoreReport, POINTS_PER_QUESTION};
use crate::views::{layout, questions::question_summary};

fn candidate_summary(profile: &CandidateProfile) -> Markup {
    html! {
        table {
            tr { th { "Name" } td { (profile.name) } }
            tr { th { "Email" } td { (profile.email) } }
            tr { th { "Phone" } td { (profile.phone) } }
            tr { th { "Experience" } td { (profile.years_of_experience) " years" } }
            tr { th { "Desired position" } td { (profile.desired_role) } }
            tr { th { "Location" } td { (profile.location) } }
            tr { th { "Tech stack" } td { (profile.tech_stack) } }
        }
    }
}

fn answer_line(question: &Question, letter: char) -> Markup {
    html! {
        (letter) ") " (question.option_text(letter).unwrap_or_default())
    }
}

pub fn score_report(profile: &CandidateProfile, questions: &[Question], report: &ScoreReport) -> Markup {
    html! {
        h2 { "📊 Evaluation Results" }
        p { "Thank you, " (profile.name) "." }
        details {
            summary { "Your profile" }
            (candidate_summary(profile))
        }
        @for (question, result) in questions.iter().zip(&report.results) {
            section.question {
                (question_summary(result.index, question))
                p { strong { "Your Answer: " } (answer_line(question, result.selected)) }
                p { strong { "Correct Answer: " } (answer_line(question, result.correct)) }
                p {
                    @if result.is_correct { "✅ " } @else { "❌ " }
                    "Score for this question: " (result.points) "/" (POINTS_PER_QUESTION)
                }
            }
        }
        h3 { "🏁 Total Score: " (report.total) " / " (report.max) }
        (layout::reset_button("Start a new screening"))
    }
}

pub fn goodbye(candidate_name: Option<&str>) -> Markup {
    html! {
        h2 {
            @if let Some(name) = candidate_name { "Goodbye, " (name) "!" } @else { "Goodbye!" }
        }
        p { (crate::screening::chat::GOODBYE_MESSAGE) }
        (layout::reset_button("Start again"))
    }
}

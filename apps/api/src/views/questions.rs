use maud::{html, Markup};

use crate::names;
use crate::screening::models::{render_questions, AnswerSet, CandidateProfile, Question};
use crate::screening::session::GenerationFailure;
use crate::views::layout;

fn options_list(question: &Question) -> Markup {
    html! {
        ul style="list-style: none; padding-left: 0;" {
            @for opt in &question.options {
                li { (opt.letter) ") " (opt.text) }
            }
        }
    }
}

/// Shown while a profile is on file but no usable questions exist yet.
pub fn generation_status(profile: &CandidateProfile, failure: Option<&GenerationFailure>) -> Markup {
    html! {
        h2 { "🧠 Technical questions" }
        p {
            "Tech stack: "
            @for (i, item) in profile.tech_stack_items().iter().enumerate() {
                @if i > 0 { ", " }
                mark { (item) }
            }
        }
        @match failure {
            Some(GenerationFailure::Transport(message)) => {
                div.error role="alert" { p { (message) } }
            }
            Some(GenerationFailure::TooFewQuestions { raw, parsed, required }) => {
                div.error role="alert" {
                    p {
                        "Could not extract enough questions from the model's reply ("
                        (parsed.len()) " parsed, at least " (required) " needed)."
                    }
                }
                details {
                    summary { "Diagnostics" }
                    h4 { "Raw reply" }
                    pre { (raw) }
                    h4 { "Parsed questions" }
                    pre { (render_questions(parsed)) }
                }
            }
            None => {
                p { "Questions have not been generated yet." }
            }
        }
        form method="post" action=(names::RETRY_URL) style="display: inline;"
             onsubmit="document.getElementById('waiting').hidden = false;" {
            button type="submit" {
                @if failure.is_some() { "Retry" } @else { "Generate questions" }
            }
        }
        " "
        (layout::reset_button("Back to profile"))
        p #waiting hidden { "⏳ Generating your technical questions..." }
    }
}

/// Single-choice selector per question. Existing selections stay checked when
/// the form is re-rendered after a validation error.
pub fn answer_form(questions: &[Question], answers: &AnswerSet, errors: &[String]) -> Markup {
    html! {
        h2 { "🧠 Answer Technical MCQs" }
        (layout::errors(errors))
        @if !answers.is_empty() {
            p { (answers.len()) " of " (questions.len()) " answered" }
        }
        form method="post" action=(names::ANSWERS_URL) {
            @for (i, question) in questions.iter().enumerate() {
                fieldset.question {
                    legend { strong { "Q" (i + 1) ". " (question.question) } }
                    @for opt in &question.options {
                        label {
                            @if answers.get(i) == Some(opt.letter) {
                                input type="radio" name=(names::answer_field(i)) value=(opt.letter) checked;
                            } @else {
                                input type="radio" name=(names::answer_field(i)) value=(opt.letter);
                            }
                            " " (opt.letter) ") " (opt.text)
                        }
                    }
                }
            }
            p { button type="submit" { "Submit Answers" } }
        }
        (layout::reset_button("Start over"))
    }
}

pub(crate) fn question_summary(index: usize, question: &Question) -> Markup {
    html! {
        p { strong { "Q" (index + 1) ": " (question.question) } }
        (options_list(question))
    }
}

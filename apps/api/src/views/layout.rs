use maud::{html, Markup, DOCTYPE};

use crate::names;
use crate::screening::chat::{ChatLine, Speaker};

fn css() -> Markup {
    html! {
        style {
            "body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }"
            "label { display: block; margin-top: 0.75rem; }"
            "input[type=text], input[type=email], input[type=number], textarea { width: 100%; padding: 0.4rem; }"
            ".notice { background: #d4edda; color: #155724; padding: 0.5rem; border-radius: 4px; }"
            ".error { background: #f8d7da; color: #721c24; padding: 0.5rem; border-radius: 4px; }"
            ".question { border-bottom: 1px solid #ddd; padding: 0.75rem 0; }"
            ".chat { margin-top: 2rem; border-top: 1px solid #ddd; padding-top: 1rem; }"
            "pre { white-space: pre-wrap; background: #f4f4f4; padding: 0.5rem; }"
        }
    }
}

fn header() -> Markup {
    html! {
        header {
            h1 { "🤖 TalentScout AI" }
            p {
                "Welcome to TalentScout! I'm your AI hiring assistant here to help with initial "
                "candidate screening. Type " em { "exit" } " anytime to end."
            }
        }
    }
}

fn chat(history: &[ChatLine]) -> Markup {
    html! {
        section.chat {
            form method="post" action=(names::CHAT_URL) {
                label {
                    "👤 You:"
                    input type="text" name="message" placeholder="Say something..." autocomplete="off";
                }
            }
            @for line in history {
                p {
                    @match line.speaker {
                        Speaker::Candidate => { "👤: " }
                        Speaker::Assistant => { "🤖: " }
                    }
                    (line.message)
                }
            }
        }
    }
}

pub fn notice(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            p.notice { "✅ " (message) }
        }
    }
}

pub fn errors(messages: &[String]) -> Markup {
    html! {
        @if !messages.is_empty() {
            div.error role="alert" {
                @for message in messages {
                    p { (message) }
                }
            }
        }
    }
}

/// Button that wipes the session and returns to the profile form.
pub fn reset_button(label: &str) -> Markup {
    html! {
        form method="post" action=(names::RESET_URL) style="display: inline;" {
            button type="submit" { (label) }
        }
    }
}

/// Full HTML page with the shared header and chat box.
pub fn page(title: &str, body: Markup, history: &[ChatLine]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · TalentScout AI" }
                (css())
            }
            body {
                (header())
                main { (body) }
                (chat(history))
            }
        }
    }
}

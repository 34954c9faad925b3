/// Inputs that end the conversation.
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "bye"];

pub const GOODBYE_MESSAGE: &str = "Thanks for your time! We'll contact you shortly. Goodbye!";
pub const FALLBACK_MESSAGE: &str =
    "I didn't catch that. Please clarify or type 'exit' to finish.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Candidate,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub message: String,
}

/// How a chat box submission should be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatIntent {
    Ignore,
    Exit,
    Other(String),
}

pub fn classify(input: &str) -> ChatIntent {
    let input = input.trim();
    if input.is_empty() {
        return ChatIntent::Ignore;
    }
    let lower = input.to_lowercase();
    if EXIT_KEYWORDS.contains(&lower.as_str()) {
        ChatIntent::Exit
    } else {
        ChatIntent::Other(input.to_string())
    }
}

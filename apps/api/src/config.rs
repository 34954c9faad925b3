use anyhow::{bail, Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::screening::prompts::QUESTION_COUNT;
use crate::screening::session::{SessionContext, DEFAULT_MIN_QUESTIONS};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub model: String,
    pub temperature: f32,
    pub min_questions: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let optional = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let temperature = optional("GROQ_TEMPERATURE", &DEFAULT_TEMPERATURE.to_string())
            .parse::<f32>()
            .context("GROQ_TEMPERATURE must be a number")?;
        if !(0.0..=2.0).contains(&temperature) {
            bail!("GROQ_TEMPERATURE must be between 0 and 2, got {temperature}");
        }

        let min_questions = optional("MIN_QUESTIONS", &DEFAULT_MIN_QUESTIONS.to_string())
            .parse::<usize>()
            .context("MIN_QUESTIONS must be a whole number")?;
        if !(1..=QUESTION_COUNT).contains(&min_questions) {
            bail!("MIN_QUESTIONS must be between 1 and {QUESTION_COUNT}, got {min_questions}");
        }

        Ok(Config {
            groq_api_key: require("GROQ_API_KEY")?,
            groq_api_url: optional("GROQ_API_URL", DEFAULT_API_URL),
            model: optional("GROQ_MODEL", DEFAULT_MODEL),
            temperature,
            min_questions,
            port: optional("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG", "info"),
        })
    }

    pub fn session_context(&self) -> SessionContext {
        SessionContext {
            min_questions: self.min_questions,
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}

// Candidate screening: prompt building, reply parsing, scoring and the
// per-session state machine, plus the HTTP handlers that drive it.
// All LLM calls go through llm_client via the QuestionGenerator trait.

pub mod chat;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod scoring;
pub mod session;
pub mod store;
pub mod validation;

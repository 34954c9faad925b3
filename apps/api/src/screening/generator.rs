//! Question generation round: prompt the model for the candidate's tech stack
//! and feed whatever comes back into the session state machine.

use tracing::{info, warn};

use crate::llm_client::QuestionGenerator;
use crate::screening::prompts::build_questions_prompt;
use crate::screening::session::{
    transition, Event, GenerationFailure, Rejected, SessionContext, SessionError, SessionState,
};

/// Runs one generation round for a session in `RequestingQuestions`.
///
/// Exactly one call is made to the model. Transport failures and short parses
/// leave the session in `RequestingQuestions` with the failure recorded, ready
/// for a user-initiated retry.
pub async fn request_questions(
    state: SessionState,
    llm: &dyn QuestionGenerator,
    ctx: &SessionContext,
) -> Result<SessionState, Rejected> {
    let prompt = match &state {
        SessionState::RequestingQuestions { profile, .. } => {
            Some(build_questions_prompt(&profile.tech_stack))
        }
        _ => None,
    };
    let Some(prompt) = prompt else {
        let error = SessionError::InvalidTransition {
            state: state.name(),
            event: "request questions",
        };
        return Err(Rejected { state, error });
    };

    let reply = llm
        .generate(&prompt, &ctx.model, ctx.temperature)
        .await
        .map_err(|e| format!("Error generating questions: {e}"));

    let next = transition(state, Event::QuestionsReceived(reply), ctx)?;
    match &next {
        SessionState::CollectingAnswers { questions, .. } => {
            info!("Generated {} questions", questions.len());
        }
        SessionState::RequestingQuestions {
            failure: Some(GenerationFailure::Transport(message)),
            ..
        } => warn!("Question generation failed: {message}"),
        SessionState::RequestingQuestions {
            failure: Some(GenerationFailure::TooFewQuestions { parsed, required, .. }),
            ..
        } => warn!(
            "Model reply parsed into {} questions, need at least {required}",
            parsed.len()
        ),
        _ => {}
    }
    Ok(next)
}

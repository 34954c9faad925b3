use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::names;
use crate::screening::generator::request_questions;
use crate::screening::models::ProfileForm;
use crate::screening::session::{Event, SessionError};
use crate::state::AppState;
use crate::views;

#[derive(Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

fn session_missing(id: Uuid) -> AppError {
    AppError::Internal(anyhow::anyhow!("session {id} not found"))
}

/// Finds the caller's session from the cookie, creating one (and the cookie) if needed.
async fn resolve_session(state: &AppState, jar: CookieJar) -> (CookieJar, Uuid) {
    let existing = jar
        .get(names::SESSION_COOKIE_NAME)
        .and_then(|c| Uuid::parse_str(c.value()).ok());
    let id = state.sessions.ensure(existing).await;
    if existing == Some(id) {
        return (jar, id);
    }
    let cookie = Cookie::build((names::SESSION_COOKIE_NAME, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

/// One generation round outside the store lock. Only the state is written back,
/// and only if nothing else moved the session while the model was working.
async fn run_generation(state: &AppState, id: Uuid) -> Result<(), AppError> {
    let started_from = state
        .sessions
        .snapshot(id)
        .await
        .ok_or_else(|| session_missing(id))?
        .state;
    let next = request_questions(started_from.clone(), state.llm.as_ref(), &state.session_ctx)
        .await
        .map_err(|rejected| AppError::Session(rejected.error))?;
    let written = state
        .sessions
        .update(id, |session| {
            if session.state != started_from {
                return false;
            }
            session.state = next;
            true
        })
        .await
        .ok_or_else(|| session_missing(id))?;
    if !written {
        warn!("Session {id} changed during question generation; discarding the result");
    }
    Ok(())
}

fn see_home(jar: CookieJar) -> Response {
    (jar, Redirect::to(names::HOME_URL)).into_response()
}

/// GET /
pub async fn handle_home(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, id) = resolve_session(&state, jar).await;
    let page = state
        .sessions
        .update(id, |session| {
            let notice = session.take_notice();
            views::session_page(session, notice.as_deref(), &[])
        })
        .await
        .ok_or_else(|| session_missing(id))?;
    Ok((jar, page).into_response())
}

/// POST /profile
pub async fn handle_profile(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    let (jar, id) = resolve_session(&state, jar).await;
    let ctx = &state.session_ctx;

    let rejected_page = state
        .sessions
        .update(id, |session| {
            match session.apply(Event::ProfileSubmitted(form.clone()), ctx) {
                Ok(()) => {
                    session.notice = Some(
                        "Info submitted! Scroll down to answer your technical questions."
                            .to_string(),
                    );
                    Ok(None)
                }
                Err(SessionError::InvalidProfile(errors)) => {
                    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    Ok(Some(views::session_page_with_form(
                        session, None, &messages, &form,
                    )))
                }
                Err(e) => Err(AppError::Session(e)),
            }
        })
        .await
        .ok_or_else(|| session_missing(id))??;

    if let Some(page) = rejected_page {
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, page).into_response());
    }

    info!("Profile accepted for session {id}");
    run_generation(&state, id).await?;
    Ok(see_home(jar))
}

/// POST /questions/retry
pub async fn handle_retry(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, id) = resolve_session(&state, jar).await;
    info!("Retrying question generation for session {id}");
    run_generation(&state, id).await?;
    Ok(see_home(jar))
}

/// Selections from the answer form, keyed by question index. Fields that are
/// not `q<index>` are ignored. Values must be a single letter.
fn parse_selections(form: &BTreeMap<String, String>) -> Result<Vec<(usize, char)>, SessionError> {
    let mut selections = Vec::new();
    for (key, value) in form {
        let Some(index) = key.strip_prefix('q').and_then(|i| i.parse::<usize>().ok()) else {
            continue;
        };
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => selections.push((index, letter)),
            (first, _) => return Err(SessionError::InvalidLetter(first.unwrap_or('?'))),
        }
    }
    selections.sort_unstable();
    Ok(selections)
}

/// POST /answers
pub async fn handle_answers(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<Response, AppError> {
    let (jar, id) = resolve_session(&state, jar).await;
    let ctx = &state.session_ctx;

    let rejected_page = state
        .sessions
        .update(id, |session| {
            let result = parse_selections(&form).and_then(|selections| {
                for (index, letter) in selections {
                    session.apply(Event::AnswerSelected { index, letter }, ctx)?;
                }
                session.apply(Event::AnswersSubmitted, ctx)
            });
            match result {
                Ok(()) => {
                    session.notice = Some("Answers submitted! Evaluating...".to_string());
                    Ok(None)
                }
                Err(e @ SessionError::InvalidTransition { .. }) => Err(AppError::Session(e)),
                Err(e) => Ok(Some(views::session_page(session, None, &[e.to_string()]))),
            }
        })
        .await
        .ok_or_else(|| session_missing(id))??;

    if let Some(page) = rejected_page {
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, page).into_response());
    }

    info!("Answers scored for session {id}");
    Ok(see_home(jar))
}

/// POST /reset
pub async fn handle_reset(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, id) = resolve_session(&state, jar).await;
    state
        .sessions
        .update(id, |session| session.apply(Event::Reset, &state.session_ctx))
        .await
        .ok_or_else(|| session_missing(id))??;
    info!("Session {id} reset");
    Ok(see_home(jar))
}

/// POST /chat
pub async fn handle_chat(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChatForm>,
) -> Result<Response, AppError> {
    let (jar, id) = resolve_session(&state, jar).await;
    state
        .sessions
        .update(id, |session| session.chat(&form.message, &state.session_ctx))
        .await
        .ok_or_else(|| session_missing(id))?;
    Ok(see_home(jar))
}

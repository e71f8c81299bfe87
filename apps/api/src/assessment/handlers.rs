//! Axum route handlers for the Assessment API.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::assessment::gate::GatePrompt;
use crate::assessment::models::AssessmentRecord;
use crate::assessment::progress::Progress;
use crate::assessment::steps::StepView;
use crate::assessment::wizard::{StepSubmission, Wizard, WizardError, WizardState};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct WizardResponse {
    pub session_id: Uuid,
    pub state: WizardState,
    pub progress: Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<StepView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<&'static GatePrompt>,
    /// Everything accepted so far; sections not yet submitted are empty.
    pub record: AssessmentRecord,
}

impl WizardResponse {
    fn from_wizard(session_id: Uuid, wizard: &Wizard) -> Self {
        Self {
            session_id,
            state: wizard.state(),
            progress: wizard.progress(),
            step: wizard.current_view(),
            gate: wizard.gate_prompt(),
            record: wizard.record().clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub session_id: Uuid,
    pub state: WizardState,
    pub record: AssessmentRecord,
    pub redirect: &'static str,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Assessment session {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessment
///
/// Starts a new wizard with an empty record at step 1.
pub async fn handle_start(
    State(state): State<AppState>,
) -> (StatusCode, Json<WizardResponse>) {
    let session = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(WizardResponse::from_wizard(session.id, &session.wizard)),
    )
}

/// GET /api/v1/assessment/:id
pub async fn handle_get(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<WizardResponse>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(WizardResponse::from_wizard(id, &session.wizard)))
}

/// POST /api/v1/assessment/:id/submit
///
/// Validates the current step. On failure the wizard is untouched and the
/// field errors come back as a 422, together with the submitted form
/// re-rendered with those errors.
pub async fn handle_submit(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(submission): AppJson<StepSubmission>,
) -> Result<Json<WizardResponse>, AppError> {
    let response = state
        .sessions
        .with_session(id, |session| {
            match session.wizard.submit(submission.clone()) {
                Ok(_) => Ok(WizardResponse::from_wizard(id, &session.wizard)),
                Err(WizardError::Validation(fields)) => Err(AppError::Validation {
                    step: Some(Box::new(submission.render_rejected(&fields))),
                    fields,
                }),
                Err(err) => Err(err.into()),
            }
        })
        .await
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(response))
}

/// POST /api/v1/assessment/:id/back
pub async fn handle_back(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<WizardResponse>, AppError> {
    let response = state
        .sessions
        .with_session(id, |session| {
            session
                .wizard
                .back()
                .map(|_| WizardResponse::from_wizard(id, &session.wizard))
        })
        .await
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(response))
}

/// POST /api/v1/assessment/:id/dismiss
///
/// Closes the completion gate without finishing; the wizard returns to step 3.
pub async fn handle_dismiss(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<WizardResponse>, AppError> {
    let response = state
        .sessions
        .with_session(id, |session| {
            session
                .wizard
                .dismiss()
                .map(|_| WizardResponse::from_wizard(id, &session.wizard))
        })
        .await
        .ok_or_else(|| session_not_found(id))??;
    Ok(Json(response))
}

/// POST /api/v1/assessment/:id/confirm
///
/// Finishes the assessment: hands the record to the completion sink, discards
/// the session and tells the client where to go next. If the sink fails the
/// wizard is put back at the gate so the client can retry.
pub async fn handle_confirm(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<CompletionResponse>, AppError> {
    let (completion, at_gate) = state
        .sessions
        .with_session(id, |session| {
            let at_gate = session.wizard.clone();
            session.wizard.confirm().map(|completion| (completion, at_gate))
        })
        .await
        .ok_or_else(|| session_not_found(id))??;

    if let Err(err) = state.sink.deliver(id, &completion.record).await {
        warn!(session_id = %id, "Completion hand-off failed; reopening the gate");
        state
            .sessions
            .with_session(id, |session| session.wizard = at_gate)
            .await;
        return Err(err);
    }

    if let Some(session) = state.sessions.remove(id).await {
        let age = Utc::now() - session.created_at;
        debug!(session_id = %id, age_secs = age.num_seconds(), "Session discarded");
    }

    Ok(Json(CompletionResponse {
        session_id: id,
        state: WizardState::Completed,
        record: completion.record,
        redirect: completion.redirect,
    }))
}

/// DELETE /api/v1/assessment/:id
///
/// Abandons an unfinished assessment.
pub async fn handle_abandon(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .remove(id)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}

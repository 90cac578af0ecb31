use super::types::{ErrorResponse, HealthResponse, MedicineLookupResponse, MessageResponse};
use crate::{
    Error,
    app::{AppSnapshot, Controller},
    presenter::{SUBSCRIPTION_STUB_MESSAGE, render_error_banner, render_quota_notice},
    quota::{IMAGE_UPLOAD_LIMIT, QuotaStatus},
    request::{Language, MedicineForm},
};
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{error, info};

#[derive(Clone)]
pub struct ServerState {
    pub controller: Arc<Controller>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: Error) -> HandlerError {
    if !err.is_user_facing() {
        error!("Unexpected error while handling request: {}", err);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("An unexpected error occurred")),
        );
    }

    match err {
        Error::Validation(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::new(e.to_string())),
        ),
        Error::QuotaExceeded { unlock_at } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: render_quota_notice(Some(unlock_at)),
                unlock_at: Some(unlock_at),
                limit: Some(IMAGE_UPLOAD_LIMIT),
            }),
        ),
        Error::Busy => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(Error::Busy.to_string())),
        ),
        // Backend failures carry only the generic message.
        other => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(other.to_string())),
        ),
    }
}

pub async fn submit_medicine(
    State(state): State<ServerState>,
    Json(form): Json<MedicineForm>,
) -> Result<Json<MedicineLookupResponse>, HandlerError> {
    info!("Received medicine lookup in {}", form.language);

    let report = state.controller.submit(form).await.map_err(error_response)?;
    Ok(Json(MedicineLookupResponse { report }))
}

pub async fn get_state(
    State(state): State<ServerState>,
) -> Result<Json<AppSnapshot>, HandlerError> {
    state.controller.snapshot().map(Json).map_err(error_response)
}

/// Plain-text view of the current result, or the error banner after a failure.
pub async fn get_result(State(state): State<ServerState>) -> Result<String, HandlerError> {
    if let Some(report) = state.controller.current_report().map_err(error_response)? {
        return Ok(report.render_text());
    }

    let snapshot = state.controller.snapshot().map_err(error_response)?;
    match snapshot.context.error {
        Some(message) => Ok(render_error_banner(&message)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("No result available")),
        )),
    }
}

pub async fn get_quota(State(state): State<ServerState>) -> Json<QuotaStatus> {
    Json(state.controller.quota_status().await)
}

pub async fn dismiss_quota_modal(
    State(state): State<ServerState>,
) -> Result<StatusCode, HandlerError> {
    state
        .controller
        .dismiss_quota_modal()
        .map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn subscribe() -> (StatusCode, Json<MessageResponse>) {
    info!("Subscription requested");
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(MessageResponse {
            message: SUBSCRIPTION_STUB_MESSAGE.to_string(),
        }),
    )
}

pub async fn languages() -> Json<Vec<Language>> {
    Json(Language::iter().collect())
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

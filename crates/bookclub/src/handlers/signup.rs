use axum::{extract::State, http::StatusCode, Json};

use bookclub_core::signup::SignupRequest;

use crate::{handlers::AppError, state::AppState};

/// Accept a book club signup (POST /api/bookclubsignup).
///
/// The signup is queued as submitted, without validation, and the response
/// body is empty. Storing it is the queue trigger's job.
pub async fn create_signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<StatusCode, AppError> {
    let message_id = state.queue_access.add(&payload).await?;

    tracing::info!(%message_id, genre = %payload.genre, "Queued book club signup");

    Ok(StatusCode::OK)
}

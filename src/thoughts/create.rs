use axum::{debug_handler, extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{AppError, AppResult};

use super::{model::validate_message, Thought, Thoughts};

const SAVE_FAILED: &str = "Could not save thought to the database";

// anything besides `message` is ignored
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NewThought {
    #[serde(default)]
    message: Option<Value>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn create_thought(
    State(thoughts): State<Thoughts>,
    payload: Result<Json<NewThought>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Thought>)> {
    let Json(NewThought { message }) = payload.map_err(|rejection| {
        AppError::bad_request(SAVE_FAILED, rejection.body_text())
    })?;

    let message = validate_message(message.as_ref())
        .map_err(|err| AppError::bad_request(SAVE_FAILED, err.to_errors()))?;

    let thought = thoughts.insert(message).await.map_err(|err| {
        warn!("could not save thought: {err}");
        AppError::bad_request(SAVE_FAILED, err.to_string())
    })?;

    info!("new thought {}", thought.id);
    Ok((StatusCode::CREATED, Json(thought)))
}

mod create;
mod like;
mod list;
mod remove;
pub mod model;
mod store;

use axum::{routing::{delete, get, post}, Router};
use serde_json::json;
use uuid::Uuid;

use crate::{AppError, AppResult, AppState};

pub use model::{LikeSummary, Thought, ValidationError};
pub use store::Thoughts;

/// How many thoughts `GET /thoughts` returns.
pub const LIST_LIMIT: u32 = 20;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/thoughts", get(list::list_thoughts).post(create::create_thought))
        .route("/thoughts/{thought_id}", delete(remove::delete_thought))
        .route("/thoughts/{thought_id}/like", post(like::like_thought))
}

pub(crate) fn parse_thought_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|err| {
        AppError::bad_request(
            "Invalid request",
            json!({
                "kind": "uuid",
                "path": "thoughtId",
                "value": raw,
                "message": err.to_string(),
            }),
        )
    })
}

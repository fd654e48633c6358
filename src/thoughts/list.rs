use axum::{debug_handler, extract::State, Json};
use tracing::warn;

use crate::{AppError, AppResult};

use super::{Thought, Thoughts, LIST_LIMIT};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn list_thoughts(
    State(thoughts): State<Thoughts>,
) -> AppResult<Json<Vec<Thought>>> {
    let list = thoughts.list_recent(LIST_LIMIT).await.map_err(|err| {
        warn!("could not list thoughts: {err}");
        AppError::bad_request("could not find list of thoughts", err.to_string())
    })?;

    Ok(Json(list))
}

use axum::{debug_handler, extract::{rejection::PathRejection, Path, State}, Json};
use tracing::{info, warn};

use crate::{AppError, AppResult};

use super::{parse_thought_id, Thought, Thoughts};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn delete_thought(
    State(thoughts): State<Thoughts>,
    thought_id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Thought>> {
    let Path(thought_id) = thought_id
        .map_err(|rejection| AppError::bad_request("Invalid request", rejection.body_text()))?;
    let id = parse_thought_id(&thought_id)?;

    let Some(deleted) = thoughts.delete(id).await.map_err(|err| {
        warn!("could not delete {id}: {err}");
        AppError::bad_request("Invalid request", err.to_string())
    })? else {
        return Err(AppError::NotFound);
    };

    info!("deleted thought {id}");
    Ok(Json(deleted))
}

use axum::{debug_handler, extract::{rejection::PathRejection, Path, State}, Json};
use tracing::{debug, warn};

use crate::{AppError, AppResult};

use super::{parse_thought_id, LikeSummary, Thoughts};

/// An unknown but well-formed id still answers 200, with `matchedCount: 0`.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn like_thought(
    State(thoughts): State<Thoughts>,
    thought_id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<LikeSummary>> {
    let Path(thought_id) = thought_id
        .map_err(|rejection| AppError::bad_request("Invalid request", rejection.body_text()))?;
    let id = parse_thought_id(&thought_id)?;

    let summary = thoughts.like(id).await.map_err(|err| {
        warn!("could not like {id}: {err}");
        AppError::bad_request("Invalid request", err.to_string())
    })?;

    if summary.matched_count == 0 {
        debug!("like for unknown thought {id}");
    }
    Ok(Json(summary))
}

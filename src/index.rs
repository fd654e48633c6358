use axum::{debug_handler, Json};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub methods: &'static [&'static str],
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint { path: "/", methods: &["GET"] },
    Endpoint { path: "/thoughts", methods: &["GET", "POST"] },
    Endpoint { path: "/thoughts/{thoughtId}/like", methods: &["POST"] },
    Endpoint { path: "/thoughts/{thoughtId}", methods: &["DELETE"] },
];

#[debug_handler]
pub async fn index() -> Json<&'static [Endpoint]> {
    Json(ENDPOINTS)
}

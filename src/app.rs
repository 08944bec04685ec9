use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::form_create))
        .route("/entries/:id", post(handlers::form_update))
        .route("/entries/:id/delete", post(handlers::form_delete))
        .route("/api/entries", get(handlers::list_entries).post(handlers::create_entry))
        .route(
            "/api/entries/:id",
            put(handlers::update_entry).delete(handlers::delete_entry),
        )
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/charts/:metric", get(handlers::get_chart))
        .with_state(state)
}

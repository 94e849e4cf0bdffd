pub mod health;

use axum::{routing::get, Router};

use crate::companies::handlers as companies;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/companies",
            get(companies::handle_list_companies).post(companies::handle_create_company),
        )
        .route(
            "/companies/:handle",
            get(companies::handle_get_company)
                .patch(companies::handle_update_company)
                .delete(companies::handle_delete_company),
        )
        .route(
            "/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/jobs/:id",
            get(jobs::handle_get_job)
                .patch(jobs::handle_update_job)
                .delete(jobs::handle_delete_job),
        )
        .with_state(state)
}

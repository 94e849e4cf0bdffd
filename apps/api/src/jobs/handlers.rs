//! Axum route handlers for `/jobs`.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::jobs::repository;
use crate::models::job::{Job, JobSearch, JobUpdate, NewJob};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

/// POST /jobs (admin)
pub async fn handle_create_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(req): AppJson<NewJob>,
) -> Result<(StatusCode, Json<JobResponse>), AppError> {
    req.validate()?;
    let job = repository::create(&state.db, &req).await?;
    info!(
        "{} created job {} for company {}",
        admin.username, job.id, job.company_handle
    );
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// GET /jobs
///
/// Filters by `title`, `minSalary` and `hasEquity` when any is given.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    AppQuery(search): AppQuery<JobSearch>,
) -> Result<Json<JobListResponse>, AppError> {
    search.validate()?;
    let jobs = if search.is_empty() {
        repository::find_all(&state.db).await?
    } else {
        repository::filter_by(&state.db, search).await?
    };
    Ok(Json(JobListResponse { jobs }))
}

/// GET /jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<JobResponse>, AppError> {
    let job = repository::get(&state.db, id).await?;
    Ok(Json(JobResponse { job }))
}

/// PATCH /jobs/:id (admin)
pub async fn handle_update_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<JobUpdate>,
) -> Result<Json<JobResponse>, AppError> {
    req.validate()?;
    let job = repository::update(&state.db, id, req).await?;
    info!("{} updated job {id}", admin.username);
    Ok(Json(JobResponse { job }))
}

/// DELETE /jobs/:id (admin)
pub async fn handle_delete_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(id): AppPath<i32>,
) -> Result<Json<DeletedResponse>, AppError> {
    repository::remove(&state.db, id).await?;
    info!("{} removed job {id}", admin.username);
    Ok(Json(DeletedResponse { deleted: id }))
}

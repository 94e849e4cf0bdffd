//! Axum route handlers for `/companies`.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::auth::AdminUser;
use crate::companies::repository;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::models::company::{Company, CompanyDetail, CompanySearch, CompanyUpdate, NewCompany};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetail,
}

#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<Company>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

/// POST /companies (admin)
pub async fn handle_create_company(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(req): AppJson<NewCompany>,
) -> Result<(StatusCode, Json<CompanyResponse>), AppError> {
    req.validate()?;
    let company = repository::create(&state.db, &req).await?;
    info!("{} created company {}", admin.username, company.handle);
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// GET /companies
///
/// Without query parameters lists everything; otherwise filters by
/// `name`, `minEmployees` and `maxEmployees`.
pub async fn handle_list_companies(
    State(state): State<AppState>,
    AppQuery(search): AppQuery<CompanySearch>,
) -> Result<Json<CompanyListResponse>, AppError> {
    search.validate()?;
    let companies = if search.is_empty() {
        repository::find_all(&state.db).await?
    } else {
        repository::filter_by(&state.db, search).await?
    };
    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/:handle
pub async fn handle_get_company(
    State(state): State<AppState>,
    AppPath(handle): AppPath<String>,
) -> Result<Json<CompanyDetailResponse>, AppError> {
    let company = repository::get(&state.db, &handle).await?;
    Ok(Json(CompanyDetailResponse { company }))
}

/// PATCH /companies/:handle (admin)
pub async fn handle_update_company(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(handle): AppPath<String>,
    AppJson(req): AppJson<CompanyUpdate>,
) -> Result<Json<CompanyResponse>, AppError> {
    req.validate()?;
    let company = repository::update(&state.db, &handle, req).await?;
    info!("{} updated company {handle}", admin.username);
    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/:handle (admin)
pub async fn handle_delete_company(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppPath(handle): AppPath<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    repository::remove(&state.db, &handle).await?;
    info!("{} removed company {handle}", admin.username);
    Ok(Json(DeletedResponse { deleted: handle }))
}

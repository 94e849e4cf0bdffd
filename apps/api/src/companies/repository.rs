use sqlx::PgPool;

use crate::companies::filters::CompanyFilter;
use crate::errors::AppError;
use crate::models::company::{Company, CompanyDetail, CompanySearch, CompanyUpdate, NewCompany};
use crate::models::job::JobSummary;
use crate::sql::sql_for_partial_update;

/// Unique constraint Postgres names for `companies.name`.
const NAME_UNIQUE: &str = "companies_name_key";

/// API field names whose storage column differs.
const COMPANY_COLUMNS: &[(&str, &str)] = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

/// Inserts a company. Fails with `Duplicate` if the handle or name is taken.
pub async fn create(pool: &PgPool, company: &NewCompany) -> Result<Company, AppError> {
    let existing: Option<String> =
        sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
            .bind(&company.handle)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(AppError::Duplicate(format!(
            "Duplicate company: {}",
            company.handle
        )));
    }

    let created = sqlx::query_as::<_, Company>(
        r#"
        INSERT INTO companies (handle, name, description, num_employees, logo_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING handle, name, description, num_employees, logo_url
        "#,
    )
    .bind(&company.handle)
    .bind(&company.name)
    .bind(&company.description)
    .bind(company.num_employees)
    .bind(&company.logo_url)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            if db.constraint() == Some(NAME_UNIQUE) {
                AppError::Duplicate(format!("Duplicate company name: {}", company.name))
            } else {
                AppError::Duplicate(format!("Duplicate company: {}", company.handle))
            }
        }
        other => AppError::Database(other),
    })?;

    Ok(created)
}

/// Returns every company ordered by name.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Company>, AppError> {
    Ok(sqlx::query_as::<_, Company>(
        r#"
        SELECT handle, name, description, num_employees, logo_url
        FROM companies
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?)
}

/// Returns companies matching `search`. Fails with `Validation` when the
/// employee range is inverted.
pub async fn filter_by(pool: &PgPool, search: CompanySearch) -> Result<Vec<Company>, AppError> {
    let filter = CompanyFilter::from_search(search)?;
    let query = sqlx::query_as::<_, Company>(filter.sql());
    let query = match &filter {
        CompanyFilter::Name { pattern } => query.bind(pattern),
        CompanyFilter::NameAndSize { pattern, min, max } => {
            query.bind(pattern).bind(min).bind(max)
        }
        CompanyFilter::Size { min, max } => query.bind(min).bind(max),
    };
    Ok(query.fetch_all(pool).await?)
}

/// Returns a company with its jobs.
pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyDetail, AppError> {
    let company = sqlx::query_as::<_, Company>(
        r#"
        SELECT handle, name, description, num_employees, logo_url
        FROM companies
        WHERE handle = $1
        "#,
    )
    .bind(handle)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No company: {handle}")))?;

    let jobs = sqlx::query_as::<_, JobSummary>(
        r#"
        SELECT id, title, salary, equity
        FROM jobs
        WHERE company_handle = $1
        ORDER BY id
        "#,
    )
    .bind(handle)
    .fetch_all(pool)
    .await?;

    Ok(CompanyDetail { company, jobs })
}

/// Applies a partial update. Fails with `Validation` if nothing would change.
pub async fn update(
    pool: &PgPool,
    handle: &str,
    changes: CompanyUpdate,
) -> Result<Company, AppError> {
    let update = sql_for_partial_update(changes.into_changes(), COMPANY_COLUMNS)?;
    let sql = format!(
        r#"
        UPDATE companies
        SET {}
        WHERE handle = ${}
        RETURNING handle, name, description, num_employees, logo_url
        "#,
        update.set_cols,
        update.next_placeholder()
    );

    let company = update
        .bind_values(sqlx::query_as::<_, Company>(&sql))
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No company: {handle}")))?;

    Ok(company)
}

/// Deletes a company; its jobs go with it.
pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), AppError> {
    let deleted: Option<String> =
        sqlx::query_scalar("DELETE FROM companies WHERE handle = $1 RETURNING handle")
            .bind(handle)
            .fetch_optional(pool)
            .await?;
    if deleted.is_none() {
        return Err(AppError::NotFound(format!("No company: {handle}")));
    }

    Ok(())
}

use sqlx::PgPool;

use crate::errors::AppError;
use crate::jobs::filters::JobFilter;
use crate::models::job::{Job, JobSearch, JobUpdate, NewJob};
use crate::sql::sql_for_partial_update;

/// Inserts a job for an existing company and returns it with its new id.
///
/// The company check and the insert are separate statements; the foreign
/// key still refuses a company deleted in between.
pub async fn create(pool: &PgPool, job: &NewJob) -> Result<Job, AppError> {
    let company: Option<String> =
        sqlx::query_scalar("SELECT handle FROM companies WHERE handle = $1")
            .bind(&job.company_handle)
            .fetch_optional(pool)
            .await?;
    if company.is_none() {
        return Err(AppError::Validation(format!(
            "No company: {}",
            job.company_handle
        )));
    }

    let created = sqlx::query_as::<_, Job>(
        r#"
        INSERT INTO jobs (title, salary, equity, company_handle)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, salary, equity, company_handle
        "#,
    )
    .bind(&job.title)
    .bind(job.salary)
    .bind(job.equity)
    .bind(&job.company_handle)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Returns every job ordered by id.
pub async fn find_all(pool: &PgPool) -> Result<Vec<Job>, AppError> {
    Ok(sqlx::query_as::<_, Job>(
        "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY id",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn filter_by(pool: &PgPool, search: JobSearch) -> Result<Vec<Job>, AppError> {
    let filter = JobFilter::from_search(search);
    let query = sqlx::query_as::<_, Job>(filter.sql());
    let query = match &filter {
        JobFilter::Salary { min_salary } | JobFilter::SalaryWithEquity { min_salary } => {
            query.bind(min_salary)
        }
        JobFilter::Title {
            pattern,
            min_salary,
        }
        | JobFilter::TitleWithEquity {
            pattern,
            min_salary,
        } => query.bind(pattern).bind(min_salary),
    };
    Ok(query.fetch_all(pool).await?)
}

pub async fn get(pool: &PgPool, id: i32) -> Result<Job, AppError> {
    sqlx::query_as::<_, Job>(
        "SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("No job: {id}")))
}

/// Applies a partial update. A job's company cannot be changed.
pub async fn update(pool: &PgPool, id: i32, changes: JobUpdate) -> Result<Job, AppError> {
    if changes.company_handle.is_some() {
        return Err(AppError::Validation(
            "companyHandle cannot be changed".to_string(),
        ));
    }

    let update = sql_for_partial_update(changes.into_changes(), &[])?;
    let sql = format!(
        r#"
        UPDATE jobs
        SET {}
        WHERE id = ${}
        RETURNING id, title, salary, equity, company_handle
        "#,
        update.set_cols,
        update.next_placeholder()
    );

    let job = update
        .bind_values(sqlx::query_as::<_, Job>(&sql))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No job: {id}")))?;

    Ok(job)
}

pub async fn remove(pool: &PgPool, id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("No job: {id}")));
    }

    Ok(())
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::company::{require_non_empty, require_non_negative, require_non_null};
use crate::models::double_option;
use crate::sql::SqlValue;

/// `equity` is a NUMERIC column and serializes as a decimal string ("0.05").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Job listing nested under a company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), AppError> {
        require_non_empty("title", &self.title)?;
        require_non_empty("companyHandle", &self.company_handle)?;
        if let Some(salary) = self.salary {
            require_non_negative("salary", salary)?;
        }
        if let Some(equity) = self.equity {
            validate_equity(equity)?;
        }
        Ok(())
    }
}

/// Sparse job update. `companyHandle` is parsed only so it can be refused
/// with a clear message; a job never moves between companies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub equity: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub company_handle: Option<Option<String>>,
}

impl JobUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.company_handle.is_some() {
            return Err(AppError::Validation(
                "companyHandle cannot be changed".to_string(),
            ));
        }
        if let Some(title) = &self.title {
            require_non_empty("title", require_non_null("title", title.as_deref())?)?;
        }
        if let Some(Some(salary)) = self.salary {
            require_non_negative("salary", salary)?;
        }
        if let Some(Some(equity)) = self.equity {
            validate_equity(equity)?;
        }
        Ok(())
    }

    pub fn into_changes(self) -> Vec<(&'static str, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(title) = self.title {
            changes.push(("title", SqlValue::Text(title)));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", SqlValue::Numeric(equity)));
        }
        changes
    }
}

/// Query-string criteria for `GET /jobs`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearch {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
}

impl JobSearch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            require_non_empty("title", title)?;
        }
        if let Some(min) = self.min_salary {
            require_non_negative("minSalary", min)?;
        }
        Ok(())
    }
}

fn validate_equity(equity: Decimal) -> Result<(), AppError> {
    if equity < Decimal::ZERO || equity > Decimal::ONE {
        return Err(AppError::Validation(
            "equity must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::double_option;
use crate::models::job::JobSummary;
use crate::sql::SqlValue;

const MAX_HANDLE_LEN: usize = 25;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with the jobs it has posted.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_handle(&self.handle)?;
        require_non_empty("name", &self.name)?;
        if let Some(n) = self.num_employees {
            require_non_negative("numEmployees", n)?;
        }
        if let Some(url) = &self.logo_url {
            validate_url("logoUrl", url)?;
        }
        Ok(())
    }
}

/// Sparse company update. `handle` is immutable and not accepted here.
///
/// Every field is `Option<Option<_>>`: absent leaves the column alone,
/// `null` clears it. `name` and `description` refuse `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            require_non_empty("name", require_non_null("name", name.as_deref())?)?;
        }
        if let Some(description) = &self.description {
            require_non_null("description", description.as_deref())?;
        }
        if let Some(Some(n)) = self.num_employees {
            require_non_negative("numEmployees", n)?;
        }
        if let Some(Some(url)) = &self.logo_url {
            validate_url("logoUrl", url)?;
        }
        Ok(())
    }

    /// The fields present in this update, keyed by their API name.
    pub fn into_changes(self) -> Vec<(&'static str, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(name) = self.name {
            changes.push(("name", SqlValue::Text(name)));
        }
        if let Some(description) = self.description {
            changes.push(("description", SqlValue::Text(description)));
        }
        if let Some(n) = self.num_employees {
            changes.push(("numEmployees", SqlValue::Int(n)));
        }
        if let Some(url) = self.logo_url {
            changes.push(("logoUrl", SqlValue::Text(url)));
        }
        changes
    }
}

/// Query-string criteria for `GET /companies`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanySearch {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanySearch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.min_employees.is_none() && self.max_employees.is_none()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(min) = self.min_employees {
            require_non_negative("minEmployees", min)?;
        }
        if let Some(max) = self.max_employees {
            require_non_negative("maxEmployees", max)?;
        }
        Ok(())
    }
}

fn validate_handle(handle: &str) -> Result<(), AppError> {
    require_non_empty("handle", handle)?;
    if handle.chars().count() > MAX_HANDLE_LEN {
        return Err(AppError::Validation(format!(
            "handle must be at most {MAX_HANDLE_LEN} characters"
        )));
    }
    if handle != handle.to_lowercase() {
        return Err(AppError::Validation("handle must be lowercase".to_string()));
    }
    Ok(())
}

fn validate_url(field: &str, url: &str) -> Result<(), AppError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => Ok(()),
        _ => Err(AppError::Validation(format!("{field} must be an http(s) URL"))),
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

pub(crate) fn require_non_null<'a>(
    field: &str,
    value: Option<&'a str>,
) -> Result<&'a str, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{field} cannot be null")))
}

pub(crate) fn require_non_negative(field: &str, value: i32) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::Validation(format!("{field} must be >= 0")));
    }
    Ok(())
}

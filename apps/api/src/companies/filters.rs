//! Search shapes for `GET /companies`.
//!
//! Each shape owns one fixed, parameterized query. Which shape runs depends
//! only on which criteria the caller supplied.

use crate::errors::AppError;
use crate::models::company::CompanySearch;

const BY_NAME: &str = r#"
    SELECT handle, name, description, num_employees, logo_url
    FROM companies
    WHERE name ILIKE $1
    ORDER BY name
"#;

const BY_NAME_AND_SIZE: &str = r#"
    SELECT handle, name, description, num_employees, logo_url
    FROM companies
    WHERE name ILIKE $1 AND num_employees BETWEEN $2 AND $3
    ORDER BY name
"#;

const BY_SIZE: &str = r#"
    SELECT handle, name, description, num_employees, logo_url
    FROM companies
    WHERE num_employees BETWEEN $1 AND $2
    ORDER BY name
"#;

#[derive(Debug, Clone, PartialEq)]
pub enum CompanyFilter {
    /// Name only. Companies without a recorded size still match.
    Name { pattern: String },
    NameAndSize { pattern: String, min: i32, max: i32 },
    Size { min: i32, max: i32 },
}

impl CompanyFilter {
    /// Picks the shape for `search`. Missing bounds default to `0..=i32::MAX`.
    pub fn from_search(search: CompanySearch) -> Result<Self, AppError> {
        let sized = search.min_employees.is_some() || search.max_employees.is_some();
        let min = search.min_employees.unwrap_or(0);
        let max = search.max_employees.unwrap_or(i32::MAX);
        if min > max {
            return Err(AppError::Validation(
                "minEmployees cannot be greater than maxEmployees".to_string(),
            ));
        }

        Ok(match search.name {
            Some(name) if sized => CompanyFilter::NameAndSize {
                pattern: contains_pattern(&name),
                min,
                max,
            },
            Some(name) => CompanyFilter::Name {
                pattern: contains_pattern(&name),
            },
            None => CompanyFilter::Size { min, max },
        })
    }

    pub const fn sql(&self) -> &'static str {
        match self {
            CompanyFilter::Name { .. } => BY_NAME,
            CompanyFilter::NameAndSize { .. } => BY_NAME_AND_SIZE,
            CompanyFilter::Size { .. } => BY_SIZE,
        }
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards in it escaped.
pub fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(name: Option<&str>, min: Option<i32>, max: Option<i32>) -> CompanySearch {
        CompanySearch {
            name: name.map(str::to_string),
            min_employees: min,
            max_employees: max,
        }
    }

    #[test]
    fn test_name_only() {
        let f = CompanyFilter::from_search(search(Some("net"), None, None)).unwrap();
        assert_eq!(
            f,
            CompanyFilter::Name {
                pattern: "%net%".into()
            }
        );
        assert_eq!(f.sql(), BY_NAME);
    }

    #[test]
    fn test_name_with_one_bound() {
        let f = CompanyFilter::from_search(search(Some("net"), None, Some(100))).unwrap();
        assert_eq!(
            f,
            CompanyFilter::NameAndSize {
                pattern: "%net%".into(),
                min: 0,
                max: 100
            }
        );
        assert_eq!(f.sql(), BY_NAME_AND_SIZE);
    }

    #[test]
    fn test_range_only_defaults() {
        let f = CompanyFilter::from_search(search(None, Some(10), None)).unwrap();
        assert_eq!(
            f,
            CompanyFilter::Size {
                min: 10,
                max: i32::MAX
            }
        );
        assert_eq!(f.sql(), BY_SIZE);
    }

    #[test]
    fn test_min_above_max_rejected() {
        let err = CompanyFilter::from_search(search(None, Some(5), Some(2)));
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_equal_bounds_allowed() {
        assert!(CompanyFilter::from_search(search(None, Some(3), Some(3))).is_ok());
    }

    #[test]
    fn test_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}

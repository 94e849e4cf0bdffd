//! Search shapes for `GET /jobs`: title present or not, crossed with
//! whether only jobs offering equity are wanted.
//!
//! The salary bound applies only when `minSalary` was given; without it,
//! jobs with no recorded salary still match.

use crate::companies::filters::contains_pattern;
use crate::models::job::JobSearch;

const BY_SALARY: &str = r#"
    SELECT id, title, salary, equity, company_handle
    FROM jobs
    WHERE ($1::INTEGER IS NULL OR salary >= $1)
    ORDER BY id
"#;

const BY_SALARY_WITH_EQUITY: &str = r#"
    SELECT id, title, salary, equity, company_handle
    FROM jobs
    WHERE ($1::INTEGER IS NULL OR salary >= $1) AND equity > 0
    ORDER BY id
"#;

const BY_TITLE: &str = r#"
    SELECT id, title, salary, equity, company_handle
    FROM jobs
    WHERE title ILIKE $1 AND ($2::INTEGER IS NULL OR salary >= $2)
    ORDER BY id
"#;

const BY_TITLE_WITH_EQUITY: &str = r#"
    SELECT id, title, salary, equity, company_handle
    FROM jobs
    WHERE title ILIKE $1 AND ($2::INTEGER IS NULL OR salary >= $2) AND equity > 0
    ORDER BY id
"#;

#[derive(Debug, Clone, PartialEq)]
pub enum JobFilter {
    Salary { min_salary: Option<i32> },
    SalaryWithEquity { min_salary: Option<i32> },
    Title { pattern: String, min_salary: Option<i32> },
    TitleWithEquity { pattern: String, min_salary: Option<i32> },
}

impl JobFilter {
    pub fn from_search(search: JobSearch) -> Self {
        let min_salary = search.min_salary;
        let has_equity = search.has_equity.unwrap_or(false);

        match (search.title, has_equity) {
            (None, false) => JobFilter::Salary { min_salary },
            (None, true) => JobFilter::SalaryWithEquity { min_salary },
            (Some(title), false) => JobFilter::Title {
                pattern: contains_pattern(&title),
                min_salary,
            },
            (Some(title), true) => JobFilter::TitleWithEquity {
                pattern: contains_pattern(&title),
                min_salary,
            },
        }
    }

    pub const fn sql(&self) -> &'static str {
        match self {
            JobFilter::Salary { .. } => BY_SALARY,
            JobFilter::SalaryWithEquity { .. } => BY_SALARY_WITH_EQUITY,
            JobFilter::Title { .. } => BY_TITLE,
            JobFilter::TitleWithEquity { .. } => BY_TITLE_WITH_EQUITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(title: Option<&str>, min: Option<i32>, equity: Option<bool>) -> JobSearch {
        JobSearch {
            title: title.map(str::to_string),
            min_salary: min,
            has_equity: equity,
        }
    }

    #[test]
    fn test_no_salary_bound_by_default() {
        let f = JobFilter::from_search(search(None, None, None));
        assert_eq!(f, JobFilter::Salary { min_salary: None });
        assert_eq!(f.sql(), BY_SALARY);
    }

    #[test]
    fn test_has_equity_false_is_unrestricted() {
        let f = JobFilter::from_search(search(None, Some(50_000), Some(false)));
        assert_eq!(
            f,
            JobFilter::Salary {
                min_salary: Some(50_000)
            }
        );
    }

    #[test]
    fn test_equity_only() {
        let f = JobFilter::from_search(search(None, None, Some(true)));
        assert_eq!(f.sql(), BY_SALARY_WITH_EQUITY);
    }

    #[test]
    fn test_title_only() {
        let f = JobFilter::from_search(search(Some("Eng"), None, None));
        assert_eq!(
            f,
            JobFilter::Title {
                pattern: "%Eng%".into(),
                min_salary: None
            }
        );
    }

    #[test]
    fn test_title_with_equity() {
        let f = JobFilter::from_search(search(Some("eng"), Some(10), Some(true)));
        assert_eq!(f.sql(), BY_TITLE_WITH_EQUITY);
    }
}

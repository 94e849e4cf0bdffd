//! Partial-update compiler: turns a sparse set of field changes into the
//! assignment list of an `UPDATE ... SET` statement plus its bind values.
//!
//! Field names are the API-facing (camelCase) names. A rename table maps the
//! ones whose storage column differs; everything else passes through as-is.
//!
//! ```text
//! [("firstName", "Aliya"), ("age", 32)] + [("firstName", "first_name")]
//!   => "first_name"=$1, "age"=$2   with values ["Aliya", 32]
//! ```

use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use crate::errors::AppError;

/// A single value to bind into an update. Every variant is nullable and
/// carries its column type, so a `NULL` binds as the right Postgres type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Numeric(Option<Decimal>),
}

/// Output of [`sql_for_partial_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"col"=$1, "other"=$2`
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder index available for the caller's trailing `WHERE` parameter.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }

    /// Binds the update values, in clause order, onto a prepared query.
    pub fn bind_values<'q, O>(
        self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for value in self.values {
            query = match value {
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Numeric(v) => query.bind(v),
            };
        }
        query
    }
}

/// Compiles `data` into a `SET` fragment.
///
/// `js_to_sql` lists `(field, column)` pairs for fields whose column name
/// differs from the field name.
///
/// Fails with `Validation` when `data` is empty.
pub fn sql_for_partial_update(
    data: Vec<(&str, SqlValue)>,
    js_to_sql: &[(&str, &str)],
) -> Result<PartialUpdate, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("No data".to_string()));
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.into_iter().enumerate() {
        let column = js_to_sql
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
            .unwrap_or(field);
        cols.push(format!("\"{column}\"=${}", idx + 1));
        values.push(value);
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renames_mapped_fields() {
        let out = sql_for_partial_update(
            vec![
                ("firstName", SqlValue::Text(Some("Aliya".into()))),
                ("age", SqlValue::Int(Some(32))),
            ],
            &[("firstName", "first_name")],
        )
        .unwrap();
        assert_eq!(out.set_cols, r#""first_name"=$1, "age"=$2"#);
        assert_eq!(
            out.values,
            vec![SqlValue::Text(Some("Aliya".into())), SqlValue::Int(Some(32))]
        );
    }

    #[test]
    fn test_unmapped_fields_pass_through() {
        let out =
            sql_for_partial_update(vec![("title", SqlValue::Text(Some("Dev".into())))], &[])
                .unwrap();
        assert_eq!(out.set_cols, r#""title"=$1"#);
    }

    #[test]
    fn test_clause_count_matches_input_and_order_is_kept() {
        let out = sql_for_partial_update(
            vec![
                ("logoUrl", SqlValue::Text(None)),
                ("name", SqlValue::Text(Some("Acme".into()))),
                ("numEmployees", SqlValue::Int(Some(7))),
            ],
            &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")],
        )
        .unwrap();
        assert_eq!(out.set_cols.split(", ").count(), 3);
        assert_eq!(
            out.set_cols,
            r#""logo_url"=$1, "name"=$2, "num_employees"=$3"#
        );
        assert_eq!(out.values[0], SqlValue::Text(None));
        assert_eq!(out.values[2], SqlValue::Int(Some(7)));
        assert_eq!(out.next_placeholder(), 4);
    }

    #[test]
    fn test_null_value_is_kept() {
        let out = sql_for_partial_update(vec![("salary", SqlValue::Int(None))], &[]).unwrap();
        assert_eq!(out.set_cols, r#""salary"=$1"#);
        assert_eq!(out.values, vec![SqlValue::Int(None)]);
    }

    #[test]
    fn test_empty_data_is_rejected() {
        let err = sql_for_partial_update(vec![], &[("numEmployees", "num_employees")]);
        assert!(matches!(err, Err(AppError::Validation(msg)) if msg == "No data"));
    }
}

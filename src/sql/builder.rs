//! Parameterized SELECT / COUNT builders.
//!
//! Identifiers only ever come from the allowlist; every value is bound as a
//! named `:param`. Filters outside the allowlist are dropped silently, as are
//! operators outside [`ALLOWED_OPS`].

use serde_json::{Map, Value};

use super::allowlist::Allowlist;
use crate::error::SqlError;
use crate::models::{CountRequest, SqlQuery};

/// Comparison operators accepted in `{"op": ..., "value": ...}` filters.
pub const ALLOWED_OPS: &[&str] = &["=", "!=", ">", "<", ">=", "<=", "LIKE", "ILIKE", "IN"];

/// Build `SELECT cols FROM table [WHERE ...] LIMIT n;`.
pub fn build_select(
    allowlist: &Allowlist,
    table: &str,
    columns: &[String],
    filters: &Map<String, Value>,
    limit: usize,
) -> Result<SqlQuery, SqlError> {
    let allowed = allowlist.columns(table)?;

    let safe_columns: Vec<&str> = columns
        .iter()
        .filter(|col| allowed.contains(*col))
        .map(String::as_str)
        .collect();
    let select_columns = if safe_columns.is_empty() {
        "*".to_string()
    } else {
        safe_columns.join(", ")
    };

    let mut params = Map::new();
    let clauses = where_clauses(allowed_filters(filters, allowed), &mut params);

    Ok(SqlQuery {
        sql: format!(
            "SELECT {select_columns} FROM {table}{} LIMIT {limit};",
            where_sql(&clauses)
        ),
        params,
    })
}

/// Build a `COUNT(*)` query with filters, a date range and optional GROUP BY.
pub fn build_count(allowlist: &Allowlist, req: &CountRequest) -> Result<SqlQuery, SqlError> {
    let table = req.table.as_str();
    let allowed = allowlist.columns(table)?;

    let date_column = req.date_column.as_str();
    if !allowed.iter().any(|c| c == date_column) {
        return Err(SqlError::ColumnNotAllowed {
            table: table.to_string(),
            column: date_column.to_string(),
        });
    }

    let mut params = Map::new();
    let mut clauses = where_clauses(allowed_filters(&req.filters, allowed), &mut params);

    if let Some(year) = req.year {
        clauses.push(format!("EXTRACT(YEAR FROM {date_column}) = :_year"));
        params.insert("_year".to_string(), Value::from(year));
    }
    if let Some(from) = &req.date_from {
        clauses.push(format!("{date_column} >= :_date_from"));
        params.insert("_date_from".to_string(), Value::from(from.as_str()));
    }
    if let Some(to) = &req.date_to {
        clauses.push(format!("{date_column} <= :_date_to"));
        params.insert("_date_to".to_string(), Value::from(to.as_str()));
    }

    let where_sql = where_sql(&clauses);

    let sql = match req.group_by.as_deref() {
        Some(group_by) if !group_by.is_empty() => {
            let safe_group: Vec<&str> = group_by
                .iter()
                .filter(|col| allowed.contains(*col))
                .map(String::as_str)
                .collect();
            if safe_group.is_empty() {
                return Err(SqlError::NoGroupByColumns);
            }
            let group_cols = safe_group.join(", ");
            format!(
                "SELECT {group_cols}, COUNT(*) AS cnt FROM {table}{where_sql} \
                 GROUP BY {group_cols} ORDER BY cnt DESC;"
            )
        }
        _ => format!("SELECT COUNT(*) AS cnt FROM {table}{where_sql};"),
    };

    Ok(SqlQuery { sql, params })
}

fn allowed_filters<'a>(
    filters: &'a Map<String, Value>,
    allowed: &'a [String],
) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
    filters.iter().filter(move |(key, _)| allowed.contains(*key))
}

fn where_sql(clauses: &[String]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    }
}

/// Turn filters into SQL conditions, binding values into `params`.
///
/// Placeholders are numbered by filter position in request order (`p0`, `p1`,
/// ...), counting filters whose operator was rejected.
fn where_clauses<'a>(
    filters: impl Iterator<Item = (&'a String, &'a Value)>,
    params: &mut Map<String, Value>,
) -> Vec<String> {
    let mut clauses = Vec::new();

    for (idx, (key, value)) in filters.enumerate() {
        let p = format!("p{idx}");

        let Some(op_value) = value.as_object().and_then(|obj| obj.get("op")) else {
            clauses.push(format!("{key} = :{p}"));
            params.insert(p, value.clone());
            continue;
        };

        let op = match op_value {
            Value::String(s) => s.to_uppercase(),
            other => other.to_string().to_uppercase(),
        };
        if !ALLOWED_OPS.contains(&op.as_str()) {
            tracing::debug!("Dropping filter on '{key}' with unsupported operator '{op}'");
            continue;
        }

        let operand = value.get("value").cloned().unwrap_or(Value::Null);
        match operand {
            Value::Array(items) if op == "IN" => {
                let placeholders: Vec<String> =
                    (0..items.len()).map(|i| format!(":{p}_{i}")).collect();
                clauses.push(format!("{key} IN ({})", placeholders.join(", ")));
                for (i, item) in items.into_iter().enumerate() {
                    params.insert(format!("{p}_{i}"), item);
                }
            }
            operand => {
                clauses.push(format!("{key} {op} :{p}"));
                params.insert(p, operand);
            }
        }
    }

    clauses
}

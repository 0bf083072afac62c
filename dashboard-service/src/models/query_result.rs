use serde::Serialize;
use sqlx::postgres::PgColumn;
use sqlx::{Column, TypeInfo};

/// A result set as handed back by the driver: the command tag, the row
/// count, the decoded rows and the column descriptions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    pub command: String,
    pub row_count: usize,
    pub rows: Vec<T>,
    pub fields: Vec<FieldDescription>,
}

impl<T> QueryResult<T> {
    pub fn select(rows: Vec<T>, fields: Vec<FieldDescription>) -> Self {
        Self {
            command: "SELECT".to_string(),
            row_count: rows.len(),
            rows,
            fields,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
    pub name: String,
    pub data_type: String,
}

impl From<&PgColumn> for FieldDescription {
    fn from(column: &PgColumn) -> Self {
        Self {
            name: column.name().to_string(),
            data_type: column.type_info().name().to_string(),
        }
    }
}

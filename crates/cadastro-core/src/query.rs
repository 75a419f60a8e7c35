//! Dynamic projection queries.
//!
//! A query is a (projection, filter) pair against one table. Column and
//! table identifiers are interpolated into the statement text — SQL drivers
//! cannot bind identifiers — but only ever from the typed [`Catalog`] enums;
//! every filter value goes through a bind parameter. That split is the whole
//! injection story and must stay intact.

use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::db::{Database, DbError};

/// A value read from or bound to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Numeric view, used for table alignment.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            SqlValue::Integer(i) => Some(*i as f64),
            SqlValue::Real(f) => Some(*f),
            _ => None,
        }
    }
}

impl From<Value> for SqlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SqlValue::Null,
            Value::Integer(i) => SqlValue::Integer(i),
            Value::Real(f) => SqlValue::Real(f),
            Value::Text(s) => SqlValue::Text(s),
            Value::Blob(b) => SqlValue::Text(String::from_utf8_lossy(&b).into_owned()),
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Real(f) => ToSqlOutput::Owned(Value::Real(*f)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// One result row: field name → value, in projection order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, SqlValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: String, value: SqlValue) {
        self.fields.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An ordered, duplicate-free column selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<C: Catalog> {
    columns: Vec<C>,
}

impl<C: Catalog> Projection<C> {
    pub fn new() -> Self {
        Self { columns: Vec::new() }
    }

    /// Every catalog column, in catalog order.
    pub fn all() -> Self {
        Self {
            columns: C::all().to_vec(),
        }
    }

    /// Add a column, keeping first-seen order. Duplicates are dropped.
    pub fn select(&mut self, column: C) -> bool {
        if self.columns.contains(&column) {
            return false;
        }
        self.columns.push(column);
        true
    }

    pub fn columns(&self) -> &[C] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// The comma-joined identifier list for the SELECT clause.
    pub fn to_sql(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<C: Catalog> Default for Projection<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Relational operator for numeric search, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
    Ne,
}

impl NumericOp {
    pub const ALL: [NumericOp; 6] = [
        NumericOp::Eq,
        NumericOp::Gt,
        NumericOp::Lt,
        NumericOp::Ge,
        NumericOp::Le,
        NumericOp::Ne,
    ];

    pub fn as_sql(&self) -> &'static str {
        match self {
            NumericOp::Eq => "=",
            NumericOp::Gt => ">",
            NumericOp::Lt => "<",
            NumericOp::Ge => ">=",
            NumericOp::Le => "<=",
            NumericOp::Ne => "<>",
        }
    }

    /// Parse an operator token. `!=` is accepted as a spelling of `<>`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "=" => Some(NumericOp::Eq),
            ">" => Some(NumericOp::Gt),
            "<" => Some(NumericOp::Lt),
            ">=" => Some(NumericOp::Ge),
            "<=" => Some(NumericOp::Le),
            "<>" | "!=" => Some(NumericOp::Ne),
            _ => None,
        }
    }
}

/// Search filter for a projection query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchFilter<C: Catalog> {
    /// Every row.
    All,
    /// Exactly zero or one row, by primary key.
    ById(i64),
    /// Case-insensitive substring match on a text-searchable column.
    Text { column: C, needle: String },
    /// Relational comparison on a numeric-searchable column.
    Numeric { column: C, op: NumericOp, value: f64 },
}

/// Errors from query validation and execution.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("no columns selected")]
    EmptyProjection,

    #[error("column {0} is not allowed in a text search")]
    NotTextSearchable(&'static str),

    #[error("column {0} is not allowed in a numeric search")]
    NotNumericSearchable(&'static str),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for QueryError {
    fn from(e: rusqlite::Error) -> Self {
        QueryError::Db(DbError::Sqlite(e))
    }
}

/// Execute a projection query and map each row into a [`Record`].
///
/// Field names come from the statement's column metadata, upper-cased,
/// zipped positionally with the row values. An empty result is a genuine
/// no-match; failures come back as `Err`.
pub fn fetch<C: Catalog>(
    db: &Database,
    projection: &Projection<C>,
    filter: &SearchFilter<C>,
) -> Result<Vec<Record>, QueryError> {
    if projection.is_empty() {
        return Err(QueryError::EmptyProjection);
    }

    let mut sql = format!("SELECT {} FROM {}", projection.to_sql(), C::TABLE);
    match filter {
        SearchFilter::All => {}
        SearchFilter::ById(_) => {
            sql.push_str(&format!(" WHERE {} = :id", C::ID.as_str()));
        }
        SearchFilter::Text { column, .. } => {
            if !column.text_searchable() {
                return Err(QueryError::NotTextSearchable(column.as_str()));
            }
            sql.push_str(&format!(" WHERE UPPER({}) LIKE :needle", column.as_str()));
        }
        SearchFilter::Numeric { column, op, .. } => {
            if !column.numeric_searchable() {
                return Err(QueryError::NotNumericSearchable(column.as_str()));
            }
            sql.push_str(&format!(" WHERE {} {} :value", column.as_str(), op.as_sql()));
        }
    }
    log::debug!("projection query: {sql}");

    let mut stmt = db.conn().prepare(&sql)?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(|n| n.to_uppercase())
        .collect();

    // Bind values only; identifiers were interpolated from the catalog above.
    let pattern;
    let mut rows = match filter {
        SearchFilter::All => stmt.query([])?,
        SearchFilter::ById(id) => stmt.query(&[(":id", id as &dyn ToSql)])?,
        SearchFilter::Text { needle, .. } => {
            pattern = format!("%{}%", needle.to_uppercase());
            stmt.query(&[(":needle", &pattern as &dyn ToSql)])?
        }
        SearchFilter::Numeric { value, .. } => stmt.query(&[(":value", value as &dyn ToSql)])?,
    };

    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Record::new();
        for (i, name) in names.iter().enumerate() {
            let value: Value = row.get(i)?;
            record.push(name.clone(), value.into());
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VehicleColumn;

    #[test]
    fn test_projection_dedup_keeps_first_seen_order() {
        let mut p: Projection<VehicleColumn> = Projection::new();
        assert!(p.select(VehicleColumn::Modelo));
        assert!(p.select(VehicleColumn::Marca));
        assert!(!p.select(VehicleColumn::Modelo));
        assert_eq!(p.columns(), &[VehicleColumn::Modelo, VehicleColumn::Marca]);
        assert_eq!(p.to_sql(), "MODELO, MARCA");
    }

    #[test]
    fn test_projection_all_follows_catalog_order() {
        let p: Projection<VehicleColumn> = Projection::all();
        assert_eq!(p.len(), VehicleColumn::all().len());
        assert_eq!(p.columns()[0], VehicleColumn::Id);
    }

    #[test]
    fn test_numeric_op_parse() {
        assert_eq!(NumericOp::parse(">="), Some(NumericOp::Ge));
        assert_eq!(NumericOp::parse("!="), Some(NumericOp::Ne));
        assert_eq!(NumericOp::parse("<>"), Some(NumericOp::Ne));
        assert_eq!(NumericOp::parse("=="), None);
    }

    #[test]
    fn test_empty_projection_rejected() {
        let db = Database::open_in_memory().unwrap();
        let p: Projection<VehicleColumn> = Projection::new();
        let result = fetch(&db, &p, &SearchFilter::All);
        assert!(matches!(result, Err(QueryError::EmptyProjection)));
    }

    #[test]
    fn test_text_filter_rejects_non_searchable_column() {
        let db = Database::open_in_memory().unwrap();
        let p: Projection<VehicleColumn> = Projection::all();
        let result = fetch(
            &db,
            &p,
            &SearchFilter::Text {
                column: VehicleColumn::ValorDiaria,
                needle: "150".into(),
            },
        );
        assert!(matches!(result, Err(QueryError::NotTextSearchable(_))));
    }
}

//! Building blocks for the filtered catalog queries.
//!
//! Table and column names only ever come from the constants in
//! [`crate::storage::schema`]; every user supplied value is bound as a
//! positional parameter.

use rusqlite::ToSql;

/// Values a selector uses to mean "everything"
const SENTINELS: &[&str] = &["todos", "all"];

/// An optional constraint on one dimension of a list query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter(Option<String>);

impl Filter {
    pub fn any() -> Self {
        Self(None)
    }

    /// Blank input and the "all" sentinels produce an empty filter. Any other
    /// input is kept verbatim so it matches the stored value exactly.
    pub fn parse(input: Option<&str>) -> Self {
        let value = input.filter(|value| {
            let trimmed = value.trim();
            !trimmed.is_empty() && !SENTINELS.iter().any(|s| trimmed.eq_ignore_ascii_case(s))
        });
        Self(value.map(str::to_string))
    }

    pub fn value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_any(&self) -> bool {
        self.0.is_none()
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Self::parse(Some(value))
    }
}

/// Escapes LIKE wildcards so the term is matched literally, and wraps it in `%`
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// A `SELECT` whose `WHERE` clause is the AND of the filters that were set
#[derive(Debug)]
pub struct SelectQuery {
    base: String,
    predicates: Vec<String>,
    params: Vec<String>,
    order_by: Vec<String>,
}

impl SelectQuery {
    /// `base` is the `SELECT ... FROM ... [JOIN ...]` part of the statement
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            predicates: Vec::new(),
            params: Vec::new(),
            order_by: Vec::new(),
        }
    }

    fn bind(&mut self, value: String) -> usize {
        self.params.push(value);
        self.params.len()
    }

    /// Exact match of `column` against the filter value
    pub fn equals(mut self, column: &str, filter: &Filter) -> Self {
        if let Some(value) = filter.value() {
            let idx = self.bind(value.to_string());
            self.predicates.push(format!("{column} = ?{idx}"));
        }
        self
    }

    /// Case-insensitive substring match of the term against any of `columns`
    pub fn contains_any(mut self, columns: &[impl AsRef<str>], term: &Filter) -> Self {
        if columns.is_empty() {
            return self;
        }
        if let Some(value) = term.value() {
            let idx = self.bind(like_pattern(value));
            let alternatives = columns
                .iter()
                .map(|column| format!("{} LIKE ?{idx} ESCAPE '\\'", column.as_ref()))
                .collect::<Vec<_>>()
                .join(" OR ");
            self.predicates.push(format!("({alternatives})"));
        }
        self
    }

    pub fn order_by(mut self, column: &str) -> Self {
        self.order_by.push(column.to_string());
        self
    }

    pub fn sql(&self) -> String {
        let mut sql = self.base.clone();
        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        sql
    }

    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p as &dyn ToSql).collect()
    }
}

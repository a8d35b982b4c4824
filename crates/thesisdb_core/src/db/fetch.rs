//! Generic row fetch helper for read paths.

use rusqlite::types::Value;
use rusqlite::{Params, Statement};

/// One result row as ordered `column -> value` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordMap {
    fields: Vec<(String, Value)>,
}

impl RecordMap {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Returns the column as text, or `None` when missing or not `TEXT`.
    pub fn text(&self, column: &str) -> Option<&str> {
        match self.get(column)? {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the column as an integer, or `None` when missing or not `INTEGER`.
    pub fn integer(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Column names in result-set order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Executes a prepared statement and collects every row in result order.
pub fn fetch_all<P: Params>(stmt: &mut Statement<'_>, params: P) -> rusqlite::Result<Vec<RecordMap>> {
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut rows = stmt.query(params)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        let mut fields = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            fields.push((name.clone(), row.get::<_, Value>(idx)?));
        }
        records.push(RecordMap { fields });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::fetch_all;
    use rusqlite::types::Value;
    use rusqlite::Connection;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().expect("memory db should open");
        conn.execute_batch(
            "CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT, weight REAL);
             INSERT INTO items (id, label, weight) VALUES (1, 'one', 1.5);
             INSERT INTO items (id, label, weight) VALUES (2, NULL, 2.0);
             INSERT INTO items (id, label, weight) VALUES (3, 'three', 0.5);",
        )
        .expect("seed should succeed");
        conn
    }

    #[test]
    fn rows_keep_result_order_and_column_order() {
        let conn = seeded();
        let mut stmt = conn
            .prepare("SELECT id, label, weight FROM items ORDER BY id DESC;")
            .expect("statement should prepare");
        let rows = fetch_all(&mut stmt, []).expect("fetch should succeed");

        let ids: Vec<i64> = rows.iter().filter_map(|row| row.integer("id")).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(
            rows[0].columns().collect::<Vec<_>>(),
            vec!["id", "label", "weight"]
        );
        assert_eq!(rows[1].get("label"), Some(&Value::Null));
        assert_eq!(rows[2].get("weight"), Some(&Value::Real(1.5)));
    }

    #[test]
    fn bound_parameters_filter_rows() {
        let conn = seeded();
        let mut stmt = conn
            .prepare("SELECT label FROM items WHERE id = ?1;")
            .expect("statement should prepare");
        let rows = fetch_all(&mut stmt, [3]).expect("fetch should succeed");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("label"), Some("three"));
        assert_eq!(rows[0].len(), 1);
        assert!(rows[0].get("missing").is_none());
    }

    #[test]
    fn empty_result_yields_empty_vec() {
        let conn = seeded();
        let mut stmt = conn
            .prepare("SELECT id FROM items WHERE id > 100;")
            .expect("statement should prepare");
        assert!(fetch_all(&mut stmt, []).expect("fetch should succeed").is_empty());
    }
}

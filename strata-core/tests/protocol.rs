#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use strata_core::{
        Connection, Cursor, Outcome, Result, ResultSet, Row, Statement, Value, values,
    };

    struct StubStatement {
        rows: Vec<Row>,
        position: usize,
    }

    impl StubStatement {
        fn with_rows(rows: Vec<Row>) -> Self {
            Self { rows, position: 0 }
        }
    }

    impl Statement for StubStatement {
        fn next_row(&mut self) -> Option<Row> {
            let row = self.rows.get(self.position).cloned();
            if row.is_some() {
                self.position += 1;
            }
            row
        }
        fn first(&mut self) {
            self.position = 0;
        }
        fn outcome(&self) -> Outcome {
            Outcome::Ok
        }
        fn last_insert_id(&self) -> u64 {
            0
        }
        fn affected_rows(&self) -> u64 {
            0
        }
    }

    #[derive(Default)]
    struct StubConnection {
        rows: Vec<Row>,
        executed: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl StubConnection {
        fn with_rows(rows: Vec<Row>) -> Self {
            Self {
                rows,
                executed: Mutex::new(Vec::new()),
            }
        }
    }

    impl Connection for StubConnection {
        type Statement = StubStatement;

        fn connect(_url: &str) -> Result<Self> {
            Ok(Self::default())
        }
        fn execute(&self, sql: &str, bindings: Vec<Value>) -> Cursor<StubStatement> {
            self.executed
                .lock()
                .unwrap()
                .push((sql.to_owned(), bindings));
            Cursor::new(StubStatement::with_rows(self.rows.clone()))
        }
        fn close(&self) -> bool {
            true
        }
        fn is_open(&self) -> bool {
            true
        }
        fn vacuum(&self) {}
        fn version(&self) -> String {
            "STUB".into()
        }
    }

    fn sample_row(index: i64) -> Row {
        [Value::new("id", index), Value::new("name", format!("row-{}", index))]
            .into_iter()
            .collect()
    }

    #[test]
    fn literal_text_escapes_quote_and_backslash() {
        let connection = StubConnection::default();
        let mut query = connection.query("INSERT INTO t (name) VALUES (");
        query.sql("O'Brien\\x").sql(")");
        assert_eq!(query.text(), "INSERT INTO t (name) VALUES (O''Brien\\\\x)");
    }

    #[test]
    fn untouched_text_takes_the_fast_path() {
        let connection = StubConnection::default();
        let query = connection.query("SELECT * FROM t WHERE a = ?");
        assert_eq!(query.text(), "SELECT * FROM t WHERE a = ?");
    }

    #[test]
    fn bound_strings_are_not_escaped() {
        let connection = StubConnection::default();
        let mut query = connection.query("INSERT INTO t (name) VALUES (?)");
        query.bind("O'Brien\\x");
        assert_eq!(query.text(), "INSERT INTO t (name) VALUES (?)");
        assert_eq!(query.bindings().len(), 1);
        assert_eq!(query.bindings()[0].as_str(), Some("O'Brien\\x"));
    }

    #[test]
    fn column_template_rewrites_identifier_slots() {
        let connection = StubConnection::default();
        let mut query = connection.query("INSERT INTO t ({0}, {1}) VALUES (?, ?)");
        query.columns(["a", "b"]);
        assert_eq!(query.text(), "INSERT INTO t (a, b) VALUES (?, ?)");
    }

    #[test]
    fn column_template_replaces_every_occurrence() {
        let connection = StubConnection::default();
        let mut query = connection.query("SELECT {0} FROM t ORDER BY {0}, {1}");
        query.columns(["name", "id"]);
        assert_eq!(query.text(), "SELECT name FROM t ORDER BY name, id");
    }

    #[test]
    fn named_and_tuple_appends_preserve_order() {
        let connection = StubConnection::default();
        let mut query = connection.query("INSERT INTO t (a, b, c, d) VALUES (?, ?, ?, ?)");
        query.bind_all(values!(1i64, 2.5f64));
        query.bind_named("c", "text");
        query.bind(None::<i64>);
        let bindings = query.bindings();
        assert_eq!(bindings[0].as_int(), Some(1));
        assert_eq!(bindings[0].name(), "");
        assert_eq!(bindings[1].as_float(), Some(2.5));
        assert_eq!(bindings[2].name(), "c");
        assert_eq!(bindings[2].as_str(), Some("text"));
        assert!(bindings[3].is_null());
    }

    #[test]
    fn execute_snapshots_and_clears_the_builder() {
        let connection = StubConnection::default();
        let mut query = connection.query("SELECT * FROM t WHERE a = ?");
        query.bind(1i64);
        query.execute();
        assert_eq!(query.text(), "");
        assert!(query.bindings().is_empty());

        // the builder is reusable, nothing leaks into the next call
        query.sql("DELETE FROM t");
        query.execute();

        let executed = connection.executed.lock().unwrap();
        assert_eq!(executed.len(), 2);
        assert_eq!(executed[0].0, "SELECT * FROM t WHERE a = ?");
        assert_eq!(executed[0].1.len(), 1);
        assert_eq!(executed[1].0, "DELETE FROM t");
        assert!(executed[1].1.is_empty());
    }

    #[test]
    fn cursor_on_an_empty_result_ends_immediately() {
        let connection = StubConnection::default();
        let cursor = connection.query("SELECT * FROM t").execute();
        assert!(cursor.iter().next().is_none());
    }

    #[test]
    fn cursor_streams_rows_in_order_and_replays_after_rewind() {
        let connection = StubConnection::with_rows(vec![sample_row(0), sample_row(1), sample_row(2)]);
        let cursor = connection.query("SELECT * FROM t").execute();
        let rows: ResultSet = cursor.iter().collect();
        assert_eq!(rows.len(), 3);
        for (index, row) in rows.iter().enumerate() {
            assert_eq!(row["id"].as_int(), Some(index as i64));
            assert_eq!(row["name"].as_str().unwrap(), format!("row-{}", index));
        }
        // a fresh iterator rewinds and replays the same rows
        assert_eq!(cursor.iter().count(), 3);
        // and the cursor itself is iterable by reference
        assert_eq!((&cursor).into_iter().count(), 3);
    }

    #[test]
    fn iterator_outliving_its_cursor_yields_nothing() {
        let connection = StubConnection::with_rows(vec![sample_row(0), sample_row(1)]);
        let cursor = connection.query("SELECT * FROM t").execute();
        let mut rows = cursor.iter();
        assert!(rows.next().is_some());
        drop(cursor);
        assert!(rows.next().is_none());
    }

    #[test]
    fn result_set_indexes_with_a_sentinel() {
        let rows: ResultSet = vec![sample_row(0)].into_iter().collect();
        assert_eq!(rows[0]["id"].as_int(), Some(0));
        assert!(rows[7].is_empty());
    }
}

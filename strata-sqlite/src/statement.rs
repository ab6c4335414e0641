use crate::{CBox, extract::extract_value};
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_ROW, sqlite3_column_count, sqlite3_reset, sqlite3_step,
    sqlite3_stmt,
};
use strata_core::{Outcome, Row, Statement};

/// Streams rows one `sqlite3_step` at a time; `first` is a `sqlite3_reset`,
/// which re-runs the statement from the start on the next pull.
pub struct SqliteStatement {
    statement: Option<CBox<*mut sqlite3_stmt>>,
    outcome: Outcome,
    last_insert_id: u64,
    affected_rows: u64,
}

impl SqliteStatement {
    pub(crate) fn failed(outcome: Outcome) -> Self {
        Self {
            statement: None,
            outcome,
            last_insert_id: 0,
            affected_rows: 0,
        }
    }

    pub(crate) fn streaming(statement: CBox<*mut sqlite3_stmt>) -> Self {
        Self {
            statement: Some(statement),
            outcome: Outcome::Ok,
            last_insert_id: 0,
            affected_rows: 0,
        }
    }

    pub(crate) fn completed(last_insert_id: u64, affected_rows: u64) -> Self {
        Self {
            statement: None,
            outcome: Outcome::Ok,
            last_insert_id,
            affected_rows,
        }
    }
}

impl Statement for SqliteStatement {
    fn next_row(&mut self) -> Option<Row> {
        let statement = self.statement.as_ref()?;
        loop {
            match unsafe { sqlite3_step(**statement) } {
                SQLITE_BUSY => continue,
                SQLITE_DONE => return None,
                SQLITE_ROW => {
                    let count = unsafe { sqlite3_column_count(**statement) };
                    return Some((0..count).map(|i| extract_value(**statement, i)).collect());
                }
                code => {
                    log::error!("row fetch failed with sqlite code {}", code);
                    return None;
                }
            }
        }
    }

    fn first(&mut self) {
        if let Some(statement) = &self.statement {
            unsafe {
                sqlite3_reset(**statement);
            }
        }
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn last_insert_id(&self) -> u64 {
        self.last_insert_id
    }

    fn affected_rows(&self) -> u64 {
        self.affected_rows
    }
}

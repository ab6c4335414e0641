use crate::extract::extract_row;
use postgres::Client;
use std::sync::Arc;
use strata_core::{Outcome, Row, SharedConnection, Statement};

/// Either a server-side named cursor pulled one `FETCH NEXT` at a time, or a
/// buffered result replayed through the same pull contract.
pub struct PostgresStatement {
    client: Option<Arc<SharedConnection<Option<Client>>>>,
    fetch_next: String,
    move_first: String,
    close: String,
    rows: Vec<Row>,
    position: usize,
    outcome: Outcome,
    affected_rows: u64,
}

impl PostgresStatement {
    pub(crate) fn failed(outcome: Outcome) -> Self {
        Self {
            client: None,
            fetch_next: String::new(),
            move_first: String::new(),
            close: String::new(),
            rows: Vec::new(),
            position: 0,
            outcome,
            affected_rows: 0,
        }
    }

    pub(crate) fn materialized(rows: Vec<Row>, affected_rows: u64) -> Self {
        Self {
            client: None,
            fetch_next: String::new(),
            move_first: String::new(),
            close: String::new(),
            rows,
            position: 0,
            outcome: Outcome::Ok,
            affected_rows,
        }
    }

    pub(crate) fn cursor(client: Arc<SharedConnection<Option<Client>>>, name: String) -> Self {
        Self {
            client: Some(client),
            fetch_next: format!("FETCH NEXT IN {}", name),
            move_first: format!("MOVE BACKWARD ALL IN {}", name),
            close: format!("CLOSE {}", name),
            rows: Vec::new(),
            position: 0,
            outcome: Outcome::Ok,
            affected_rows: 0,
        }
    }
}

impl Statement for PostgresStatement {
    fn next_row(&mut self) -> Option<Row> {
        let Some(shared) = &self.client else {
            let row = self.rows.get(self.position).cloned();
            if row.is_some() {
                self.position += 1;
            }
            return row;
        };
        let mut lock = shared.lock();
        let client = lock.as_mut()?;
        match client.query(self.fetch_next.as_str(), &[]) {
            Ok(rows) => rows.first().map(extract_row),
            Err(error) => {
                log::error!("cursor fetch failed: {}", error);
                None
            }
        }
    }

    fn first(&mut self) {
        let Some(shared) = &self.client else {
            self.position = 0;
            return;
        };
        if let Some(client) = shared.lock().as_mut() {
            if let Err(error) = client.batch_execute(&self.move_first) {
                log::error!("cursor rewind failed: {}", error);
            }
        }
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn last_insert_id(&self) -> u64 {
        // row identifiers come back through RETURNING on this backend
        0
    }

    fn affected_rows(&self) -> u64 {
        self.affected_rows
    }
}

impl Drop for PostgresStatement {
    fn drop(&mut self) {
        if let Some(shared) = &self.client {
            if let Some(client) = shared.lock().as_mut() {
                let _ = client.batch_execute(&self.close);
            }
        }
    }
}

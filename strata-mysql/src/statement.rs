use strata_core::{Outcome, Row, Statement};

/// The full result set is materialized while the connection lock is held;
/// the pull contract then replays it one row per call.
pub struct MySqlStatement {
    rows: Vec<Row>,
    position: usize,
    outcome: Outcome,
    last_insert_id: u64,
    affected_rows: u64,
}

impl MySqlStatement {
    pub(crate) fn failed(outcome: Outcome) -> Self {
        Self {
            rows: Vec::new(),
            position: 0,
            outcome,
            last_insert_id: 0,
            affected_rows: 0,
        }
    }

    pub(crate) fn materialized(rows: Vec<Row>, last_insert_id: u64, affected_rows: u64) -> Self {
        Self {
            rows,
            position: 0,
            outcome: Outcome::Ok,
            last_insert_id,
            affected_rows,
        }
    }
}

impl Statement for MySqlStatement {
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
        self.outcome
    }

    fn last_insert_id(&self) -> u64 {
        self.last_insert_id
    }

    fn affected_rows(&self) -> u64 {
        self.affected_rows
    }
}

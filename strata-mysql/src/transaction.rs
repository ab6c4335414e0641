use mysql::{Conn, prelude::Queryable};

/// Begins on construction and rolls back on drop unless committed.
pub(crate) struct MySqlTransaction<'c> {
    conn: &'c mut Conn,
    finished: bool,
}

impl<'c> MySqlTransaction<'c> {
    pub(crate) fn begin(conn: &'c mut Conn) -> Self {
        let finished = conn.query_drop("BEGIN").is_err();
        Self { conn, finished }
    }

    /// The native connection; statement work inside the transaction scope
    /// goes through here.
    pub(crate) fn conn(&mut self) -> &mut Conn {
        self.conn
    }

    pub(crate) fn commit(&mut self) -> bool {
        if self.finished {
            return true;
        }
        self.finished = self.conn.query_drop("COMMIT").is_ok();
        self.finished
    }

    pub(crate) fn rollback(&mut self) -> bool {
        if self.finished {
            return true;
        }
        self.finished = self.conn.query_drop("ROLLBACK").is_ok();
        self.finished
    }
}

impl Drop for MySqlTransaction<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}

use postgres::Client;

/// Begins on construction and rolls back on drop unless committed.
pub(crate) struct PostgresTransaction<'c> {
    client: &'c mut Client,
    finished: bool,
}

impl<'c> PostgresTransaction<'c> {
    pub(crate) fn begin(client: &'c mut Client) -> Self {
        let finished = client.batch_execute("BEGIN;").is_err();
        Self { client, finished }
    }

    /// The native client; statement work inside the transaction scope goes
    /// through here.
    pub(crate) fn client(&mut self) -> &mut Client {
        self.client
    }

    pub(crate) fn commit(&mut self) -> bool {
        if self.finished {
            return true;
        }
        self.finished = self.client.batch_execute("COMMIT;").is_ok();
        self.finished
    }

    pub(crate) fn rollback(&mut self) -> bool {
        if self.finished {
            return true;
        }
        self.finished = self.client.batch_execute("ROLLBACK;").is_ok();
        self.finished
    }
}

impl Drop for PostgresTransaction<'_> {
    fn drop(&mut self) {
        self.rollback();
    }
}

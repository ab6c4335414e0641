#[cfg(test)]
mod tests {
    use strata_core::Connection;
    use strata_sqlite::SqliteConnection;
    use strata_tests::{execute_suite, init_logs};

    #[test]
    fn sqlite() {
        init_logs();
        let directory = tempfile::tempdir().expect("could not create a temporary directory");
        let path = directory.path().join("suite.sqlite");
        let connection = SqliteConnection::connect(&format!("sqlite://{}", path.display()))
            .expect("could not open the database");
        assert!(path.exists(), "the database file appears on connect");
        execute_suite(&connection);
    }

    #[test]
    fn sqlite_in_memory() {
        init_logs();
        let connection =
            SqliteConnection::connect("sqlite://:memory:").expect("could not open the database");
        execute_suite(&connection);
    }
}

use strata::{Connection, Outcome};

pub(crate) fn rollback<C: Connection>(connection: &C) {
    connection.query("DROP TABLE IF EXISTS suite_rollback").execute();
    connection
        .query("CREATE TABLE suite_rollback (qty INTEGER)")
        .execute();

    // one placeholder, two bindings: the bind step fails, commit is never
    // reached and the statement-scoped transaction unwinds
    let mut query = connection.query("INSERT INTO suite_rollback (qty) VALUES (?)");
    query.bind(1i64).bind(2i64);
    let cursor = query.execute();
    assert_ne!(cursor.outcome(), Outcome::Ok);
    assert_eq!(cursor.affected_rows(), 0);
    assert_eq!(cursor.last_insert_id(), 0);
    assert!(cursor.iter().next().is_none());

    // nothing was persisted
    let cursor = connection.query("SELECT COUNT(*) FROM suite_rollback").execute();
    assert_eq!(cursor.outcome(), Outcome::Ok);
    let row = cursor.iter().next().expect("count row");
    assert_eq!(row[0].as_int(), Some(0));
}

use strata::{Connection, Outcome};

pub(crate) fn outcomes<C: Connection>(connection: &C) {
    // empty query text is an improper operation, reported on the handle
    let cursor = connection.query("").execute();
    assert_eq!(cursor.outcome(), Outcome::Improper);
    assert_eq!(cursor.last_insert_id(), 0);
    assert_eq!(cursor.affected_rows(), 0);
    assert!(cursor.iter().next().is_none());

    connection.query("DROP TABLE IF EXISTS suite_outcome").execute();
    connection
        .query("CREATE TABLE suite_outcome (qty INTEGER)")
        .execute();
    for qty in [1i64, 2, 3] {
        let mut query = connection.query("INSERT INTO suite_outcome (qty) VALUES (?)");
        query.bind(qty);
        assert_eq!(query.execute().outcome(), Outcome::Ok);
    }

    // modify statements report their affected row count and no rows
    let mut query = connection.query("UPDATE suite_outcome SET qty = qty + 10 WHERE qty > ?");
    query.bind(1i64);
    let cursor = query.execute();
    assert_eq!(cursor.outcome(), Outcome::Ok);
    assert_eq!(cursor.affected_rows(), 2);
    assert!(cursor.iter().next().is_none());

    // version is informational, vacuum is best effort
    assert!(!connection.version().is_empty());
    connection.vacuum();
    assert!(connection.is_open());
}

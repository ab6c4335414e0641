use strata::{Connection, Outcome, ResultSet};

pub(crate) fn streaming<C: Connection>(connection: &C) {
    connection.query("DROP TABLE IF EXISTS suite_stream").execute();
    let cursor = connection
        .query("CREATE TABLE suite_stream (name TEXT, qty INTEGER, weight FLOAT)")
        .execute();
    assert_eq!(cursor.outcome(), Outcome::Ok, "failed to create suite_stream");

    // an empty result set ends immediately
    let cursor = connection.query("SELECT * FROM suite_stream").execute();
    assert_eq!(cursor.outcome(), Outcome::Ok);
    assert!(cursor.iter().next().is_none());

    for index in 0..5i64 {
        let mut query =
            connection.query("INSERT INTO suite_stream (name, qty, weight) VALUES (?, ?, ?)");
        query
            .bind(format!("item-{}", index))
            .bind(index)
            .bind(index as f64 + 0.5);
        let cursor = query.execute();
        assert_eq!(cursor.outcome(), Outcome::Ok, "insert {} failed", index);
        assert_eq!(cursor.affected_rows(), 1);
    }

    let cursor = connection
        .query("SELECT name, qty, weight FROM suite_stream ORDER BY qty")
        .execute();
    assert_eq!(cursor.outcome(), Outcome::Ok);
    let rows: ResultSet = cursor.iter().collect();
    assert_eq!(rows.len(), 5, "expected every inserted row back");
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(row[0], row["name"]);
        assert_eq!(row["name"].as_str(), Some(format!("item-{}", index).as_str()));
        assert_eq!(row["qty"].as_int(), Some(index as i64));
        // the integer is readable through its float view as well
        assert_eq!(row["qty"].as_float(), Some(index as f64));
        let weight = row["weight"].as_float().expect("weight is numeric");
        assert!((weight - (index as f64 + 0.5)).abs() < 1e-6);
    }

    // a fresh iterator rewinds the handle and replays the same rows
    let replayed: Vec<_> = cursor.iter().collect();
    assert_eq!(replayed.len(), 5);
    assert_eq!(replayed[0]["qty"].as_int(), Some(0));
}

use indoc::indoc;
use strata::{Connection, Outcome, values};

pub(crate) fn bindings<C: Connection>(connection: &C) {
    connection.query("DROP TABLE IF EXISTS suite_bind").execute();
    let cursor = connection
        .query(indoc! {"
            CREATE TABLE suite_bind (
                name TEXT,
                qty INTEGER,
                weight FLOAT,
                payload BLOB
            )
        "})
        .execute();
    assert_eq!(cursor.outcome(), Outcome::Ok, "failed to create suite_bind");

    // identifier slots are rewritten, `?` slots are left for the binder, and
    // a tuple append binds each element positionally, left to right
    let mut query =
        connection.query("INSERT INTO suite_bind ({0}, {1}, {2}, {3}) VALUES (?, ?, ?, ?)");
    query.columns(["name", "qty", "weight", "payload"]);
    query.bind_all(values!("O'Brien\\x", 42i32, 5.64f32, vec![0x92u8; 10]));
    let cursor = query.execute();
    assert_eq!(cursor.outcome(), Outcome::Ok);
    assert_eq!(cursor.affected_rows(), 1);

    // the bound string arrived unescaped and the blob byte-identical
    let cursor = connection
        .query("SELECT name, qty, weight, payload FROM suite_bind")
        .execute();
    assert_eq!(cursor.outcome(), Outcome::Ok);
    let row = cursor.iter().next().expect("one row inserted");
    assert_eq!(row["name"].as_str(), Some("O'Brien\\x"));
    assert_eq!(row["qty"].as_int(), Some(42));
    assert!((row["weight"].as_float().expect("numeric") - 5.64).abs() < 1e-6);
    assert_eq!(row["payload"].as_bytes(), Some(&[0x92u8; 10][..]));

    // a quoted name travels out of band as a bound parameter and comes back
    // verbatim, no textual escaping involved
    let mut query = connection.query("INSERT INTO suite_bind (name, qty) VALUES (?, ?)");
    query.bind("O'Brien").bind(7i64);
    let cursor = query.execute();
    assert_eq!(cursor.outcome(), Outcome::Ok);
    assert_eq!(cursor.affected_rows(), 1);

    let mut query = connection.query("SELECT name FROM suite_bind WHERE qty = ?");
    query.bind(7i64);
    let cursor = query.execute();
    let row = cursor.iter().next().expect("quoted insert persisted");
    assert_eq!(row["name"].as_str(), Some("O'Brien"));

    // a null binding round-trips as SQL NULL
    let mut query = connection.query("INSERT INTO suite_bind (name, qty) VALUES (?, ?)");
    query.bind(None::<String>).bind(11i64);
    assert_eq!(query.execute().outcome(), Outcome::Ok);
    let mut query = connection.query("SELECT name FROM suite_bind WHERE qty = ?");
    query.bind(11i64);
    let cursor = query.execute();
    let row = cursor.iter().next().expect("null insert persisted");
    assert!(row["name"].is_null());
}

use std::thread;
use strata::{Connection, Outcome};

const WORKERS: i64 = 8;

pub(crate) fn concurrency<C: Connection>(connection: &C) {
    connection.query("DROP TABLE IF EXISTS suite_workers").execute();
    connection
        .query("CREATE TABLE suite_workers (worker INTEGER, name TEXT)")
        .execute();

    // independent insert-then-select sequences against one shared
    // connection; each worker observes its own row
    thread::scope(|scope| {
        for worker in 0..WORKERS {
            scope.spawn(move || {
                let mut query =
                    connection.query("INSERT INTO suite_workers (worker, name) VALUES (?, ?)");
                query.bind(worker).bind(format!("worker-{}", worker));
                assert_eq!(query.execute().outcome(), Outcome::Ok);

                let mut query =
                    connection.query("SELECT name FROM suite_workers WHERE worker = ?");
                query.bind(worker);
                let cursor = query.execute();
                assert_eq!(cursor.outcome(), Outcome::Ok);
                let row = cursor.iter().next().expect("a worker sees its own row");
                assert_eq!(
                    row["name"].as_str(),
                    Some(format!("worker-{}", worker).as_str())
                );
            });
        }
    });

    let cursor = connection.query("SELECT COUNT(*) FROM suite_workers").execute();
    let row = cursor.iter().next().expect("count row");
    assert_eq!(row[0].as_int(), Some(WORKERS));
}

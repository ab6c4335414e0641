use crate::{
    MySqlStatement,
    convert::{to_native, to_row},
    transaction::MySqlTransaction,
};
use mysql::{Conn, Opts, Params, prelude::Queryable};
use strata_core::{
    Connection, Context, Cursor, Outcome, Result, Row, SharedConnection, Value, produces_result,
    truncate_long,
};

pub struct MySqlConnection {
    conn: SharedConnection<Option<Conn>>,
}

impl Connection for MySqlConnection {
    type Statement = MySqlStatement;

    fn connect(url: &str) -> Result<Self> {
        let opts =
            Opts::from_url(url).with_context(|| format!("invalid mysql connection url `{}`", url))?;
        let conn = Conn::new(opts).with_context(|| format!("could not connect to `{}`", url))?;
        Ok(Self {
            conn: SharedConnection::new(Some(conn)),
        })
    }

    fn execute(&self, sql: &str, bindings: Vec<Value>) -> Cursor<MySqlStatement> {
        if sql.trim().is_empty() {
            return Cursor::new(MySqlStatement::failed(Outcome::Improper));
        }
        let mut lock = self.conn.lock();
        let Some(conn) = lock.as_mut() else {
            return Cursor::new(MySqlStatement::failed(Outcome::ServerLost));
        };
        let mut transaction = MySqlTransaction::begin(conn);
        match run_statement(transaction.conn(), sql, &bindings) {
            Ok(statement) => {
                transaction.commit();
                Cursor::new(statement)
            }
            Err(error) => {
                log::error!("execution failed ({}):\n{}", error, truncate_long!(sql));
                Cursor::new(MySqlStatement::failed(outcome_from_error(&error)))
            }
        }
    }

    fn close(&self) -> bool {
        self.conn.lock().take();
        true
    }

    fn is_open(&self) -> bool {
        self.conn.lock().is_some()
    }

    fn vacuum(&self) {
        let mut lock = self.conn.lock();
        let Some(conn) = lock.as_mut() else {
            return;
        };
        let tables: Vec<String> = conn
            .query(
                "SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES \
                 WHERE table_schema = DATABASE()",
            )
            .unwrap_or_default();
        for table in tables {
            let _ = conn.query_drop(format!("OPTIMIZE TABLE `{}`", table));
        }
    }

    fn version(&self) -> String {
        let mut lock = self.conn.lock();
        let version = lock
            .as_mut()
            .and_then(|conn| conn.query_first::<String, _>("SELECT VERSION()").ok())
            .flatten()
            .unwrap_or_else(|| "unknown".into());
        format!("MYSQL: {}", version)
    }
}

fn run_statement(
    conn: &mut Conn,
    sql: &str,
    bindings: &[Value],
) -> std::result::Result<MySqlStatement, mysql::Error> {
    let statement = conn.prep(sql)?;
    // named entries bind positionally, in caller order
    let params = if bindings.is_empty() {
        Params::Empty
    } else {
        Params::Positional(bindings.iter().map(to_native).collect())
    };
    if produces_result(sql) {
        let rows: Vec<mysql::Row> = conn.exec(&statement, params)?;
        let rows: Vec<Row> = rows.into_iter().map(to_row).collect();
        Ok(MySqlStatement::materialized(rows, 0, 0))
    } else {
        conn.exec_drop(&statement, params)?;
        Ok(MySqlStatement::materialized(
            Vec::new(),
            conn.last_insert_id(),
            conn.affected_rows(),
        ))
    }
}

fn outcome_from_error(error: &mysql::Error) -> Outcome {
    const ER_OUTOFMEMORY: u16 = 1037;
    const ER_OUT_OF_SORTMEMORY: u16 = 1038;
    match error {
        mysql::Error::IoError(_) => Outcome::ServerLost,
        mysql::Error::MySqlError(server)
            if server.code == ER_OUTOFMEMORY || server.code == ER_OUT_OF_SORTMEMORY =>
        {
            Outcome::NoMemory
        }
        _ => Outcome::Unknown,
    }
}

use crate::{
    PostgresStatement, extract::extract_row, rewrite::build_query,
    transaction::PostgresTransaction,
};
use postgres::{
    Client, NoTls,
    error::SqlState,
    types::{ToSql, Type},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use strata_core::{
    Connection, Context, Cursor, Outcome, Result, Row, Scalar, SharedConnection, Statement as _,
    Value, produces_result, truncate_long,
};

pub struct PostgresConnection {
    client: Arc<SharedConnection<Option<Client>>>,
    cursor_id: AtomicUsize,
}

impl Connection for PostgresConnection {
    type Statement = PostgresStatement;

    fn connect(url: &str) -> Result<Self> {
        let client =
            Client::connect(url, NoTls).with_context(|| format!("could not connect to `{}`", url))?;
        Ok(Self {
            client: Arc::new(SharedConnection::new(Some(client))),
            cursor_id: AtomicUsize::new(0),
        })
    }

    fn execute(&self, sql: &str, bindings: Vec<Value>) -> Cursor<PostgresStatement> {
        if sql.trim().is_empty() {
            return Cursor::new(PostgresStatement::failed(Outcome::Improper));
        }
        let (rewritten, placeholders) = build_query(sql);
        if placeholders > 0 && bindings.len() != placeholders {
            log::error!(
                "statement takes {} parameters but {} were bound:\n{}",
                placeholders,
                bindings.len(),
                truncate_long!(rewritten)
            );
            return Cursor::new(PostgresStatement::failed(Outcome::Improper));
        }
        let wants_rows = produces_result(&rewritten);
        // DECLARE cannot carry bind parameters, so a parameterized result
        // set is buffered instead of cursor-streamed
        let streaming = wants_rows && bindings.is_empty();
        let cursor_name = if streaming {
            format!("cursor_{}", self.cursor_id.fetch_add(1, Ordering::Relaxed) + 1)
        } else {
            String::new()
        };
        let source = if streaming {
            format!("DECLARE {} SCROLL CURSOR WITH HOLD FOR {}", cursor_name, rewritten)
        } else {
            rewritten
        };

        let mut lock = self.client.lock();
        let Some(client) = lock.as_mut() else {
            return Cursor::new(PostgresStatement::failed(Outcome::ServerLost));
        };
        let mut transaction = PostgresTransaction::begin(client);
        let result = run_statement(
            transaction.client(),
            &source,
            &bindings,
            wants_rows,
            streaming.then(|| Arc::clone(&self.client)),
            &cursor_name,
        );
        match result {
            Ok(statement) => {
                if statement.outcome().is_ok() {
                    transaction.commit();
                }
                Cursor::new(statement)
            }
            Err(error) => {
                log::error!("execution failed ({}):\n{}", error, truncate_long!(source));
                Cursor::new(PostgresStatement::failed(outcome_from_error(&error)))
            }
        }
    }

    fn close(&self) -> bool {
        self.client.lock().take();
        true
    }

    fn is_open(&self) -> bool {
        self.client.lock().is_some()
    }

    fn vacuum(&self) {
        let mut lock = self.client.lock();
        if let Some(client) = lock.as_mut() {
            let _ = client.batch_execute("VACUUM;");
        }
    }

    fn version(&self) -> String {
        let mut lock = self.client.lock();
        let version = lock
            .as_mut()
            .and_then(|client| client.query_one("SHOW server_version", &[]).ok())
            .and_then(|row| row.try_get::<_, String>(0).ok())
            .unwrap_or_else(|| "unknown".into());
        format!("POSTGRESQL: {}", version)
    }
}

fn run_statement(
    client: &mut Client,
    source: &str,
    bindings: &[Value],
    wants_rows: bool,
    cursor_client: Option<Arc<SharedConnection<Option<Client>>>>,
    cursor_name: &str,
) -> std::result::Result<PostgresStatement, postgres::Error> {
    let types: Vec<Type> = bindings.iter().map(bind_type).collect();
    let prepared = client.prepare_typed(source, &types)?;
    if prepared.params().len() != bindings.len() {
        // a mismatched binding list would otherwise abort inside the client
        log::error!(
            "statement takes {} parameters but {} were bound:\n{}",
            prepared.params().len(),
            bindings.len(),
            truncate_long!(source)
        );
        return Ok(PostgresStatement::failed(Outcome::Improper));
    }
    let params = to_params(bindings);
    let refs: Vec<&(dyn ToSql + Sync)> = params.iter().map(Box::as_ref).collect();
    if let Some(shared) = cursor_client {
        client.execute(&prepared, &[])?;
        Ok(PostgresStatement::cursor(shared, cursor_name.to_owned()))
    } else if wants_rows {
        let rows: Vec<Row> = client.query(&prepared, &refs)?.iter().map(extract_row).collect();
        Ok(PostgresStatement::materialized(rows, 0))
    } else {
        let affected_rows = client.execute(&prepared, &refs)?;
        Ok(PostgresStatement::materialized(Vec::new(), affected_rows))
    }
}

fn bind_type(value: &Value) -> Type {
    match value.scalar() {
        Scalar::Integer(_) => Type::INT8,
        Scalar::Float(_) => Type::FLOAT8,
        Scalar::Blob(_) => Type::BYTEA,
        Scalar::Text(_) | Scalar::Null | Scalar::Invalid => Type::TEXT,
    }
}

fn to_params(bindings: &[Value]) -> Vec<Box<dyn ToSql + Sync>> {
    bindings
        .iter()
        .map(|value| -> Box<dyn ToSql + Sync> {
            match value.scalar() {
                Scalar::Invalid | Scalar::Null => Box::new(None::<String>),
                Scalar::Integer(v) => Box::new(*v),
                Scalar::Float(v) => Box::new(*v),
                Scalar::Text(v) => Box::new(v.clone()),
                Scalar::Blob(v) => Box::new(v.to_vec()),
            }
        })
        .collect()
}

fn outcome_from_error(error: &postgres::Error) -> Outcome {
    if error.is_closed() {
        return Outcome::ServerLost;
    }
    match error.code() {
        Some(state) if *state == SqlState::OUT_OF_MEMORY => Outcome::NoMemory,
        _ => Outcome::Unknown,
    }
}

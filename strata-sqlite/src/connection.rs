use crate::{CBox, SqliteStatement, error_message, sqlite3_close_v2, transaction::SqliteTransaction};
use libsqlite3_sys::{
    SQLITE_BUSY, SQLITE_DONE, SQLITE_MISUSE, SQLITE_NOMEM, SQLITE_OK, SQLITE_OPEN_CREATE,
    SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, SQLITE_RANGE, SQLITE_ROW, SQLITE_TRANSIENT, sqlite3,
    sqlite3_bind_blob, sqlite3_bind_double, sqlite3_bind_int, sqlite3_bind_int64,
    sqlite3_bind_null, sqlite3_bind_parameter_index, sqlite3_bind_text, sqlite3_changes,
    sqlite3_exec, sqlite3_finalize, sqlite3_last_insert_rowid,
    sqlite3_libversion, sqlite3_open_v2, sqlite3_prepare_v2, sqlite3_reset, sqlite3_step,
    sqlite3_stmt,
};
use std::{
    ffi::{CStr, CString, c_char, c_int, c_void},
    ptr,
};
use strata_core::{
    Connection, Context, Cursor, Error, IntWidth, Outcome, Result, Scalar, SharedConnection,
    Value, int_width, produces_result, truncate_long,
};

/// The native handle shared between threads behind the connection lock.
pub(crate) struct DbHandle {
    pub(crate) ptr: *mut sqlite3,
}

// The pointer only moves between threads inside the lock, and the bundled
// library is built in serialized threading mode.
unsafe impl Send for DbHandle {}

pub struct SqliteConnection {
    db: SharedConnection<DbHandle>,
}

impl Connection for SqliteConnection {
    type Statement = SqliteStatement;

    fn connect(url: &str) -> Result<Self> {
        const PREFIX: &str = "sqlite://";
        if !url.starts_with(PREFIX) {
            return Err(Error::msg(format!(
                "expected a sqlite connection url starting with `{}`",
                PREFIX
            )));
        }
        let target = urlencoding::decode(&url[PREFIX.len()..])
            .with_context(|| format!("while decoding the connection url `{}`", url))?;
        let target = if target.contains('?') && !target.starts_with("file:") {
            format!("file:{}", target)
        } else {
            target.into_owned()
        };
        let path = CString::new(target).context("the database path contains a nul byte")?;
        let mut db = ptr::null_mut();
        let code = unsafe {
            sqlite3_open_v2(
                path.as_ptr(),
                &mut db,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            )
        };
        if code != SQLITE_OK {
            let error = Error::msg(error_message(db))
                .context(format!("could not open the database `{}`", url));
            unsafe {
                sqlite3_close_v2(db);
            }
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(Self {
            db: SharedConnection::new(DbHandle { ptr: db }),
        })
    }

    fn execute(&self, sql: &str, bindings: Vec<Value>) -> Cursor<SqliteStatement> {
        if sql.trim().is_empty() {
            return Cursor::new(SqliteStatement::failed(Outcome::Improper));
        }
        let lock = self.db.lock();
        let db = lock.ptr;
        if db.is_null() {
            return Cursor::new(SqliteStatement::failed(Outcome::ServerLost));
        }
        let mut transaction = SqliteTransaction::begin(db);
        let source = match CString::new(sql) {
            Ok(source) => source,
            Err(_) => return Cursor::new(SqliteStatement::failed(Outcome::Improper)),
        };
        let mut statement = CBox::new(ptr::null_mut(), |statement| unsafe {
            sqlite3_finalize(statement);
        });
        let code =
            unsafe { sqlite3_prepare_v2(db, source.as_ptr(), -1, &mut *statement, ptr::null_mut()) };
        if code != SQLITE_OK {
            log::error!(
                "failed to prepare ({}):\n{}",
                error_message(db),
                truncate_long!(sql)
            );
            return Cursor::new(SqliteStatement::failed(outcome_from_code(code)));
        }
        if (*statement).is_null() {
            // whitespace or comment-only input produces no statement
            return Cursor::new(SqliteStatement::failed(Outcome::Improper));
        }
        for (position, value) in bindings.iter().enumerate() {
            let code = bind_value(*statement, position as c_int + 1, value);
            if code != SQLITE_OK {
                log::error!(
                    "failed to bind parameter {} ({}):\n{}",
                    position + 1,
                    error_message(db),
                    truncate_long!(sql)
                );
                return Cursor::new(SqliteStatement::failed(outcome_from_code(code)));
            }
        }
        loop {
            match unsafe { sqlite3_step(*statement) } {
                SQLITE_BUSY => continue,
                SQLITE_OK | SQLITE_ROW | SQLITE_DONE => break,
                code => {
                    log::error!(
                        "execution failed ({}):\n{}",
                        error_message(db),
                        truncate_long!(sql)
                    );
                    return Cursor::new(SqliteStatement::failed(outcome_from_code(code)));
                }
            }
        }
        if produces_result(sql) {
            transaction.commit();
            unsafe {
                sqlite3_reset(*statement);
            }
            return Cursor::new(SqliteStatement::streaming(statement));
        }
        let last_insert_id = unsafe { sqlite3_last_insert_rowid(db) } as u64;
        let affected_rows = unsafe { sqlite3_changes(db) } as u64;
        transaction.commit();
        Cursor::new(SqliteStatement::completed(last_insert_id, affected_rows))
    }

    fn close(&self) -> bool {
        let mut lock = self.db.lock();
        if lock.ptr.is_null() {
            return true;
        }
        unsafe {
            sqlite3_close_v2(lock.ptr);
        }
        lock.ptr = ptr::null_mut();
        true
    }

    fn is_open(&self) -> bool {
        !self.db.lock().ptr.is_null()
    }

    fn vacuum(&self) {
        let lock = self.db.lock();
        if lock.ptr.is_null() {
            return;
        }
        unsafe {
            sqlite3_exec(
                lock.ptr,
                c"VACUUM;".as_ptr(),
                None,
                ptr::null_mut(),
                ptr::null_mut(),
            );
        }
    }

    fn version(&self) -> String {
        unsafe {
            format!(
                "SQLITE: {}",
                CStr::from_ptr(sqlite3_libversion()).to_string_lossy()
            )
        }
    }
}

impl Drop for SqliteConnection {
    fn drop(&mut self) {
        self.close();
    }
}

fn bind_value(statement: *mut sqlite3_stmt, position: c_int, value: &Value) -> c_int {
    let index = if value.name().is_empty() {
        position
    } else {
        let name = match CString::new(value.name()) {
            Ok(name) => name,
            Err(_) => return SQLITE_RANGE,
        };
        let index = unsafe { sqlite3_bind_parameter_index(statement, name.as_ptr()) };
        if index == 0 {
            return SQLITE_RANGE;
        }
        index
    };
    unsafe {
        match value.scalar() {
            Scalar::Invalid | Scalar::Null => sqlite3_bind_null(statement, index),
            Scalar::Integer(v) => match int_width(*v) {
                IntWidth::I8 | IntWidth::I16 | IntWidth::I32 => {
                    sqlite3_bind_int(statement, index, *v as c_int)
                }
                IntWidth::I64 => sqlite3_bind_int64(statement, index, *v),
            },
            Scalar::Float(v) => sqlite3_bind_double(statement, index, *v),
            Scalar::Text(v) => sqlite3_bind_text(
                statement,
                index,
                v.as_ptr() as *const c_char,
                v.len() as c_int,
                SQLITE_TRANSIENT(),
            ),
            Scalar::Blob(v) => sqlite3_bind_blob(
                statement,
                index,
                v.as_ptr() as *const c_void,
                v.len() as c_int,
                SQLITE_TRANSIENT(),
            ),
        }
    }
}

fn outcome_from_code(code: c_int) -> Outcome {
    match code {
        SQLITE_OK | SQLITE_ROW | SQLITE_DONE => Outcome::Ok,
        SQLITE_NOMEM => Outcome::NoMemory,
        SQLITE_MISUSE | SQLITE_RANGE => Outcome::Improper,
        _ => Outcome::Unknown,
    }
}

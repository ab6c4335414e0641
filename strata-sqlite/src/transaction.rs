use libsqlite3_sys::{SQLITE_OK, sqlite3, sqlite3_exec};
use std::{ffi::CStr, ptr};

/// Begins on construction and rolls back on drop unless committed, so no
/// statement leaves an open transaction behind on a failure path.
pub(crate) struct SqliteTransaction {
    db: *mut sqlite3,
    finished: bool,
}

impl SqliteTransaction {
    pub(crate) fn begin(db: *mut sqlite3) -> Self {
        let finished = !exec(db, c"BEGIN;");
        Self { db, finished }
    }

    pub(crate) fn commit(&mut self) -> bool {
        if self.finished {
            return true;
        }
        self.finished = exec(self.db, c"COMMIT;");
        self.finished
    }

    pub(crate) fn rollback(&mut self) -> bool {
        if self.finished {
            return true;
        }
        self.finished = exec(self.db, c"ROLLBACK;");
        self.finished
    }
}

impl Drop for SqliteTransaction {
    fn drop(&mut self) {
        self.rollback();
    }
}

fn exec(db: *mut sqlite3, sql: &CStr) -> bool {
    unsafe { sqlite3_exec(db, sql.as_ptr(), None, ptr::null_mut(), ptr::null_mut()) == SQLITE_OK }
}

#[cfg(test)]
mod tests {
    use super::SqliteTransaction;
    use crate::sqlite3_close_v2;
    use libsqlite3_sys::{SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, sqlite3_open_v2};
    use std::ptr;

    #[test]
    fn finishing_twice_is_a_no_op() {
        let mut db = ptr::null_mut();
        unsafe {
            sqlite3_open_v2(
                c":memory:".as_ptr(),
                &mut db,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                ptr::null(),
            );
        }
        let mut transaction = SqliteTransaction::begin(db);
        assert!(transaction.commit());
        assert!(transaction.commit());
        assert!(transaction.rollback());

        let mut transaction = SqliteTransaction::begin(db);
        assert!(transaction.rollback());
        assert!(transaction.commit());
        drop(transaction);
        unsafe {
            sqlite3_close_v2(db);
        }
    }
}

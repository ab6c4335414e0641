use libsqlite3_sys::{
    SQLITE_BLOB, SQLITE_FLOAT, SQLITE_INTEGER, SQLITE_NULL, SQLITE_TEXT, sqlite3_column_blob,
    sqlite3_column_bytes, sqlite3_column_double, sqlite3_column_int64, sqlite3_column_name,
    sqlite3_column_text, sqlite3_column_type, sqlite3_stmt,
};
use std::{ffi::CStr, ffi::c_int, slice};
use strata_core::{Scalar, Value};

pub(crate) fn extract_value(statement: *mut sqlite3_stmt, index: c_int) -> Value {
    let name = extract_name(statement, index);
    let scalar = unsafe {
        match sqlite3_column_type(statement, index) {
            SQLITE_NULL => Scalar::Null,
            SQLITE_INTEGER => Scalar::Integer(sqlite3_column_int64(statement, index)),
            SQLITE_FLOAT => Scalar::Float(sqlite3_column_double(statement, index)),
            SQLITE_TEXT => {
                let data = sqlite3_column_text(statement, index);
                let len = sqlite3_column_bytes(statement, index) as usize;
                if data.is_null() || len == 0 {
                    Scalar::Text(String::new())
                } else {
                    let bytes = slice::from_raw_parts(data, len);
                    Scalar::Text(String::from_utf8_lossy(bytes).into_owned())
                }
            }
            SQLITE_BLOB => {
                let data = sqlite3_column_blob(statement, index) as *const u8;
                let len = sqlite3_column_bytes(statement, index) as usize;
                if data.is_null() || len == 0 {
                    Scalar::Blob(Box::default())
                } else {
                    Scalar::Blob(slice::from_raw_parts(data, len).into())
                }
            }
            _ => Scalar::Integer(0),
        }
    };
    Value::new(name, scalar)
}

pub(crate) fn extract_name(statement: *mut sqlite3_stmt, index: c_int) -> String {
    unsafe {
        let name = sqlite3_column_name(statement, index);
        if name.is_null() {
            String::new()
        } else {
            CStr::from_ptr(name).to_string_lossy().into_owned()
        }
    }
}

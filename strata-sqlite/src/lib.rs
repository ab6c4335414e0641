mod cbox;
mod connection;
mod extract;
mod statement;
mod transaction;

use libsqlite3_sys::{sqlite3, sqlite3_errmsg};
use std::ffi::CStr;

// `libsqlite3-sys`'s bundled bindings only expose `sqlite3_close_v2` when the
// `loadable_extension` feature is enabled, even though the bundled C library
// always compiles it in. Declare it ourselves rather than link against it
// through a binding mode that changes how the library is built.
unsafe extern "C" {
    pub(crate) fn sqlite3_close_v2(db: *mut sqlite3) -> std::os::raw::c_int;
}

pub(crate) use cbox::*;
pub use connection::*;
pub use statement::*;

pub(crate) fn error_message(db: *mut sqlite3) -> String {
    unsafe {
        let message = sqlite3_errmsg(db);
        if message.is_null() {
            "unknown error (no message available)".into()
        } else {
            CStr::from_ptr(message).to_string_lossy().into_owned()
        }
    }
}

mod classify;
mod connection;
mod cursor;
mod lock;
mod query;
mod row;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context;
pub use classify::*;
pub use connection::*;
pub use cursor::*;
pub use lock::*;
pub use query::*;
pub use row::*;
pub use statement::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

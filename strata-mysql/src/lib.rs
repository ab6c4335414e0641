mod connection;
mod convert;
mod statement;
mod transaction;

pub use connection::*;
pub use statement::*;

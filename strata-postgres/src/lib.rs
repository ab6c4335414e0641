mod connection;
mod extract;
mod rewrite;
mod statement;
mod transaction;

pub use connection::*;
pub use statement::*;

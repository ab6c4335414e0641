//! Strata is a data access layer for applications that target several
//! relational engines at once: one tagged value model, one query building
//! protocol and one lazy row streaming contract, with each backend living in
//! its own driver crate (`strata-sqlite`, `strata-mysql`, `strata-postgres`).

pub use strata_core::*;
pub use strata_core::{truncate_long, values};

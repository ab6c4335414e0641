use crate::{Outcome, Row, Statement};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

/// Owns a driver streaming handle and hands out single-pass row iterators.
///
/// A cursor and its iterators stay confined to one thread for their whole
/// lifetime (`Rc` makes this a compile-time guarantee), and must be dropped
/// no later than the connection that produced them.
pub struct Cursor<S: Statement> {
    statement: Rc<RefCell<S>>,
}

impl<S: Statement> Cursor<S> {
    pub fn new(statement: S) -> Self {
        Self {
            statement: Rc::new(RefCell::new(statement)),
        }
    }

    /// Rewinds the handle and returns a fresh iterator over its rows.
    pub fn iter(&self) -> Rows<S> {
        self.statement.borrow_mut().first();
        Rows {
            statement: Rc::downgrade(&self.statement),
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.statement.borrow().outcome()
    }

    pub fn last_insert_id(&self) -> u64 {
        self.statement.borrow().last_insert_id()
    }

    pub fn affected_rows(&self) -> u64 {
        self.statement.borrow().affected_rows()
    }
}

impl<'c, S: Statement> IntoIterator for &'c Cursor<S> {
    type Item = Row;
    type IntoIter = Rows<S>;
    fn into_iter(self) -> Rows<S> {
        self.iter()
    }
}

/// Single-pass iterator over a cursor's rows.
///
/// Holds only a weak observation of the cursor's handle: once the owning
/// cursor is gone, iteration silently yields nothing.
pub struct Rows<S: Statement> {
    statement: Weak<RefCell<S>>,
}

impl<S: Statement> Iterator for Rows<S> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let statement = self.statement.upgrade()?;
        let row = statement.borrow_mut().next_row();
        row
    }
}

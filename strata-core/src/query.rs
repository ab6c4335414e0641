use crate::{Connection, Cursor, Scalar, Value};
use std::mem;

/// Accumulates query text and an ordered binding list, in the order the
/// caller issues appends, then hands both to the driver on [`execute`].
///
/// Text and parameters travel separately: [`sql`] appends literal (escaped)
/// text, while [`bind`] and friends append out-of-band binding entries for
/// the backend's `?` placeholders. Which path a string takes is decided by
/// the call site, never by its content.
///
/// [`execute`]: Query::execute
/// [`sql`]: Query::sql
/// [`bind`]: Query::bind
pub struct Query<'c, C: Connection> {
    connection: &'c C,
    text: String,
    bindings: Vec<Value>,
}

impl<'c, C: Connection> Query<'c, C> {
    pub fn new(connection: &'c C, sql: &str) -> Self {
        let mut query = Self {
            connection,
            text: String::new(),
            bindings: Vec::new(),
        };
        query.sql(sql);
        query
    }

    /// Appends literal query text, doubling every single quote and
    /// backslash. This is the only sanitization applied to raw text; it does
    /// not guard against structural changes to the query.
    pub fn sql(&mut self, text: &str) -> &mut Self {
        if !text.contains(['\'', '\\']) {
            self.text.push_str(text);
            return self;
        }
        for c in text.chars() {
            self.text.push(c);
            if c == '\'' {
                self.text.push('\'');
            }
            if c == '\\' {
                self.text.push('\\');
            }
        }
        self
    }

    /// Appends one positional binding entry. A string appended here is a
    /// bound parameter carried out of band, never literal text.
    pub fn bind(&mut self, value: impl Into<Scalar>) -> &mut Self {
        self.bindings.push(Value::from(value.into()));
        self
    }

    /// Appends one named binding entry.
    pub fn bind_named(&mut self, name: &str, value: impl Into<Scalar>) -> &mut Self {
        self.bindings.push(Value::new(name, value));
        self
    }

    /// Appends every element as a successive positional entry, left to
    /// right. See [`values!`](crate::values).
    pub fn bind_all(&mut self, values: impl IntoIterator<Item = Scalar>) -> &mut Self {
        self.bindings.extend(values.into_iter().map(Value::from));
        self
    }

    /// Rewrites the placeholders `{0}`, `{1}`, … in the accumulated text
    /// with the given names, in order, replacing every occurrence.
    ///
    /// This fills column and table identifier slots only. No escaping is
    /// applied and `?` placeholders are left alone; never pass untrusted
    /// input.
    pub fn columns<I>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for (index, name) in names.into_iter().enumerate() {
            let placeholder = format!("{{{}}}", index);
            while let Some(position) = self.text.find(&placeholder) {
                self.text
                    .replace_range(position..position + placeholder.len(), name.as_ref());
            }
        }
        self
    }

    /// The accumulated query text so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The accumulated binding list so far.
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// Hands the accumulated text and bindings to the driver and returns its
    /// streaming handle. The builder's buffers are snapshotted and cleared
    /// in the same step, so a half-built query can never leak into the next
    /// call and the builder is immediately reusable.
    pub fn execute(&mut self) -> Cursor<C::Statement> {
        let text = mem::take(&mut self.text);
        let bindings = mem::take(&mut self.bindings);
        self.connection.execute(&text, bindings)
    }
}

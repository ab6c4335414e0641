use regex::Regex;
use std::sync::LazyLock;

static BLOB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bBLOB\b").expect("blob pattern is valid"));

/// Maps the portable `BLOB` keyword to `BYTEA` and rewrites every `?`
/// placeholder to `$1`…`$N`, returning the rewritten text and the
/// placeholder count. The rewrite is textual: a `?` inside a string literal
/// is rewritten too, so bound parameters are the way to carry one.
pub(crate) fn build_query(sql: &str) -> (String, usize) {
    let sql = BLOB.replace_all(sql, "BYTEA");
    let mut out = String::with_capacity(sql.len() + 8);
    let mut count = 0usize;
    for c in sql.chars() {
        if c == '?' {
            count += 1;
            out.push('$');
            out.push_str(&count.to_string());
        } else {
            out.push(c);
        }
    }
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::build_query;

    #[test]
    fn rewrites_placeholders_and_blob() {
        assert_eq!(
            build_query("INSERT INTO t (a, b) VALUES (?, ?)"),
            ("INSERT INTO t (a, b) VALUES ($1, $2)".into(), 2)
        );
        assert_eq!(
            build_query("CREATE TABLE t (payload BLOB, blobby INTEGER)"),
            ("CREATE TABLE t (payload BYTEA, blobby INTEGER)".into(), 0)
        );
        assert_eq!(build_query("SELECT 1"), ("SELECT 1".into(), 0));
    }
}

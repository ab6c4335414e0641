use regex::Regex;
use std::sync::LazyLock;

static KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(DESC|DESCRIBE|EXPLAIN|SHOW)\b").expect("keyword pattern is valid")
});

static SELECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSELECT\b").expect("select pattern is valid"));

/// Lexically decides whether `sql` is expected to produce a result set,
/// which controls whether a driver opens a server-side cursor or runs a
/// plain command.
///
/// DESC, DESCRIBE, EXPLAIN and SHOW always count. A SELECT counts unless the
/// text after it closes a parenthesis before opening one, which discounts
/// sub-selects inside an expression. This is a keyword-boundary check, not a
/// parser: nested or oddly formatted SQL can misclassify, and that is a
/// documented limitation of the heuristic.
pub fn produces_result(sql: &str) -> bool {
    if KEYWORDS.is_match(sql) {
        return true;
    }
    SELECT.find_iter(sql).any(|keyword| {
        let rest = &sql[keyword.end()..];
        match (rest.find('('), rest.find(')')) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(open), Some(close)) => open < close,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::produces_result;

    #[test]
    fn plain_select() {
        assert!(produces_result("SELECT * FROM t"));
        assert!(produces_result("select name from t where id = ?"));
        assert!(produces_result("SELECT COUNT(*) FROM t"));
    }

    #[test]
    fn commands() {
        assert!(!produces_result("UPDATE t SET x = 1"));
        assert!(!produces_result("INSERT INTO t (x) VALUES (?)"));
        assert!(!produces_result("DELETE FROM t WHERE x = ?"));
        assert!(!produces_result("CREATE TABLE t (x INTEGER)"));
    }

    #[test]
    fn keyword_statements() {
        assert!(produces_result("SHOW TABLES"));
        assert!(produces_result("EXPLAIN SELECT * FROM t"));
        assert!(produces_result("DESCRIBE t"));
    }

    #[test]
    fn keywords_need_word_boundaries() {
        assert!(!produces_result("UPDATE t SET described = 1"));
        assert!(!produces_result("INSERT INTO showcase (x) VALUES (?)"));
    }

    #[test]
    fn parenthesized_select_is_discounted() {
        assert!(!produces_result("INSERT INTO t (x) VALUES ((SELECT 1))"));
        assert!(!produces_result("INSERT INTO t (x) VALUES ((SELECT y FROM u))"));
    }

    #[test]
    fn nested_selects_are_a_known_false_positive() {
        // No parenthesis follows the SELECT, so the exclusion cannot apply
        // and the statement classifies as result producing even though it
        // writes. Callers relying on the heuristic live with this.
        assert!(produces_result("INSERT INTO t (x) SELECT 1"));
        // An opening parenthesis right after the SELECT defeats the
        // exclusion too; same limitation.
        assert!(produces_result("INSERT INTO t (x) VALUES ((SELECT MAX(y) FROM u))"));
    }
}

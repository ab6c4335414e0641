/// Caps query text embedded in a log message.
#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            &$query[..::std::cmp::min($query.len(), 500)].trim_end(),
            if $query.len() > 500 { "..." } else { "" },
        )
    };
}

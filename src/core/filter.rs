/// Logical name for `entry`: the entry with one trailing `suffix` removed,
/// or `None` if it does not end with `suffix`.
pub fn logical_name<'a>(entry: &'a str, suffix: &str) -> Option<&'a str> {
    entry.strip_suffix(suffix)
}

/// Logical names of every matching entry, in listing order.
pub fn select<I, S>(entries: I, suffix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| logical_name(entry.as_ref(), suffix).map(str::to_string))
        .collect()
}

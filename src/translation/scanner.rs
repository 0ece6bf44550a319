#[derive(Clone, Copy)]
pub(super) enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Bracketed,
    LineComment,
    BlockComment(u32),
}

/// Letters and digits of any script, plus `_`, `#` and `$`.
pub(super) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '#' | '$')
}

/// Byte end of the identifier starting at `start`, or `None` if there is none.
///
/// `start` must be on a char boundary of `sql`.
pub(super) fn scan_ident(sql: &str, start: usize) -> Option<usize> {
    let rest = sql.get(start..)?;
    let len = rest
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(rest.len(), |(i, _)| i);
    if len == 0 { None } else { Some(start + len) }
}

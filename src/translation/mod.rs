//! Named-to-positional placeholder rewriting.
//!
//! Statements are written with named placeholders (`@UserName`). SQLite binds those
//! natively; tiberius only binds positionally (`@P1`, `@P2`, ...), so SQL Server
//! statements are rewritten before execution.

use std::borrow::Cow;

mod parsers;
mod scanner;

use parsers::{is_block_comment_end, is_block_comment_start, is_line_comment_start};
use scanner::{State, scan_ident};

/// Replace every `@name` whose name appears in `names` with `@P<n>`, where `n` is
/// the 1-based position of that name. Matching ignores ASCII case and the `@`
/// prefix of the entries in `names`.
///
/// Placeholders inside quoted strings, bracketed identifiers and comments are left
/// alone, as are `@@globals` and variables that are not in `names`.
/// Returns a borrowed `Cow` when no changes are needed.
#[must_use]
pub fn translate_named_placeholders<'a>(sql: &'a str, names: &[&str]) -> Cow<'a, str> {
    if names.is_empty() {
        return Cow::Borrowed(sql);
    }

    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut state = State::Normal;
    let mut idx = 0;
    let bytes = sql.as_bytes();

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'[' => state = State::Bracketed,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment(1);
                    idx += 1;
                }
                b'@' if bytes.get(idx + 1) == Some(&b'@') => {
                    // @@ROWCOUNT and friends
                    idx += 1;
                    if let Some(end) = scan_ident(sql, idx + 1) {
                        idx = end - 1;
                    }
                }
                b'@' => {
                    if let Some(end) = scan_ident(sql, idx + 1) {
                        let ident = &sql[idx + 1..end];
                        if let Some(pos) = position_of(names, ident) {
                            let buf = out.get_or_insert_with(String::new);
                            buf.push_str(&sql[copied..idx]);
                            buf.push_str("@P");
                            buf.push_str(&(pos + 1).to_string());
                            copied = end;
                        }
                        idx = end - 1;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Bracketed => {
                if b == b']' {
                    if bytes.get(idx + 1) == Some(&b']') {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if is_block_comment_end(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}

fn position_of(names: &[&str], ident: &str) -> Option<usize> {
    names.iter().position(|name| {
        name.strip_prefix('@')
            .unwrap_or(name)
            .eq_ignore_ascii_case(ident)
    })
}

//! Placeholder scanning
//!
//! The MySQL driver only understands positional `?` markers. Statements
//! written with `:name` markers are rewritten to `?` here, and the names are
//! recorded in the order they appear so values can be bound in that order.
//!
//! Quoted strings (`'..'`, `".."`), backtick identifiers and comments
//! (`-- `, `#`, `/* */`) are copied through untouched.

/// Result of scanning a statement for placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// Statement text with every `:name` replaced by `?`
    pub sql: String,
    /// Number of `?` markers present in the original text
    pub positional: usize,
    /// Named markers in order of appearance (duplicates kept)
    pub named: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    Quoted(char),
    LineComment,
    BlockComment,
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scan `sql`, rewriting named markers and counting positional ones
pub fn scan(sql: &str) -> Placeholders {
    let mut out = String::with_capacity(sql.len());
    let mut positional = 0;
    let mut named = Vec::new();
    let mut state = State::Normal;
    let mut chars = sql.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        match state {
            State::Normal => match c {
                '\'' | '"' | '`' => {
                    state = State::Quoted(c);
                    out.push(c);
                }
                '#' => {
                    state = State::LineComment;
                    out.push(c);
                }
                '-' if chars.peek() == Some(&'-') => {
                    out.push(c);
                    out.push('-');
                    chars.next();
                    // MySQL requires whitespace (or end of input) after `--`
                    match chars.peek() {
                        Some(next) if !next.is_whitespace() => {}
                        _ => state = State::LineComment,
                    }
                }
                '/' if chars.peek() == Some(&'*') => {
                    out.push(c);
                    out.push('*');
                    chars.next();
                    state = State::BlockComment;
                }
                '?' => {
                    positional += 1;
                    out.push(c);
                }
                ':' if prev != Some(':') && chars.peek().copied().is_some_and(is_name_start) => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if !is_name_char(n) {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    named.push(name);
                    out.push('?');
                    prev = Some('?');
                    continue;
                }
                _ => out.push(c),
            },
            State::Quoted(quote) => {
                out.push(c);
                if c == '\\' && quote != '`' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                out.push(c);
                if c == '\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                out.push(c);
                if c == '*' && chars.peek() == Some(&'/') {
                    out.push('/');
                    chars.next();
                    state = State::Normal;
                }
            }
        }
        prev = Some(c);
    }

    Placeholders {
        sql: out,
        positional,
        named,
    }
}

//! Path expression parsing and stringification
//!
//! The grammar is a small dot/bracket subset of the usual path-query
//! languages: an optional leading `$`, `.key` member segments, bracketed
//! segments (`["key"]`, `['key']`, `[0]`), and a terminal `[*]` selecting
//! the elements of the addressed array. A single array target is assumed,
//! so a wildcard anywhere but the end is rejected.

use crate::error::PathError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// One step of a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member name (also accepted as a numeric index into arrays).
    Key(String),
    /// Array element index.
    Index(usize),
    /// Terminal wildcard selecting the elements of an array.
    Wild,
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    segments: Vec<Segment>,
}

impl PathExpr {
    /// Parse an expression such as `$.data.users[*]` or `items[0].tags`.
    pub fn parse(expr: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        let mut chars = expr.char_indices().peekable();

        if matches!(chars.peek(), Some((_, '$'))) {
            chars.next();
        } else if matches!(chars.peek(), Some((_, c)) if is_plain_key_char(*c)) {
            // Bare leading identifier: "data.users"
            segments.push(Segment::Key(take_ident(&mut chars)));
        }

        while let Some(&(offset, ch)) = chars.peek() {
            match ch {
                '.' => {
                    chars.next();
                    let key = take_ident(&mut chars);
                    if key.is_empty() {
                        return Err(invalid(expr, offset + 1, "expected a key after '.'"));
                    }
                    segments.push(Segment::Key(key));
                }
                '[' => {
                    chars.next();
                    segments.push(parse_bracket(expr, &mut chars)?);
                }
                other => {
                    return Err(invalid(
                        expr,
                        offset,
                        &format!("unexpected character '{other}'"),
                    ));
                }
            }
        }

        let interior_wildcard = segments
            .iter()
            .rev()
            .skip(1)
            .any(|segment| matches!(segment, Segment::Wild));
        if interior_wildcard {
            return Err(PathError::WildcardNotTerminal {
                expr: expr.to_string(),
            });
        }

        Ok(Self { segments })
    }

    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The segments of this expression, in navigation order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this expression addresses the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The expression minus its final segment: the write-back address for
    /// the filtered array. The container of the root is the root itself.
    pub fn container(&self) -> PathExpr {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) if is_plain_key(key) => write!(f, ".{key}")?,
                Segment::Key(key) => write!(f, "[\"{key}\"]")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Wild => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}

fn parse_bracket(
    expr: &str,
    chars: &mut Peekable<CharIndices<'_>>,
) -> Result<Segment, PathError> {
    let Some(&(offset, ch)) = chars.peek() else {
        return Err(invalid(expr, expr.len(), "unterminated '[' segment"));
    };

    let segment = match ch {
        '*' => {
            chars.next();
            Segment::Wild
        }
        '"' | '\'' => {
            chars.next();
            let mut key = String::new();
            loop {
                match chars.next() {
                    Some((_, c)) if c == ch => break,
                    Some((_, c)) => key.push(c),
                    None => return Err(invalid(expr, expr.len(), "unterminated quoted key")),
                }
            }
            Segment::Key(key)
        }
        c if c.is_ascii_digit() => {
            let mut digits = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                digits.push(c);
                chars.next();
            }
            let index = digits
                .parse::<usize>()
                .map_err(|_| invalid(expr, offset, "array index out of range"))?;
            Segment::Index(index)
        }
        other => {
            return Err(invalid(
                expr,
                offset,
                &format!("expected an index, quoted key, or '*' inside brackets, found '{other}'"),
            ));
        }
    };

    match chars.next() {
        Some((_, ']')) => Ok(segment),
        Some((close_offset, other)) => Err(invalid(
            expr,
            close_offset,
            &format!("expected ']', found '{other}'"),
        )),
        None => Err(invalid(expr, expr.len(), "expected ']' before end of expression")),
    }
}

fn take_ident(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_plain_key_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

// Keys outside this alphabet must use the bracket-quoted form.
fn is_plain_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_plain_key_char)
}

fn invalid(expr: &str, offset: usize, reason: &str) -> PathError {
    PathError::InvalidPath {
        expr: expr.to_string(),
        offset,
        reason: reason.to_string(),
    }
}

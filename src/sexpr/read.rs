use std::iter::{Peekable};
use std::str::{CharIndices};

use thiserror::{Error};

use crate::model::{Value};

/// A syntax error, with the byte offset at which it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("Expected an expression")]
    Empty,

    #[error("Unexpected closing bracket at {0}")]
    UnexpectedClose(usize),

    #[error("Mismatched closing bracket at {0}")]
    MismatchedClose(usize),

    #[error("Bracket at {0} is never closed")]
    Unclosed(usize),

    #[error("String starting at {0} is never closed")]
    UnterminatedString(usize),

    #[error("Unexpected text after the expression at {0}")]
    Trailing(usize),

    #[error("Bracket at {0} is nested too deeply")]
    TooDeep(usize),
}

/// The deepest nesting of lists that [`read`] accepts.
pub const MAX_DEPTH: usize = 256;

type Result<T> = std::result::Result<T, ReadError>;

/// Returns the closing bracket that matches `open`, if `open` is an opening
/// bracket.
fn closer(open: char) -> Option<char> {
    match open { '(' => Some(')'), '[' => Some(']'), _ => None }
}

/// Returns `true` if `c` ends a bare atom.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '(' | ')' | '[' | ']' | '"')
}

/// Interprets a bare atom as an integer, a float, or failing that a symbol.
///
/// Only decimal notation counts as a float, so `inf` and `nan` are symbols.
fn atom(text: &str) -> Value {
    if let Ok(i) = text.parse::<i64>() { return Value::Int(i); }
    let is_decimal = text.chars().all(|c| matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'));
    if is_decimal {
        if let Ok(f) = text.parse::<f64>() { return Value::Float(f); }
    }
    Value::Str(text.into())
}

struct Reader<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,

    /// The number of lists currently open.
    depth: usize,
}

impl<'a> Reader<'a> {
    /// Skip whitespace and commas, then peek.
    fn peek(&mut self) -> Option<(usize, char)> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !(c.is_whitespace() || c == ',') { break; }
            self.chars.next();
        }
        self.chars.peek().copied()
    }

    /// Read the expression starting with `c` at `pos`, which has been peeked.
    fn value(&mut self, pos: usize, c: char) -> Result<Value> {
        if let Some(close) = closer(c) {
            self.chars.next();
            self.list(pos, close)
        } else if c == '"' {
            self.chars.next();
            self.string(pos)
        } else if matches!(c, ')' | ']') {
            Err(ReadError::UnexpectedClose(pos))
        } else {
            let mut end = self.source.len();
            while let Some(&(i, c)) = self.chars.peek() {
                if is_delimiter(c) { end = i; break; }
                self.chars.next();
            }
            Ok(atom(&self.source[pos..end]))
        }
    }

    /// Read the items of a list opened at `open`, up to `close`.
    fn list(&mut self, open: usize, close: char) -> Result<Value> {
        if self.depth == MAX_DEPTH { return Err(ReadError::TooDeep(open)); }
        self.depth += 1;
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ReadError::Unclosed(open)),
                Some((_, c)) if c == close => { self.chars.next(); break; },
                Some((pos, ')' | ']')) => return Err(ReadError::MismatchedClose(pos)),
                Some((pos, c)) => items.push(self.value(pos, c)?),
            }
        }
        self.depth -= 1;
        Ok(items.into())
    }

    /// Read the rest of a string whose opening quote is at `open`.
    fn string(&mut self, open: usize) -> Result<Value> {
        for (i, c) in self.chars.by_ref() {
            if c == '"' { return Ok(Value::Str(self.source[open + 1..i].into())); }
        }
        Err(ReadError::UnterminatedString(open))
    }
}

/// Parse `source` as a single expression.
///
/// Lists are written in `(...)` or `[...]`, with items separated by
/// whitespace or commas. Strings may be quoted, and must be if they look like
/// numbers or contain delimiters.
pub fn read(source: &str) -> Result<Value> {
    let mut reader = Reader {source, chars: source.char_indices().peekable(), depth: 0};
    let (pos, c) = reader.peek().ok_or(ReadError::Empty)?;
    let value = reader.value(pos, c)?;
    if let Some((pos, _)) = reader.peek() { return Err(ReadError::Trailing(pos)); }
    Ok(value)
}

// ----------------------------------------------------------------------------

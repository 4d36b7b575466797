//! Literal — a parser for JavaScript literal data, producing [`serde_json::Value`].
//!
//! Accepts exactly the subset of JavaScript that describes data:
//!
//! - strings in single or double quotes, with the usual JS escapes
//! - numbers (decimal, fractional, exponent, `0x` hex, leading sign)
//! - `true`, `false`, `null`
//! - arrays and objects, trailing commas allowed
//! - object keys as identifiers, strings, or numbers
//! - `//` and `/* */` comments anywhere whitespace is allowed
//!
//! Everything else is rejected with a [`LiteralError`]: identifiers used as
//! values, calls, spread, template literals, operators, computed keys. The
//! parser never evaluates anything.
//!
//! Integer literals keep their exact digits up to the `u64` / `i64` range,
//! where a JavaScript engine would already have rounded anything past 2^53.
//! Beyond that range, and for integral floats past 2^53, the value is kept as
//! an `f64` and serialized in exponent form (`1.2345678901234568e20`) rather
//! than the zero-padded digits `JSON.stringify` prints.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Maximum array/object nesting accepted before bailing out.
pub const MAX_DEPTH: usize = 128;

/// Integers above this magnitude stay floats when a float literal is
/// folded back to an integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A parse failure with its 1-based position in the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct LiteralError {
    pub kind: LiteralErrorKind,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("`{0}` is not a literal value")]
    NotALiteral(String),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("nesting deeper than {} levels", MAX_DEPTH)]
    TooDeep,
    #[error("unexpected content after value")]
    TrailingContent,
}

/// Parse a single literal value. Comments and whitespace may surround it;
/// anything else after the value is an error.
pub fn parse_value(src: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(src);
    let value = parser.value()?;
    parser.skip_trivia()?;
    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(parser.error(LiteralErrorKind::TrailingContent)),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0, depth: 0 }
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, kind: LiteralErrorKind) -> LiteralError {
        self.error_at(self.pos, kind)
    }

    fn error_at(&self, pos: usize, kind: LiteralErrorKind) -> LiteralError {
        let before = &self.src[..pos];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        LiteralError { kind, line, column }
    }

    fn unexpected(&self) -> LiteralError {
        match self.peek() {
            Some(c) => self.error(LiteralErrorKind::UnexpectedChar(c)),
            None => self.error(LiteralErrorKind::UnexpectedEof),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LiteralError> {
        loop {
            let rest = self.rest();
            if rest.starts_with("//") {
                let end = rest.find(['\n', '\r']).unwrap_or(rest.len());
                self.pos += end;
            } else if rest.starts_with("/*") {
                let start = self.pos;
                match rest[2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => return Err(self.error_at(start, LiteralErrorKind::UnterminatedComment)),
                }
            } else {
                match self.peek() {
                    Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                        self.bump();
                    }
                    _ => return Ok(()),
                }
            }
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('{') => self.nested(Self::object),
            Some('[') => self.nested(Self::array),
            Some(q @ ('"' | '\'')) => self.string(q).map(Value::String),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => self.number(),
            Some('.') if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => self.number(),
            Some(c) if is_ident_start(c) => {
                let start = self.pos;
                match self.identifier() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    other => Err(self.error_at(start, LiteralErrorKind::NotALiteral(other.to_string()))),
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(LiteralErrorKind::TooDeep));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn array(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Value::Array(items));
            }
            items.push(self.value()?);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn object(&mut self) -> Result<Value, LiteralError> {
        self.bump();
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }
            let key = self.key()?;
            self.skip_trivia()?;
            if self.peek() != Some(':') {
                return Err(self.unexpected());
            }
            self.bump();
            let value = self.value()?;
            // A repeated key keeps its first position and takes the last value.
            map.insert(key, value);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.string(q),
            Some(c) if is_ident_start(c) => Ok(self.identifier().to_string()),
            Some(c) if c.is_ascii_digit() || c == '.' => match self.number()? {
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(self.unexpected()),
            },
            _ => Err(self.unexpected()),
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n' | '\r') => {
                    return Err(self.error_at(start, LiteralErrorKind::UnterminatedString))
                }
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let at = self.pos - 1;
        let invalid = |p: &Self| p.error_at(at, LiteralErrorKind::InvalidEscape);
        match self.bump() {
            None => return Err(self.error(LiteralErrorKind::UnterminatedString)),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') if !self.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            Some('0'..='9') => return Err(invalid(self)),
            Some('x') => {
                let code = self.hex_digits(2).ok_or_else(|| invalid(self))?;
                out.push(char::from_u32(code).ok_or_else(|| invalid(self))?);
            }
            Some('u') => {
                let c = self.unicode_escape().ok_or_else(|| invalid(self))?;
                out.push(c);
            }
            // Line continuation.
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some('\r') => {
                if self.peek() == Some('\n') {
                    self.bump();
                }
            }
            Some(c) => out.push(c),
        }
        Ok(())
    }

    fn unicode_escape(&mut self) -> Option<char> {
        let code = self.code_unit()?;
        if (0xD800..0xDC00).contains(&code) {
            // High surrogate: must be followed by `\u` and a low surrogate.
            if !self.rest().starts_with("\\u") {
                return None;
            }
            self.pos += 2;
            let low = self.code_unit()?;
            if !(0xDC00..0xE000).contains(&low) {
                return None;
            }
            return char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00));
        }
        char::from_u32(code)
    }

    fn code_unit(&mut self) -> Option<u32> {
        if self.peek() == Some('{') {
            self.bump();
            let start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            let digits = &self.src[start..self.pos];
            if self.bump() != Some('}') || digits.is_empty() || digits.len() > 6 {
                return None;
            }
            return u32::from_str_radix(digits, 16).ok();
        }
        self.hex_digits(4)
    }

    fn hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.rest().get(..count)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        self.pos += count;
        u32::from_str_radix(digits, 16).ok()
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some('-') => {
                self.bump();
                true
            }
            Some('+') => {
                self.bump();
                false
            }
            _ => false,
        };
        let digits_start = self.pos;

        let rest = self.rest();
        if rest.starts_with("0x") || rest.starts_with("0X") {
            self.pos += 2;
            let hex_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            let src = self.src;
            let hex = &src[hex_start..self.pos];
            if hex.is_empty() {
                return Err(self.invalid_number(start));
            }
            return match u64::from_str_radix(hex, 16) {
                Ok(magnitude) if !negative => Ok(Value::from(magnitude)),
                Ok(magnitude) => match 0i64.checked_sub_unsigned(magnitude) {
                    Some(n) => Ok(Value::from(n)),
                    None => self.float_number(-(magnitude as f64), start),
                },
                Err(_) => {
                    let magnitude = hex
                        .chars()
                        .filter_map(|c| c.to_digit(16))
                        .fold(0.0, |acc, d| acc * 16.0 + f64::from(d));
                    self.float_number(if negative { -magnitude } else { magnitude }, start)
                }
            };
        }

        let mut is_float = false;
        self.skip_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            self.skip_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.skip_digits();
        }

        if self.peek().is_some_and(is_ident_start) {
            // `12px`, `-Infinity`, and similar.
            let end = self.pos;
            self.identifier();
            let err = self.invalid_number(start);
            self.pos = end;
            return Err(err);
        }

        let src = self.src;
        let text = &src[start..self.pos];
        let digits = &src[digits_start..self.pos];
        if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            || !digits.contains(|c: char| c.is_ascii_digit())
        {
            return Err(self.invalid_number(start));
        }

        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::from(n));
            }
            if let Ok(n) = text.parse::<u64>() {
                return Ok(Value::from(n));
            }
        }
        let f: f64 = text.parse().map_err(|_| self.invalid_number(start))?;
        self.float_number(f, start)
    }

    /// Integral floats inside the safe range fold back to integers.
    fn float_number(&self, f: f64, start: usize) -> Result<Value, LiteralError> {
        if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
            return Ok(Value::from(f as i64));
        }
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| self.invalid_number(start))
    }

    /// Error for the number token spanning `start..self.pos`.
    fn invalid_number(&self, start: usize) -> LiteralError {
        let text = self.src[start..self.pos].to_string();
        self.error_at(start, LiteralErrorKind::InvalidNumber(text))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

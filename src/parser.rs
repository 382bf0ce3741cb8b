//! Sequential text → [`Document`] parser.
//!
//! This is the first step of every decode and runs on the calling thread: the
//! decoder's tasks receive already-parsed sub-documents, never raw substrings.
//!
//! The grammar is the subset of JSON the encoder produces, plus `true`,
//! `false`, `null` and fractional numbers:
//!
//! - Strings run verbatim up to the next `"`. No escape sequences are
//!   interpreted, mirroring the encoder which embeds strings unescaped.
//! - Duplicate keys inside one object are rejected.
//! - Nesting deeper than [`MAX_DEPTH`] is rejected.
//! - Anything but whitespace after the root value is rejected.

use crate::document::{Document, Number, Object};
use crate::error::{ParjsonError, Result};

/// Maximum nesting depth of arrays and objects.
pub const MAX_DEPTH: usize = 128;

/// Parses `text` into a document whose root must be an object.
pub fn parse_object(text: &str) -> Result<Object> {
    let mut parser = Parser::new(text);
    parser.skip_whitespace();
    if parser.peek() != Some(b'{') {
        return Err(parser.error("a document must begin with '{'"));
    }
    let root = parser.parse_object(0)?;
    parser.finish()?;
    Ok(root)
}

/// Parses `text` into a document of any kind.
pub fn parse(text: &str) -> Result<Document> {
    let mut parser = Parser::new(text);
    let value = parser.parse_value(0)?;
    parser.finish()?;
    Ok(value)
}

struct Parser<'t> {
    text: &'t str,
    bytes: &'t [u8],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> ParjsonError {
        ParjsonError::parse(self.pos, message)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", char::from(byte))))
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing characters"))
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Document> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.parse_object(depth).map(Document::Object),
            Some(b'[') => self.parse_array(depth).map(Document::Array),
            Some(b'"') => self.parse_string().map(Document::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number().map(Document::Number),
            Some(b't') => self.parse_literal("true", Document::Bool(true)),
            Some(b'f') => self.parse_literal("false", Document::Bool(false)),
            Some(b'n') => self.parse_literal("null", Document::Null),
            Some(other) => Err(self.error(format!(
                "unexpected character '{}'",
                char::from(other)
            ))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        if depth >= MAX_DEPTH {
            Err(self.error(format!("nesting deeper than {MAX_DEPTH} levels")))
        } else {
            Ok(depth + 1)
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Object> {
        let depth = self.enter(depth)?;
        self.expect(b'{')?;
        let mut members = Object::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(members);
        }

        loop {
            self.skip_whitespace();
            let key_offset = self.pos;
            if self.peek() != Some(b'"') {
                return Err(self.error("expected a string key"));
            }
            let key = self.parse_string()?;
            self.expect(b':')?;
            let value = self.parse_value(depth)?;

            if members.contains_key(&key) {
                return Err(ParjsonError::parse(
                    key_offset,
                    format!("duplicate key \"{key}\""),
                ));
            }
            members.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(members);
                }
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Vec<Document>> {
        let depth = self.enter(depth)?;
        self.expect(b'[')?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(items);
        }

        loop {
            items.push(self.parse_value(depth)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(items);
                }
                _ => return Err(self.error("expected ',' or ']'")),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        // Caller has checked the opening quote.
        let start = self.pos + 1;
        let len = self
            .bytes
            .get(start..)
            .and_then(|rest| rest.iter().position(|&b| b == b'"'))
            .ok_or_else(|| self.error("unterminated string"))?;
        let end = start + len;

        // Both ends sit next to an ASCII quote, so they are char boundaries.
        let value = self
            .text
            .get(start..end)
            .ok_or_else(|| self.error("string is not valid UTF-8"))?
            .to_owned();
        self.pos = end + 1;
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Number> {
        let start = self.pos;
        let mut integral = true;

        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.digits()?;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            self.digits()?;
        }
        if let Some(b'e' | b'E') = self.peek() {
            integral = false;
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            self.digits()?;
        }

        let literal = self
            .text
            .get(start..self.pos)
            .ok_or_else(|| self.error("invalid number"))?;

        if integral {
            if let Ok(n) = literal.parse::<i64>() {
                return Ok(Number::Integer(n));
            }
        }
        literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|e| ParjsonError::parse(start, format!("invalid number {literal:?}: {e}")))
    }

    fn digits(&mut self) -> Result<()> {
        let start = self.pos;
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
        if self.pos == start {
            Err(self.error("expected a digit"))
        } else {
            Ok(())
        }
    }

    fn parse_literal(&mut self, word: &str, value: Document) -> Result<Document> {
        let end = self.pos + word.len();
        if self.bytes.get(self.pos..end) == Some(word.as_bytes()) {
            self.pos = end;
            Ok(value)
        } else {
            Err(self.error(format!("expected '{word}'")))
        }
    }
}

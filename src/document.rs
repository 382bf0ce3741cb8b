//! The generic, randomly-addressable value produced by the parser.
//!
//! A [`Document`] is built once per decode call, read by the decoder and then
//! dropped. It is never shared between decode calls. The typed accessors at
//! the bottom of this module turn lookups into [`ParjsonError::Schema`]
//! failures that name the offending key.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ParjsonError, Result};

/// Keyed members of a JSON object.
pub type Object = HashMap<String, Document>;

/// A numeric literal.
///
/// Integer literals (no fraction, no exponent) that fit in `i64` are kept
/// exact; everything else is stored as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer literal.
    Integer(i64),
    /// A literal with a fraction or exponent, or an integer too large for `i64`.
    Float(f64),
}

/// A parsed JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// A numeric literal.
    Number(Number),
    /// A string, taken verbatim from the input.
    String(String),
    /// An ordered sequence.
    Array(Vec<Document>),
    /// A keyed mapping.
    Object(Object),
}

impl Document {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(Number::Integer(_)) => "integer",
            Self::Number(Number::Float(_)) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Keyed lookup. Returns `None` for missing keys and for non-objects.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Indexed lookup. Returns `None` when out of bounds and for non-arrays.
    pub fn at(&self, index: usize) -> Option<&Self> {
        match self {
            Self::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Number of members of an object or elements of an array; 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Self::Array(items) => items.len(),
            Self::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// True if [`Document::len`] is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer literal.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(Number::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    /// Any numeric payload as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Number(Number::Integer(n)) => Some(*n as f64),
            Self::Number(Number::Float(n)) => Some(*n),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The members, if this is an object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

// --- TYPED EXTRACTION ---

/// Looks up a key that must be present.
pub fn required<'d>(object: &'d Object, key: &str) -> Result<&'d Document> {
    object
        .get(key)
        .ok_or_else(|| ParjsonError::Schema(format!("missing required key \"{key}\"")))
}

/// Extracts a string member.
pub fn string_field(object: &Object, key: &str) -> Result<String> {
    let value = required(object, key)?;
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| mistyped(key, "string", value))
}

/// Extracts an integer member that must fit in `i32`.
pub fn i32_field(object: &Object, key: &str) -> Result<i32> {
    let value = required(object, key)?;
    let wide = value
        .as_i64()
        .ok_or_else(|| mistyped(key, "integer", value))?;
    i32::try_from(wide).map_err(|_| {
        ParjsonError::Schema(format!("key \"{key}\" holds {wide}, out of 32-bit range"))
    })
}

/// Removes an object member, checking that it is present and is an object.
pub fn take_object(object: &mut Object, key: &str) -> Result<Object> {
    match object.remove(key) {
        Some(Document::Object(inner)) => Ok(inner),
        Some(other) => Err(mistyped(key, "object", &other)),
        None => Err(ParjsonError::Schema(format!("missing required key \"{key}\""))),
    }
}

/// Removes an array member, checking that it is present and is an array.
pub fn take_array(object: &mut Object, key: &str) -> Result<Vec<Document>> {
    match object.remove(key) {
        Some(Document::Array(items)) => Ok(items),
        Some(other) => Err(mistyped(key, "array", &other)),
        None => Err(ParjsonError::Schema(format!("missing required key \"{key}\""))),
    }
}

fn mistyped(key: &str, expected: &str, found: &Document) -> ParjsonError {
    ParjsonError::Schema(format!(
        "key \"{key}\" must be {expected}, found {}",
        found.kind()
    ))
}

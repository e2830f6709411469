//! Reply normalization.
//!
//! The workflow does not commit to one response shape. It may answer with an object or a
//! one-element array of objects, and the text may sit under one of several field names.
//! [`normalize_reply`] resolves all of that with a fixed decision procedure.

use serde_json::{Map, Value};

/// Reply fields in priority order. The first populated one wins.
pub const REPLY_FIELDS: [&str; 3] = ["output", "message", "response"];

/// The value a reply is extracted from, after array unwrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Candidate<'a> {
    Object(&'a Map<String, Value>),
    Text(&'a str),
    /// Numbers, booleans, null, nested arrays.
    Other(&'a Value),
    /// The envelope was an empty array.
    Missing,
}

impl<'a> Candidate<'a> {
    /// An array contributes its first element; anything else is its own candidate.
    pub fn from_envelope(envelope: &'a Value) -> Self {
        let value = match envelope {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => return Candidate::Missing,
            },
            other => other,
        };

        match value {
            Value::Object(fields) => Candidate::Object(fields),
            Value::String(text) => Candidate::Text(text),
            other => Candidate::Other(other),
        }
    }

    pub fn reply(&self) -> Option<&'a str> {
        match *self {
            Candidate::Object(fields) => REPLY_FIELDS.iter().find_map(|name| {
                fields
                    .get(*name)
                    .and_then(Value::as_str)
                    .filter(|text| !text.is_empty())
            }),
            Candidate::Text(text) => Some(text),
            Candidate::Other(_) | Candidate::Missing => None,
        }
    }
}

/// Extract the assistant text from a decoded envelope, or `None` if no known shape matches.
pub fn normalize_reply(envelope: &Value) -> Option<&str> {
    Candidate::from_envelope(envelope).reply()
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Message normalization: body mode selection, body encoding and tag merging.

use crate::constants::{JSON_CONTENT_TYPE, TEXT_CONTENT_TYPE};
use crate::serialize::{Mapping, Value};

/// A log payload as handed in by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum LogMessage {
    /// Plain text line.
    Text(String),
    /// Structured payload, always sent as JSON.
    Json(serde_json::Value),
}

impl From<&str> for LogMessage {
    fn from(s: &str) -> Self {
        LogMessage::Text(s.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(s: String) -> Self {
        LogMessage::Text(s)
    }
}

/// A JSON string is a text message; every other JSON value is structured.
impl From<serde_json::Value> for LogMessage {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => LogMessage::Text(text),
            other => LogMessage::Json(other),
        }
    }
}

/// Cyclic slots are sent as the `"<Circular>"` string.
impl From<Value> for LogMessage {
    fn from(value: Value) -> Self {
        LogMessage::from(value.to_json())
    }
}

impl From<Mapping> for LogMessage {
    fn from(mapping: Mapping) -> Self {
        LogMessage::from(Value::Map(mapping))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    Text,
    Json,
}

impl BodyMode {
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            BodyMode::Text => TEXT_CONTENT_TYPE,
            BodyMode::Json => JSON_CONTENT_TYPE,
        }
    }
}

/// Encoded request body and the mode it was encoded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub mode: BodyMode,
    pub content: String,
}

/// Picks the body mode and encodes the payload.
///
/// Structured payloads, and every payload of a client in JSON mode, are JSON
/// encoded. Text payloads of a text-mode client are sent as is.
#[must_use]
pub fn normalize(message: &LogMessage, json_mode: bool) -> Body {
    match message {
        LogMessage::Json(value) => Body {
            mode: BodyMode::Json,
            content: value.to_string(),
        },
        LogMessage::Text(text) if json_mode => Body {
            mode: BodyMode::Json,
            content: serde_json::Value::String(text.clone()).to_string(),
        },
        LogMessage::Text(text) => Body {
            mode: BodyMode::Text,
            content: text.clone(),
        },
    }
}

/// Ordered tags of one message. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    /// Client tags followed by the call tags.
    #[must_use]
    pub fn merge(defaults: &[String], call: Option<&[String]>) -> Self {
        let mut tags = defaults.to_vec();
        if let Some(call) = call {
            tags.extend_from_slice(call);
        }
        TagSet(tags)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined tags, or `None` when there are no tags and the header
    /// must be left out.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(","))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TagSet(iter.into_iter().map(Into::into).collect())
    }
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors produced while configuring a client or delivering a log message.
///
/// Payloads are plain strings and status codes so a terminal error can be
/// handed to every listener of a [`crate::reporter::LogHandle`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogglyError {
    /// The client configuration is unusable (for example a missing token).
    /// Raised at construction time, before any request is issued.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Connection refused, DNS failure, timeout and other network-level errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The intake answered with a status outside the 2xx range.
    #[error("Server error: status {status}: {body}")]
    Server { status: u16, body: String },

    /// A success response whose body is not the expected JSON document.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl LogglyError {
    /// Transport and server errors are retried until the attempt budget runs
    /// out; configuration and decode errors are surfaced immediately.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Server { .. })
    }

    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LogglyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The client callers log through.
//!
//! ```no_run
//! # async fn run() -> Result<(), loggly::LogglyError> {
//! use loggly::{create_client, ClientConfig};
//!
//! let client = create_client(ClientConfig::new("TOKEN").with_tags(["web"]))?;
//!
//! // Await the outcome.
//! let _response = client.log("hello").tags(["t1"]).send().await?;
//!
//! // Or get it through a callback...
//! client.log("hello").callback(|outcome| println!("{outcome:?}"));
//!
//! // ...or through events.
//! client
//!     .log(serde_json::json!({"user": "ada"}))
//!     .emit()
//!     .on_log(|response| println!("sent: {response}"))
//!     .on_error(|e| eprintln!("failed: {e}"));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::config::ClientConfig;
use crate::delivery::{Delivery, DeliveryEngine, DeliveryOutcome};
use crate::error::LogglyError;
use crate::message::{normalize, LogMessage, TagSet};
use crate::reporter::{report, CallbackSink, CompletionSink, LogHandle};
use crate::request::{build, RequestSpec};
use crate::transport::{ReqwestTransport, Transport};

/// Creates a client for `config`, failing fast on an invalid configuration.
pub fn create_client(config: ClientConfig) -> Result<Client, LogglyError> {
    Client::new(config)
}

/// Ships log messages to one input. Cheap to clone; clones share the
/// configuration and the HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    engine: DeliveryEngine,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self, LogglyError> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout));
        Self::with_transport(config, transport)
    }

    /// Creates a client sending through `transport` instead of HTTP.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, LogglyError> {
        config.validate()?;
        let engine = DeliveryEngine::new(transport, config.retry);
        Ok(Client {
            config: Arc::new(config),
            engine,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts a log call. Nothing is sent until one of [`LogRequest::send`],
    /// [`LogRequest::callback`] or [`LogRequest::emit`] is called.
    pub fn log(&self, message: impl Into<LogMessage>) -> LogRequest {
        LogRequest {
            client: self.clone(),
            message: message.into(),
            tags: None,
        }
    }
}

/// One pending `log` call.
#[must_use = "a log request does nothing until it is sent"]
pub struct LogRequest {
    client: Client,
    message: LogMessage,
    tags: Option<Vec<String>>,
}

impl LogRequest {
    /// Tags for this message only, sent after the client tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    fn prepare(&self) -> Result<RequestSpec, LogglyError> {
        let config = &self.client.config;
        let body = normalize(&self.message, config.json);
        let tags = TagSet::merge(&config.tags, self.tags.as_deref());
        build(config, &config.token, body, &tags)
    }

    /// Sends the message and returns the outcome with the attempt count.
    pub async fn deliver(self) -> Delivery {
        let request = match self.prepare() {
            Ok(request) => request,
            Err(e) => {
                return Delivery {
                    outcome: Err(e),
                    attempts: 0,
                }
            }
        };
        debug!(
            "LOGGLY | Sending {} byte {} message",
            request.body.len(),
            match self.message {
                LogMessage::Text(_) if !self.client.config.json => "text",
                _ => "JSON",
            }
        );
        let delivery = self.client.engine.deliver(&request).await;
        debug!("LOGGLY | Delivery finished after {} attempt(s)", delivery.attempts);
        delivery
    }

    pub async fn send(self) -> DeliveryOutcome {
        self.deliver().await.outcome
    }

    /// Sends the message in the background and calls `callback` once with
    /// the outcome.
    pub fn callback<F>(self, callback: F)
    where
        F: FnOnce(DeliveryOutcome) + Send + 'static,
    {
        self.dispatch(Box::new(CallbackSink::new(callback)));
    }

    /// Sends the message in the background and returns a handle emitting
    /// the outcome.
    pub fn emit(self) -> LogHandle {
        let (handle, sink) = LogHandle::channel();
        self.dispatch(Box::new(sink));
        handle
    }

    fn dispatch(self, sink: Box<dyn CompletionSink>) {
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    let outcome = self.send().await;
                    report(sink, outcome);
                });
            }
            Err(e) => report(
                sink,
                Err(LogglyError::Config(format!(
                    "background delivery requires a tokio runtime: {e}"
                ))),
            ),
        }
    }
}

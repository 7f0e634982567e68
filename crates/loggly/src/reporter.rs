// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Result reporting.
//!
//! The delivery task hands its single [`DeliveryOutcome`] to a
//! [`CompletionSink`] without knowing how the caller wants it. Two sinks
//! exist: [`CallbackSink`] calls a function once, [`EventSink`] emits one
//! terminal event on the [`LogHandle`] it was created with.

use std::mem;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::debug;

use crate::delivery::DeliveryOutcome;
use crate::error::LogglyError;

/// Receives the outcome of one delivery.
pub trait CompletionSink: Send + 'static {
    fn complete(self: Box<Self>, outcome: DeliveryOutcome);
}

/// Hands `outcome` to `sink`.
pub fn report(sink: Box<dyn CompletionSink>, outcome: DeliveryOutcome) {
    match &outcome {
        Ok(_) => debug!("LOGGLY | Message delivered"),
        Err(e) => debug!("LOGGLY | Reporting delivery failure: {e}"),
    }
    sink.complete(outcome);
}

pub struct CallbackSink<F>(F);

impl<F> CallbackSink<F>
where
    F: FnOnce(DeliveryOutcome) + Send + 'static,
{
    pub fn new(callback: F) -> Self {
        CallbackSink(callback)
    }
}

impl<F> CompletionSink for CallbackSink<F>
where
    F: FnOnce(DeliveryOutcome) + Send + 'static,
{
    fn complete(self: Box<Self>, outcome: DeliveryOutcome) {
        (self.0)(outcome);
    }
}

/// Terminal event of a [`LogHandle`].
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    /// The intake accepted the message; carries its response.
    Log(serde_json::Value),
    Error(LogglyError),
}

impl LogEvent {
    /// `"log"` or `"error"`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LogEvent::Log(_) => "log",
            LogEvent::Error(_) => "error",
        }
    }
}

impl From<DeliveryOutcome> for LogEvent {
    fn from(outcome: DeliveryOutcome) -> Self {
        match outcome {
            Ok(body) => LogEvent::Log(body),
            Err(e) => LogEvent::Error(e),
        }
    }
}

type LogListener = Box<dyn FnOnce(serde_json::Value) + Send>;
type ErrorListener = Box<dyn FnOnce(LogglyError) + Send>;

#[derive(Default)]
struct Listeners {
    on_log: Vec<LogListener>,
    on_error: Vec<ErrorListener>,
    emitted: Option<DeliveryOutcome>,
}

struct Shared {
    listeners: Mutex<Listeners>,
    outcome: watch::Sender<Option<DeliveryOutcome>>,
}

impl Shared {
    fn emit(&self, outcome: DeliveryOutcome) {
        let (on_log, on_error) = {
            let mut listeners = self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if listeners.emitted.is_some() {
                return;
            }
            listeners.emitted = Some(outcome.clone());
            (
                mem::take(&mut listeners.on_log),
                mem::take(&mut listeners.on_error),
            )
        };
        self.outcome.send_replace(Some(outcome.clone()));

        match outcome {
            Ok(body) => on_log.into_iter().for_each(|listener| listener(body.clone())),
            Err(e) => on_error.into_iter().for_each(|listener| listener(e.clone())),
        }
    }
}

/// Event-capable handle returned before delivery completes.
///
/// Exactly one of `log` or `error` is emitted. Listeners registered after
/// that run immediately with the stored outcome; listeners of the event that
/// did not happen are dropped.
#[derive(Clone)]
pub struct LogHandle {
    shared: Arc<Shared>,
}

impl LogHandle {
    /// Creates a handle and the sink that completes it.
    #[must_use]
    pub fn channel() -> (LogHandle, EventSink) {
        let (outcome, _) = watch::channel(None);
        let shared = Arc::new(Shared {
            listeners: Mutex::new(Listeners::default()),
            outcome,
        });
        (
            LogHandle {
                shared: Arc::clone(&shared),
            },
            EventSink { shared },
        )
    }

    /// Subscribes to the `log` event.
    pub fn on_log<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(serde_json::Value) + Send + 'static,
    {
        let mut listeners = self.lock();
        match &listeners.emitted {
            Some(Ok(body)) => {
                let body = body.clone();
                drop(listeners);
                listener(body);
            }
            Some(Err(_)) => {}
            None => listeners.on_log.push(Box::new(listener)),
        }
        self
    }

    /// Subscribes to the `error` event.
    pub fn on_error<F>(&self, listener: F) -> &Self
    where
        F: FnOnce(LogglyError) + Send + 'static,
    {
        let mut listeners = self.lock();
        match &listeners.emitted {
            Some(Err(e)) => {
                let e = e.clone();
                drop(listeners);
                listener(e);
            }
            Some(Ok(_)) => {}
            None => listeners.on_error.push(Box::new(listener)),
        }
        self
    }

    /// The emitted event, if delivery has completed.
    #[must_use]
    pub fn event(&self) -> Option<LogEvent> {
        self.lock().emitted.clone().map(LogEvent::from)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.lock().emitted.is_some()
    }

    /// Waits for delivery to complete.
    pub async fn outcome(&self) -> DeliveryOutcome {
        let mut receiver = self.shared.outcome.subscribe();
        let outcome = receiver
            .wait_for(Option::is_some)
            .await
            .map(|outcome| (*outcome).clone());
        match outcome {
            Ok(Some(outcome)) => outcome,
            _ => Err(abandoned()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Listeners> {
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// [`CompletionSink`] emitting on a [`LogHandle`].
///
/// Dropping it without completing, as happens when the delivery task is
/// cancelled by a runtime shutdown, emits an `error` event.
pub struct EventSink {
    shared: Arc<Shared>,
}

impl CompletionSink for EventSink {
    fn complete(self: Box<Self>, outcome: DeliveryOutcome) {
        self.shared.emit(outcome);
    }
}

impl Drop for EventSink {
    fn drop(&mut self) {
        self.shared.emit(Err(abandoned()));
    }
}

fn abandoned() -> LogglyError {
    LogglyError::Transport("delivery ended without an outcome".to_string())
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! # Loggly
//!
//! Client library shipping log messages to a Loggly HTTP input, one message
//! per request.
//!
//! ## Pipeline
//!
//! ```text
//!   Client::log ─▶ normalize ─▶ request::build ─▶ DeliveryEngine ─▶ reporter
//!                  (text/JSON,   (URL, headers,    (retry/backoff)   (send, callback
//!                   tags)         proxy)                              or events)
//! ```
//!
//! - [`message`]: body mode selection and tag merging
//! - [`request`]: the intake request, `https://<host>/inputs/<token>`
//! - [`delivery`]: attempts, classification and the [`RetryStrategy`]
//! - [`reporter`]: callback and event delivery of the outcome
//! - [`serialize`]: cycle-safe `key=value` rendering and deep copies of
//!   value graphs
//!
//! Every `log` call yields exactly one [`DeliveryOutcome`].

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod client;
pub mod config;
pub mod constants;
pub mod delivery;
pub mod error;
pub mod http;
pub mod message;
pub mod reporter;
pub mod request;
pub mod serialize;
pub mod transport;

pub use client::{create_client, Client, LogRequest};
pub use config::{ClientConfig, ProxyAuth, ProxyConfig};
pub use delivery::{Delivery, DeliveryEngine, DeliveryOutcome, RetryStrategy};
pub use error::LogglyError;
pub use message::{LogMessage, TagSet};
pub use reporter::{LogEvent, LogHandle};
pub use serialize::{deep_clone, serialize, Mapping, Value};
pub use transport::{ReqwestTransport, Transport, TransportResponse};

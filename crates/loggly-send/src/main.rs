// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! Ships one message to a Loggly input.
//!
//! ```text
//! LOGGLY_TOKEN=... loggly-send [--tag <tag>]... <message>...
//! ```
//!
//! The message words are joined with spaces. A message that parses as a JSON
//! object or array is sent as JSON. Configuration comes from the `LOGGLY_*`
//! variables read by `ClientConfig::from_env`; `LOGGLY_LOG_LEVEL` sets the
//! log level.

use std::{env, process};

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use loggly::{create_client, ClientConfig, LogMessage};

#[derive(Debug, Default, PartialEq)]
struct Args {
    tags: Vec<String>,
    message: String,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut words = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--tag" {
            let Some(tag) = args.next() else {
                return Err("--tag requires a value".to_string());
            };
            parsed.tags.push(tag);
        } else {
            words.push(arg);
        }
    }
    if words.is_empty() {
        return Err("usage: loggly-send [--tag <tag>]... <message>...".to_string());
    }
    parsed.message = words.join(" ");
    Ok(parsed)
}

fn to_message(text: String) -> LogMessage {
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(value) if value.is_object() || value.is_array() => LogMessage::Json(value),
        _ => LogMessage::Text(text),
    }
}

#[tokio::main]
pub async fn main() {
    let log_level = env::var("LOGGLY_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("h2=off,hyper=off,rustls=off,reqwest=off,{log_level}");

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_new(env_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {e}");
    }

    debug!("Logging subsystem enabled");

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            error!("{e}");
            process::exit(2);
        }
    };

    let client = match ClientConfig::from_env().and_then(create_client) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create Loggly client: {e}");
            process::exit(2);
        }
    };

    let mut request = client.log(to_message(args.message));
    if !args.tags.is_empty() {
        request = request.tags(args.tags);
    }
    let delivery = request.deliver().await;

    match delivery.outcome {
        Ok(response) => info!(
            "Message delivered after {} attempt(s): {response}",
            delivery.attempts
        ),
        Err(e) => {
            error!("Message not delivered: {e}");
            process::exit(1);
        }
    }
}

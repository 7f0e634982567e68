// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{ok, refused, status, MockTransport};
use loggly::constants::TAG_HEADER;
use loggly::{Client, ClientConfig, LogEvent, LogglyError, Mapping, ProxyConfig, RetryStrategy};
use reqwest::header::CONTENT_TYPE;
use serde_json::json;
use tokio::sync::oneshot;

fn config() -> ClientConfig {
    ClientConfig::new("TOK")
        .with_subdomain("sub")
        .with_tags(["global"])
}

#[tokio::test]
async fn log_with_tags_and_callback() {
    let transport = MockTransport::always(ok(r#"{"response":"ok"}"#));
    let client = Client::with_transport(config(), transport.clone()).unwrap();
    let (tx, rx) = oneshot::channel();

    client
        .log("hello")
        .tags(["t1"])
        .callback(move |outcome| tx.send(outcome).unwrap());

    assert_eq!(rx.await.unwrap(), Ok(json!({"response": "ok"})));
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.as_str(),
        "https://logs-01.loggly.com/inputs/TOK"
    );
    assert_eq!(requests[0].headers.get(TAG_HEADER).unwrap(), "global,t1");
    assert_eq!(requests[0].body, "hello");
}

#[tokio::test]
async fn json_mode_encodes_objects() {
    let transport = MockTransport::always(ok(r#"{"response":"ok"}"#));
    let client = Client::with_transport(config().with_json(true), transport.clone()).unwrap();

    let outcome = client.log(json!({"a": 1})).send().await;

    assert!(outcome.is_ok());
    let request = &transport.requests()[0];
    assert_eq!(request.body, r#"{"a":1}"#);
    assert_eq!(
        request.headers.get(CONTENT_TYPE).unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn structured_message_in_text_mode_is_json() {
    let transport = MockTransport::always(ok(r#"{"response":"ok"}"#));
    let client = Client::with_transport(ClientConfig::new("TOK"), transport.clone()).unwrap();

    client.log(json!({"hi": "all"})).send().await.unwrap();

    let request = &transport.requests()[0];
    assert_eq!(request.body, r#"{"hi":"all"}"#);
    assert!(request.headers.get(TAG_HEADER).is_none());
}

#[tokio::test]
async fn cyclic_mapping_is_sent_with_marker() {
    let transport = MockTransport::always(ok(r#"{"response":"ok"}"#));
    let client = Client::with_transport(ClientConfig::new("TOK"), transport.clone()).unwrap();

    let outcome = {
        let message = Mapping::new();
        message.insert("name", "cyclical");
        message.insert("cycle", message.clone());
        let request = client.log(message.clone());
        message.remove("cycle");
        request
    }
    .send()
    .await;

    assert!(outcome.is_ok());
    assert_eq!(
        transport.requests()[0].body,
        r#"{"name":"cyclical","cycle":"<Circular>"}"#
    );
}

#[tokio::test]
async fn proxy_is_explicit() {
    let transport = MockTransport::always(ok(r#"{"response":"ok"}"#));
    let client = Client::with_transport(config(), transport.clone()).unwrap();
    client.log("direct").send().await.unwrap();

    let proxy = ProxyConfig::new("proxy.local", 3128).with_auth("user", "secret");
    let proxied =
        Client::with_transport(config().with_proxy(proxy.clone()), transport.clone()).unwrap();
    proxied.log("proxied").send().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].proxy, None);
    assert_eq!(requests[1].proxy, Some(proxy));
}

#[tokio::test(start_paused = true)]
async fn retries_until_exhausted_then_reports_once() {
    let transport = MockTransport::always(status(503));
    let client = Client::with_transport(config(), transport.clone()).unwrap();
    let invocations = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = oneshot::channel();

    {
        let invocations = invocations.clone();
        let transport = transport.clone();
        client.log("hello").callback(move |outcome| {
            invocations.fetch_add(1, Ordering::SeqCst);
            // Nothing is reported before the last attempt.
            tx.send((transport.calls(), outcome)).unwrap();
        });
    }

    let (calls_at_report, outcome) = rx.await.unwrap();
    assert_eq!(calls_at_report, 5);
    assert!(matches!(
        outcome,
        Err(LogglyError::Server { status: 503, .. })
    ));
    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    assert_eq!(transport.calls(), 5);
    assert_eq!(invocations.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_are_invisible_on_success() {
    let transport = MockTransport::new(vec![
        refused(),
        status(500),
        ok(r#"{"response":"ok"}"#),
    ]);
    let client = Client::with_transport(config(), transport.clone()).unwrap();

    let handle = client.log("hello").emit();

    assert_eq!(handle.outcome().await, Ok(json!({"response": "ok"})));
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn decode_error_is_terminal() {
    let transport = MockTransport::always(ok("not json"));
    let client = Client::with_transport(config(), transport.clone()).unwrap();
    let (tx, rx) = oneshot::channel();

    let handle = client.log("hello").emit();
    handle.on_error(move |e| tx.send(e).unwrap());

    assert!(matches!(rx.await.unwrap(), LogglyError::Decode(_)));
    assert_eq!(transport.calls(), 1);
    assert!(matches!(handle.event(), Some(LogEvent::Error(_))));
}

#[tokio::test]
async fn custom_attempt_budget() {
    let transport = MockTransport::always(refused());
    let client = Client::with_transport(
        config().with_retry(RetryStrategy::Immediate(2)),
        transport.clone(),
    )
    .unwrap();

    let delivery = client.log("hello").deliver().await;

    assert_eq!(delivery.attempts, 2);
    assert_eq!(transport.calls(), 2);
    assert_eq!(
        delivery.outcome,
        Err(LogglyError::Transport("connection refused".to_string()))
    );
}

#[test]
fn invalid_config_never_reaches_transport() {
    let transport = MockTransport::always(ok(r#"{"response":"ok"}"#));
    let result = Client::with_transport(ClientConfig::new(""), transport.clone());
    assert!(matches!(result, Err(LogglyError::Config(_))));
    assert_eq!(transport.calls(), 0);
}

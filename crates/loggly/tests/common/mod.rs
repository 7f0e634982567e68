// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use loggly::request::RequestSpec;
use loggly::{LogglyError, Transport, TransportResponse};

pub type Scripted = Result<TransportResponse, LogglyError>;

/// Records every request and answers from a script, repeating its last entry.
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl MockTransport {
    pub fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(MockTransport {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn always(response: Scripted) -> Arc<Self> {
        Self::new(vec![response])
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RequestSpec) -> Result<TransportResponse, LogglyError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().expect("empty transport script")
        }
    }
}

pub fn ok(body: &str) -> Scripted {
    Ok(TransportResponse {
        status: 200,
        body: Bytes::from(body.to_string()),
    })
}

pub fn status(code: u16) -> Scripted {
    Ok(TransportResponse {
        status: code,
        body: Bytes::from_static(b"error"),
    })
}

pub fn refused() -> Scripted {
    Err(LogglyError::Transport("connection refused".to_string()))
}

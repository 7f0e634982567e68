// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The HTTP collaborator used by the delivery engine.
//!
//! The engine only sees the [`Transport`] trait: issue a request, get a
//! status and a body back, or a network-level failure. [`ReqwestTransport`]
//! is the production implementation; tests plug in their own.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::config::ProxyConfig;
use crate::error::LogglyError;
use crate::http::build_client;
use crate::request::RequestSpec;

/// Raw answer of the intake, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues `request` once. Non-2xx statuses are returned as responses;
    /// only network-level failures are errors.
    async fn send(&self, request: &RequestSpec) -> Result<TransportResponse, LogglyError>;
}

/// [`Transport`] backed by pooled reqwest clients, one per proxy setting.
#[derive(Debug)]
pub struct ReqwestTransport {
    timeout: Duration,
    clients: Mutex<HashMap<Option<ProxyConfig>, reqwest::Client>>,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        ReqwestTransport {
            timeout,
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn client_for(&self, proxy: Option<&ProxyConfig>) -> Result<reqwest::Client, LogglyError> {
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);
        let key = proxy.cloned();
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }
        let client = build_client(proxy, self.timeout)?;
        debug!(
            "LOGGLY | Created HTTP client (proxy: {})",
            proxy.map_or_else(|| "none".to_string(), ProxyConfig::url)
        );
        clients.insert(key, client.clone());
        Ok(client)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestSpec) -> Result<TransportResponse, LogglyError> {
        let client = self.client_for(request.proxy.as_ref())?;
        let response = client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout)
            .body(request.body.clone())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(TransportResponse { status, body })
    }
}

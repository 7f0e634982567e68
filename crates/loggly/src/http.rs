// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! reqwest client construction.
//!
//! Clients keep pooled connections alive between messages:
//! - **Timeout**: default per-request timeout, overridden per request
//! - **Connection pooling**: 270s idle timeout and 120s TCP keep-alive
//! - **Proxy**: the configured proxy for every scheme, or none at all. A
//!   client built without a proxy never falls back to `HTTPS_PROXY` and
//!   friends from the environment.

use core::time::Duration;

use crate::config::ProxyConfig;
use crate::error::LogglyError;

/// Builds a pooled HTTP client routed through `proxy`, or direct when `None`.
pub fn build_client(
    proxy: Option<&ProxyConfig>,
    timeout: Duration,
) -> Result<reqwest::Client, LogglyError> {
    let builder = reqwest::Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(270)))
        .tcp_keepalive(Some(Duration::from_secs(120)));

    let builder = match proxy {
        Some(proxy_config) => {
            let mut proxy = reqwest::Proxy::all(proxy_config.url())?;
            if let Some(auth) = &proxy_config.auth {
                proxy = proxy.basic_auth(&auth.username, &auth.password);
            }
            builder.proxy(proxy)
        }
        None => builder.no_proxy(),
    };

    Ok(builder.build()?)
}

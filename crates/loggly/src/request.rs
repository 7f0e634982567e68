// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Construction of the intake request. No I/O happens here.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};

use crate::config::{ClientConfig, ProxyConfig};
use crate::constants::{INPUTS_SEGMENT, TAG_HEADER};
use crate::error::LogglyError;
use crate::message::{Body, TagSet};

/// Everything needed to issue one intake request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: String,
    /// Always set by [`build`]; `None` is an explicit "no proxy".
    pub proxy: Option<ProxyConfig>,
    pub timeout: Duration,
}

/// Intake URL of `token`: `https://<host>/inputs/<token>`.
///
/// The token is one percent-encoded path segment, so `/`, `?` and `#` in it
/// never change the path, query or fragment.
pub fn input_url(config: &ClientConfig, token: &str) -> Result<Url, LogglyError> {
    let base = config.intake_base_url();
    let mut url = Url::parse(&base)
        .map_err(|e| LogglyError::Config(format!("invalid intake url '{base}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| LogglyError::Config(format!("intake url '{base}' cannot have a path")))?
        .pop_if_empty()
        .push(INPUTS_SEGMENT)
        .push(token);
    Ok(url)
}

/// Builds the POST request shipping `body` to the input identified by `token`.
///
/// The tag header is only present when `tags` is not empty.
pub fn build(
    config: &ClientConfig,
    token: &str,
    body: Body,
    tags: &TagSet,
) -> Result<RequestSpec, LogglyError> {
    let url = input_url(config, token)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static(body.mode.content_type()),
    );
    if let Some(value) = tags.header_value() {
        let value = HeaderValue::from_str(&value)
            .map_err(|e| LogglyError::Config(format!("invalid tags '{value}': {e}")))?;
        headers.insert(HeaderName::from_static(TAG_HEADER), value);
    }

    Ok(RequestSpec {
        method: Method::POST,
        url,
        headers,
        body: body.content,
        proxy: config.proxy.clone(),
        timeout: config.timeout,
    })
}

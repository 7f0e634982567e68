// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Client configuration.
//!
//! A [`ClientConfig`] is built once, validated, and then shared read-only by
//! every delivery made through the client that owns it. It can be assembled
//! in code with the `with_*` setters, deserialized with serde, or read from
//! `LOGGLY_*` environment variables.
//!
//! # Environment variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LOGGLY_TOKEN` | `token` (required) |
//! | `LOGGLY_SUBDOMAIN` | `subdomain` |
//! | `LOGGLY_HOST` | `host` |
//! | `LOGGLY_JSON` | `json` (`true`/`1`) |
//! | `LOGGLY_TAGS` | `tags`, comma separated |
//! | `LOGGLY_PROXY` | `proxy`, `[protocol://][user:pass@]host:port` |
//! | `LOGGLY_MAX_ATTEMPTS` | attempt budget of `retry` |
//! | `LOGGLY_TIMEOUT_SECS` | `timeout` |

use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{DEFAULT_HOST, DEFAULT_TIMEOUT};
use crate::delivery::RetryStrategy;
use crate::error::LogglyError;

/// Credentials presented to an authenticating proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ProxyAuth {
    pub username: String,
    pub password: String,
}

/// Forward proxy used for every request of a client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_proxy_protocol")]
    pub protocol: String,
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub auth: Option<ProxyAuth>,
}

fn default_proxy_protocol() -> String {
    "http".to_string()
}

impl ProxyConfig {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol: default_proxy_protocol(),
            host: host.into(),
            port,
            auth: None,
        }
    }

    #[must_use]
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(ProxyAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Proxy URL without credentials, e.g. `http://proxy.local:3128`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    /// Parses `[protocol://][user:pass@]host:port`.
    pub fn parse(value: &str) -> Result<Self, LogglyError> {
        let value = value.trim();
        let (protocol, rest) = match value.split_once("://") {
            Some((protocol, rest)) => (protocol.to_string(), rest),
            None => (default_proxy_protocol(), value),
        };
        let (auth, address) = match rest.rsplit_once('@') {
            Some((credentials, address)) => {
                let (username, password) = credentials.split_once(':').unwrap_or((credentials, ""));
                (
                    Some(ProxyAuth {
                        username: username.to_string(),
                        password: password.to_string(),
                    }),
                    address,
                )
            }
            None => (None, rest),
        };
        let address = address.trim_end_matches('/');
        let Some((host, port)) = address.rsplit_once(':') else {
            return Err(LogglyError::Config(format!(
                "proxy '{value}' must be of the form host:port"
            )));
        };
        if host.is_empty() {
            return Err(LogglyError::Config(format!("proxy '{value}' has no host")));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| LogglyError::Config(format!("proxy '{value}' has an invalid port")))?;
        Ok(Self {
            protocol,
            host: host.to_string(),
            port,
            auth,
        })
    }
}

/// Configuration shared by every call made through a [`crate::Client`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Input token; identifies the input the messages are sent to.
    pub token: String,
    /// Account subdomain. Informational only, host selection ignores it.
    #[serde(default)]
    pub subdomain: Option<String>,
    /// Intake host; defaults to `logs-01.loggly.com`.
    #[serde(default)]
    pub host: Option<String>,
    /// Encode every message as JSON, strings included.
    #[serde(default)]
    pub json: bool,
    /// Tags attached to every message, ahead of per-call tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// `None` means "explicitly no proxy": proxy environment variables are ignored.
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    #[serde(default)]
    pub retry: RetryStrategy,
    /// Per-attempt request timeout.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    /// Replaces `https://<host>` (scheme and authority) when set, e.g. for an
    /// intake relay or a local test server.
    #[serde(default)]
    pub intake_url_override: Option<String>,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            subdomain: None,
            host: None,
            json: false,
            tags: Vec::new(),
            proxy: None,
            retry: RetryStrategy::default(),
            timeout: DEFAULT_TIMEOUT,
            intake_url_override: None,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = Some(subdomain.into());
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryStrategy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_intake_url_override(mut self, url: impl Into<String>) -> Self {
        self.intake_url_override = Some(url.into());
        self
    }

    /// The host requests are sent to. An explicit `host` wins, otherwise the
    /// shared intake host is used whatever the subdomain.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Scheme and authority that `/inputs/<token>` is appended to.
    #[must_use]
    pub fn intake_base_url(&self) -> String {
        match &self.intake_url_override {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host()),
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, LogglyError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LogglyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("LOGGLY_TOKEN").unwrap_or_default();
        let subdomain = lookup("LOGGLY_SUBDOMAIN").filter(|val| !val.trim().is_empty());
        let host = lookup("LOGGLY_HOST").filter(|val| !val.trim().is_empty());
        let json = lookup("LOGGLY_JSON")
            .map(|val| matches!(val.trim().to_lowercase().as_str(), "true" | "1"))
            .unwrap_or(false);
        let tags = lookup("LOGGLY_TAGS")
            .map(|val| {
                val.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let proxy = match lookup("LOGGLY_PROXY").filter(|val| !val.trim().is_empty()) {
            Some(val) => Some(ProxyConfig::parse(&val)?),
            None => None,
        };
        let retry = match lookup("LOGGLY_MAX_ATTEMPTS") {
            Some(val) => {
                let attempts = val.trim().parse::<u32>().map_err(|_| {
                    LogglyError::Config(format!("LOGGLY_MAX_ATTEMPTS '{val}' is not a number"))
                })?;
                RetryStrategy::default().with_attempts(attempts)
            }
            None => RetryStrategy::default(),
        };
        let timeout = match lookup("LOGGLY_TIMEOUT_SECS") {
            Some(val) => {
                let secs = val.trim().parse::<u64>().map_err(|_| {
                    LogglyError::Config(format!("LOGGLY_TIMEOUT_SECS '{val}' is not a number"))
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let config = Self {
            token,
            subdomain,
            host,
            json,
            tags,
            proxy,
            retry,
            timeout,
            intake_url_override: None,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LogglyError> {
        if self.token.trim().is_empty() {
            return Err(LogglyError::Config("token is required".to_string()));
        }

        if let Some(host) = &self.host {
            if host.trim().is_empty() {
                return Err(LogglyError::Config("host cannot be empty".to_string()));
            }
        }

        if self.retry.max_attempts() == 0 {
            return Err(LogglyError::Config(
                "retry strategy must allow at least one attempt".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(LogglyError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }

        if let Some(url) = &self.intake_url_override {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(LogglyError::Config(format!(
                    "intake url override '{url}' must start with http:// or https://"
                )));
            }
        }

        Ok(())
    }
}

// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Wire-level constants for the Loggly HTTP intake.

use std::time::Duration;

/// Intake host used when no explicit host is configured.
///
/// The account subdomain is not part of the intake address; every account
/// posts to the same shared host and the input token selects the input.
pub const DEFAULT_HOST: &str = "logs-01.loggly.com";

/// Path segment of the per-input intake endpoint, followed by the token.
pub const INPUTS_SEGMENT: &str = "inputs";

/// Header carrying the comma-joined tag set of a message (`X-LOGGLY-TAG`).
/// Kept lowercase so it can be used as a static `HeaderName`.
pub const TAG_HEADER: &str = "x-loggly-tag";

/// Content type of plain-text bodies.
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Content type of JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Total number of attempts made for one message by the default strategy.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// First backoff delay of the default strategy, in milliseconds.
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 100;

/// Upper bound of any backoff delay of the default strategy, in milliseconds.
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 5_000;

/// Per-attempt request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Marker rendered in place of a value that refers back to one of its ancestors.
pub const CIRCULAR_MARKER: &str = "<Circular>";

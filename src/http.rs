//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a request timeout and the
//! crate user agent. Both outbound integrations (WhatsApp Cloud API and the
//! AI extraction endpoint) share this builder.

use reqwest::Client;
use std::time::Duration;

/// Build a reqwest Client with the given timeout
pub fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("fipebot/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}

//! Configuration for derivation and for the IPFS importer.
//!
//! Both structs have sensible defaults and can be loaded from JSON by
//! embedding applications; the CLI fills them from flags.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::crypto::stream::DEFAULT_CAPACITY;
use crate::identity::peer::IdentifierHash;

/// Default IPFS HTTP API endpoint.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";

/// Options controlling identity derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriveOptions {
    /// Digest applied to the public-key record.
    pub hash: IdentifierHash,
    /// Seed stream buffer size in bytes. Changing it changes every
    /// identity past the first buffer, so keep the default.
    pub stream_capacity: usize,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            hash: IdentifierHash::Sha256,
            stream_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl DeriveOptions {
    pub fn with_hash(mut self, hash: IdentifierHash) -> Self {
        self.hash = hash;
        self
    }

    pub fn with_stream_capacity(mut self, capacity: usize) -> Self {
        self.stream_capacity = capacity;
        self
    }
}

/// Settings for [`crate::importer::IpfsKeyImporter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// Base URL of the IPFS HTTP API, without the `/api/v0` suffix.
    pub api_url: String,
    /// Timeout for a single request.
    pub timeout: Duration,
    /// Maximum attempts for a request that fails in transport.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

impl ImporterConfig {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of attempts; zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Full URL of the `key/import` endpoint.
    pub fn import_endpoint(&self) -> String {
        format!("{}/api/v0/key/import", self.api_url.trim_end_matches('/'))
    }
}

//! IPFS `key/import` over the Kubo HTTP API.

use std::thread;

use log::{debug, info, warn};
use reqwest::blocking::{multipart, Client, Response};

use crate::config::ImporterConfig;
use crate::importer::{ImportError, KeyImporter};

/// `format` query value for cleartext PKCS#8 PEM keys.
pub const PEM_FORMAT: &str = "pem-pkcs8-cleartext";

/// Make a key name safe to use as an upload file name.
pub fn safe_file_name(name: &str) -> String {
    let stem = name.replace(['/', ':'], "_");
    format!("{stem}.pem")
}

/// Text for a non-200 reply, or the reason the body could not be read.
fn status_body<E: std::fmt::Display>(read: Result<String, E>) -> String {
    match read {
        Ok(body) => body.trim_end().to_string(),
        Err(e) => format!("failed to read response body: {e}"),
    }
}

/// Imports keys into an IPFS node.
#[derive(Debug, Clone)]
pub struct IpfsKeyImporter {
    config: ImporterConfig,
    client: Client,
}

impl IpfsKeyImporter {
    /// Build an importer; the HTTP client uses the configured timeout.
    pub fn new(config: ImporterConfig) -> Result<Self, ImportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ImportError::Request(format!("HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    fn form(name: &str, key_pem: &[u8]) -> Result<multipart::Form, ImportError> {
        let part = multipart::Part::bytes(key_pem.to_vec())
            .file_name(safe_file_name(name))
            .mime_str("application/octet-stream")
            .map_err(|e| ImportError::Request(format!("multipart part: {e}")))?;
        Ok(multipart::Form::new().part("file", part))
    }

    /// Outer error: the request could not be built. Inner: transport.
    fn send_once(
        &self,
        name: &str,
        key_pem: &[u8],
    ) -> Result<reqwest::Result<Response>, ImportError> {
        let form = Self::form(name, key_pem)?;
        Ok(self
            .client
            .post(self.config.import_endpoint())
            .query(&[("arg", name), ("format", PEM_FORMAT)])
            .multipart(form)
            .send())
    }
}

impl KeyImporter for IpfsKeyImporter {
    fn import_key(&self, name: &str, key_pem: &[u8]) -> Result<(), ImportError> {
        let attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        let response = loop {
            attempt += 1;
            debug!(
                "importing key {name:?} into {} (attempt {attempt}/{attempts})",
                self.config.api_url
            );
            match self.send_once(name, key_pem)? {
                Ok(response) => break response,
                // Only a failed connect is known not to have reached the node;
                // a timed-out POST may already have imported the key.
                Err(e) if e.is_connect() && attempt < attempts => {
                    warn!("could not connect to import key {name:?}, retrying: {e}");
                    thread::sleep(self.config.retry_delay);
                }
                Err(e) => {
                    return Err(ImportError::Transport {
                        attempts: attempt,
                        message: e.to_string(),
                    })
                }
            }
        };

        let status = response.status();
        let url = response.url().to_string();
        if status != reqwest::StatusCode::OK {
            return Err(ImportError::Status {
                status: status.as_u16(),
                body: status_body(response.text()),
                url,
            });
        }

        info!("imported key {name:?} into {}", self.config.api_url);
        Ok(())
    }
}

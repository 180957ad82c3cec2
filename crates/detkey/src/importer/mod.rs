//! Key-store import capability.
//!
//! The derivation core never talks to a key store directly; it hands the
//! exported PEM to a [`KeyImporter`]. [`IpfsKeyImporter`] implements it
//! against an IPFS node's HTTP API.

pub mod ipfs;

pub use ipfs::{safe_file_name, IpfsKeyImporter};

/// Failure reported by a key store.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to build import request: {0}")]
    Request(String),

    #[error("failed to send import request after {attempts} attempt(s): {message}")]
    Transport { attempts: u32, message: String },

    #[error("IPFS API returned error status {status}, body: {body}, request URL: {url}")]
    Status {
        status: u16,
        body: String,
        url: String,
    },

    #[error("key store rejected import: {0}")]
    Rejected(String),
}

/// Stores exported key material under a name.
///
/// Implementations own their own retry and timeout policy; callers do
/// not retry.
pub trait KeyImporter {
    fn import_key(&self, name: &str, key_pem: &[u8]) -> Result<(), ImportError>;
}

impl<T: KeyImporter + ?Sized> KeyImporter for &T {
    fn import_key(&self, name: &str, key_pem: &[u8]) -> Result<(), ImportError> {
        (**self).import_key(name, key_pem)
    }
}

impl<T: KeyImporter + ?Sized> KeyImporter for Box<T> {
    fn import_key(&self, name: &str, key_pem: &[u8]) -> Result<(), ImportError> {
        (**self).import_key(name, key_pem)
    }
}

//! Name → identity derivation pipeline.
//!
//! name → seed stream → Ed25519 key pair → {identifier, PEM export}.
//! Purely synchronous; every call builds its own stream and key pair.

use log::debug;
use serde::Serialize;

use crate::config::DeriveOptions;
use crate::crypto::export::{export_key_pair, ExportedKey};
use crate::crypto::keys::{derive_key_pair_from_stream, PUBLIC_KEY_LENGTH};
use crate::crypto::stream::SeedStream;
use crate::error::Result;
use crate::identity::peer::{Identifier, IdentifierEncoder};

/// Everything derived from one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedIdentity {
    /// The name the identity was derived from.
    pub name: String,
    /// The libp2p-key CID of the public key.
    pub identifier: Identifier,
    /// Raw Ed25519 public key.
    #[serde(with = "hex_key")]
    pub public_key: [u8; PUBLIC_KEY_LENGTH],
    /// PKCS#8 PEM of the private key. Never serialized.
    #[serde(skip)]
    pub exported_key: ExportedKey,
}

mod hex_key {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(key: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(key))
    }
}

/// Derives identities with fixed options.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityDeriver {
    options: DeriveOptions,
}

impl IdentityDeriver {
    pub fn new(options: DeriveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DeriveOptions {
        &self.options
    }

    /// Derive the identifier and exported private key for `name`.
    ///
    /// Errors carry the operation and the name.
    pub fn derive(&self, name: &str) -> Result<DerivedIdentity> {
        self.derive_inner(name)
            .map_err(|e| e.context("derive_identity", name))
    }

    fn derive_inner(&self, name: &str) -> Result<DerivedIdentity> {
        let mut stream = SeedStream::with_capacity(name.as_bytes(), self.options.stream_capacity)?;
        let pair = derive_key_pair_from_stream(&mut stream);
        drop(stream);

        let public_key = pair.verifying_key_bytes();
        let identifier = IdentifierEncoder::new(self.options.hash).encode(&public_key)?;
        let exported_key = export_key_pair(&pair)?;

        debug!("derived identity {identifier} for name {name:?}");

        Ok(DerivedIdentity {
            name: name.to_string(),
            identifier,
            public_key,
            exported_key,
        })
    }
}

/// Derive an identity for `name` with the default options.
pub fn derive_identity(name: &str) -> Result<DerivedIdentity> {
    IdentityDeriver::default().derive(name)
}

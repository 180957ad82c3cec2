//! detkey — deterministic Ed25519 identities derived from names.
//!
//! A name seeds a SHA-256 hash-chain byte stream; its first 32 bytes are
//! an Ed25519 seed. The public key becomes a libp2p-key CIDv1 in base-36,
//! and the private key is exported as PKCS#8 PEM for import into an IPFS
//! key store.
//!
//! The seed stream is deterministic by construction and must never be
//! used where unpredictability is required.

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod importer;
pub mod service;

// Re-export primary types
pub use config::{DeriveOptions, ImporterConfig};
pub use crypto::export::{export_private_key, import_private_key, ExportedKey};
pub use crypto::keys::{derive_key_pair, Ed25519KeyPair};
pub use crypto::stream::SeedStream;
pub use error::{DetKeyError, Result};
pub use identity::{
    derive_identity, encode_identifier, DerivedIdentity, Identifier, IdentifierEncoder,
    IdentifierHash, IdentityDeriver,
};
pub use importer::{ImportError, IpfsKeyImporter, KeyImporter};
pub use service::KeyService;

//! Ed25519 key pair derivation from a 32-byte seed.
//!
//! The seed is the RFC 8032 private key; no hashing happens here beyond
//! what Ed25519 key generation itself performs.

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::crypto::stream::SeedStream;
use crate::error::{DetKeyError, Result};

/// Length of an Ed25519 seed (private key) in bytes.
pub const SEED_LENGTH: usize = 32;

/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An Ed25519 key pair derived from a deterministic seed.
///
/// The signing key is zeroized on drop (`SigningKey` is `ZeroizeOnDrop`).
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519KeyPair {
    /// Reconstruct a key pair from raw signing key bytes.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Reconstruct a verifying key from raw bytes.
    pub fn verifying_key_from_bytes(bytes: &[u8]) -> Result<VerifyingKey> {
        let array: &[u8; PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            DetKeyError::Encoding(format!(
                "Ed25519 public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;
        VerifyingKey::from_bytes(array)
            .map_err(|e| DetKeyError::Encoding(format!("invalid Ed25519 public key: {e}")))
    }

    /// Return a reference to the signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }

    /// Return the verifying (public) key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Return the signing key bytes. Caller must zeroize after use.
    pub fn signing_key_bytes(&self) -> [u8; SEED_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Return the verifying key bytes.
    pub fn verifying_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.verifying_key.to_bytes()
    }
}

/// Derive a key pair from a seed that must be exactly 32 bytes.
pub fn derive_key_pair(seed: &[u8]) -> Result<Ed25519KeyPair> {
    let seed: &[u8; SEED_LENGTH] = seed.try_into().map_err(|_| {
        DetKeyError::KeyDerivation(format!(
            "seed must be {SEED_LENGTH} bytes, got {}",
            seed.len()
        ))
    })?;
    Ok(Ed25519KeyPair::from_seed(seed))
}

/// Draw exactly one seed from the stream and derive the key pair.
pub fn derive_key_pair_from_stream(stream: &mut SeedStream) -> Ed25519KeyPair {
    let mut seed: [u8; SEED_LENGTH] = stream.read_array();
    let pair = Ed25519KeyPair::from_seed(&seed);
    seed.zeroize();
    pair
}

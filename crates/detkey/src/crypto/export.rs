//! PKCS#8 / PEM export of Ed25519 private keys.
//!
//! Keys are written as PKCS#8 v1 `PrivateKeyInfo` (OID 1.3.101.112, no
//! parameters, no embedded public key) and wrapped as PEM `PRIVATE KEY`
//! with 64-column base64 lines and LF endings. That is the form IPFS
//! accepts for `key/import --format=pem-pkcs8-cleartext`.

use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey, KeypairBytes};
use zeroize::Zeroize;

use crate::crypto::keys::{Ed25519KeyPair, SEED_LENGTH};
use crate::error::{DetKeyError, Result};

/// PEM label used for exported keys.
pub const PEM_LABEL: &str = "PRIVATE KEY";

/// PEM-encoded PKCS#8 private key text.
///
/// Zeroized on drop; `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedKey {
    pem: String,
}

impl ExportedKey {
    /// The PEM text.
    pub fn as_str(&self) -> &str {
        &self.pem
    }

    /// The PEM text as bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.pem.as_bytes()
    }

    /// Parse the PEM back into the 32-byte Ed25519 seed.
    pub fn decode_seed(&self) -> Result<[u8; SEED_LENGTH]> {
        import_private_key(&self.pem)
    }
}

impl Drop for ExportedKey {
    fn drop(&mut self) {
        self.pem.zeroize();
    }
}

impl std::fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExportedKey(<redacted>)")
    }
}

fn keypair_bytes(private_key: &[u8]) -> Result<KeypairBytes> {
    let secret_key: [u8; SEED_LENGTH] = private_key.try_into().map_err(|_| {
        DetKeyError::Export(format!(
            "Ed25519 private key must be {SEED_LENGTH} bytes, got {}",
            private_key.len()
        ))
    })?;
    Ok(KeypairBytes {
        secret_key,
        public_key: None,
    })
}

/// Encode a raw 32-byte private key as PKCS#8 DER.
pub fn export_private_key_der(private_key: &[u8]) -> Result<Vec<u8>> {
    let mut bytes = keypair_bytes(private_key)?;
    let document = bytes.to_pkcs8_der();
    bytes.secret_key.zeroize();
    let document =
        document.map_err(|e| DetKeyError::Export(format!("PKCS#8 DER encoding: {e}")))?;
    Ok(document.as_bytes().to_vec())
}

/// Encode a raw 32-byte private key as PKCS#8 PEM.
pub fn export_private_key(private_key: &[u8]) -> Result<ExportedKey> {
    let mut bytes = keypair_bytes(private_key)?;
    let pem = bytes.to_pkcs8_pem(LineEnding::LF);
    bytes.secret_key.zeroize();
    let pem = pem.map_err(|e| DetKeyError::Export(format!("PKCS#8 PEM encoding: {e}")))?;
    Ok(ExportedKey {
        pem: pem.as_str().to_owned(),
    })
}

/// Export the private half of a key pair.
pub fn export_key_pair(pair: &Ed25519KeyPair) -> Result<ExportedKey> {
    let mut seed = pair.signing_key_bytes();
    let exported = export_private_key(&seed);
    seed.zeroize();
    exported
}

/// Parse PKCS#8 PEM text into the 32-byte Ed25519 seed.
///
/// If the document embeds a public key (PKCS#8 v2), it must match the
/// one derived from the seed.
pub fn import_private_key(pem: &str) -> Result<[u8; SEED_LENGTH]> {
    let parsed = KeypairBytes::from_pkcs8_pem(pem)
        .map_err(|e| DetKeyError::Export(format!("invalid PKCS#8 PEM: {e}")))?;

    if let Some(public) = &parsed.public_key {
        let derived = Ed25519KeyPair::from_seed(&parsed.secret_key);
        if public.0 != derived.verifying_key_bytes() {
            return Err(DetKeyError::Export(
                "embedded public key does not match private key".into(),
            ));
        }
    }

    Ok(parsed.secret_key)
}

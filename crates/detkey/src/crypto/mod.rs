//! Cryptographic primitives for detkey.
//!
//! This module provides:
//! - The deterministic SHA-256 hash-chain seed stream
//! - Ed25519 key pair derivation from a 32-byte seed
//! - PKCS#8 / PEM private key export and import

pub mod export;
pub mod keys;
pub mod stream;

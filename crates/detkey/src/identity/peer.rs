//! Peer identifiers — libp2p-key CIDs computed from Ed25519 public keys.
//!
//! An identifier is built in four steps:
//!
//! 1. the public key is wrapped in the libp2p public-key record
//!    (protobuf `PublicKey { Type = Ed25519, Data = key }`),
//! 2. the record is hashed into a multihash (SHA2-256 by default),
//! 3. the multihash is wrapped in a CIDv1 with codec `libp2p-key`,
//! 4. the CID is written as base-36 lowercase multibase (prefix `k`).

use std::str::FromStr;

use cid::multihash::Multihash;
use cid::{Cid, Version};
use multibase::Base;
use multihash_codetable::{Code, MultihashDigest};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::keys::PUBLIC_KEY_LENGTH;
use crate::error::{DetKeyError, Result};

/// Multicodec code for `libp2p-key`.
pub const LIBP2P_KEY_CODEC: u64 = 0x72;

/// Multihash code for SHA2-256.
pub const SHA2_256_CODE: u64 = 0x12;

/// Multihash code for the identity (inline) hash.
pub const IDENTITY_CODE: u64 = 0x00;

/// Records up to this length may be inlined with the identity multihash.
pub const MAX_INLINE_LENGTH: usize = 42;

/// libp2p `KeyType` enum value for Ed25519.
const ED25519_KEY_TYPE: u8 = 1;

/// Multibase used for the textual form.
const TEXT_BASE: Base = Base::Base36Lower;

/// Digest applied to the public-key record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierHash {
    /// SHA2-256 multihash of the record.
    #[default]
    Sha256,
    /// Identity multihash (the record itself) when it is short enough,
    /// SHA2-256 otherwise. This is the libp2p peer-ID rule.
    Inline,
}

impl IdentifierHash {
    /// Return a stable string representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sha256 => "sha256",
            Self::Inline => "inline",
        }
    }

    fn digest(self, record: &[u8]) -> Result<Multihash<64>> {
        match self {
            Self::Inline if record.len() <= MAX_INLINE_LENGTH => {
                Multihash::wrap(IDENTITY_CODE, record)
                    .map_err(|e| DetKeyError::Encoding(format!("identity multihash: {e}")))
            }
            _ => Ok(Code::Sha2_256.digest(record)),
        }
    }
}

/// Wrap an Ed25519 public key in the libp2p public-key record.
///
/// The record is protobuf: field 1 (varint) is the key type, field 2
/// (length-delimited) is the raw key.
pub fn public_key_record(public_key: &[u8]) -> Result<Vec<u8>> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(DetKeyError::Encoding(format!(
            "Ed25519 public key must be {PUBLIC_KEY_LENGTH} bytes, got {}",
            public_key.len()
        )));
    }

    let mut record = Vec::with_capacity(4 + PUBLIC_KEY_LENGTH);
    record.extend_from_slice(&[0x08, ED25519_KEY_TYPE, 0x12, PUBLIC_KEY_LENGTH as u8]);
    record.extend_from_slice(public_key);
    Ok(record)
}

/// Computes identifiers with a fixed digest choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierEncoder {
    hash: IdentifierHash,
}

impl IdentifierEncoder {
    pub fn new(hash: IdentifierHash) -> Self {
        Self { hash }
    }

    pub fn hash(&self) -> IdentifierHash {
        self.hash
    }

    /// Encode a raw Ed25519 public key as an identifier.
    pub fn encode(&self, public_key: &[u8]) -> Result<Identifier> {
        let record = public_key_record(public_key)?;
        let multihash = self.hash.digest(&record)?;
        Identifier::from_cid(Cid::new_v1(LIBP2P_KEY_CODEC, multihash))
    }
}

/// Encode a public key with the default SHA2-256 digest.
pub fn encode_identifier(public_key: &[u8]) -> Result<Identifier> {
    IdentifierEncoder::default().encode(public_key)
}

/// A libp2p-key CIDv1 in its canonical base-36 text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    text: String,
    cid: Cid,
}

impl Identifier {
    fn from_cid(cid: Cid) -> Result<Self> {
        let text = cid
            .to_string_of_base(TEXT_BASE)
            .map_err(|e| DetKeyError::Encoding(format!("multibase encoding: {e}")))?;
        Ok(Self { text, cid })
    }

    /// Parse a textual identifier.
    ///
    /// Any multibase is accepted; the stored text is always the canonical
    /// base-36 form. The CID must be version 1 with codec `libp2p-key` and
    /// a SHA2-256 or identity multihash.
    pub fn parse(text: &str) -> Result<Self> {
        let cid = Cid::try_from(text)
            .map_err(|e| DetKeyError::Encoding(format!("invalid CID {text:?}: {e}")))?;

        if cid.version() != Version::V1 {
            return Err(DetKeyError::Encoding(format!(
                "expected CIDv1, got {:?}",
                cid.version()
            )));
        }
        if cid.codec() != LIBP2P_KEY_CODEC {
            return Err(DetKeyError::Encoding(format!(
                "expected libp2p-key codec 0x72, got {:#x}",
                cid.codec()
            )));
        }
        match cid.hash().code() {
            SHA2_256_CODE | IDENTITY_CODE => {}
            other => {
                return Err(DetKeyError::Encoding(format!(
                    "unsupported multihash code {other:#x}"
                )))
            }
        }

        Self::from_cid(cid)
    }

    /// The canonical text form.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The decoded CID.
    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    /// Which digest produced this identifier.
    pub fn hash_kind(&self) -> IdentifierHash {
        if self.cid.hash().code() == IDENTITY_CODE {
            IdentifierHash::Inline
        } else {
            IdentifierHash::Sha256
        }
    }

    /// The public key carried inline, for identity-multihash identifiers.
    pub fn inline_public_key(&self) -> Option<[u8; PUBLIC_KEY_LENGTH]> {
        if self.cid.hash().code() != IDENTITY_CODE {
            return None;
        }
        let record = self.cid.hash().digest();
        let key = record.strip_prefix(&[0x08, ED25519_KEY_TYPE, 0x12, PUBLIC_KEY_LENGTH as u8])?;
        key.try_into().ok()
    }

    /// Recompute the identifier for `public_key` with the same digest and
    /// compare.
    pub fn matches_public_key(&self, public_key: &[u8]) -> Result<bool> {
        let other = IdentifierEncoder::new(self.hash_kind()).encode(public_key)?;
        Ok(other.cid == self.cid)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for Identifier {
    type Err = DetKeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

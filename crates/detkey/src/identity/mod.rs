//! Identity derivation — from a name to a peer identifier and key export.
//!
//! The identity module provides the `IdentityDeriver` pipeline and the
//! `Identifier` type, a libp2p-key CID computed from the public key.

pub mod derive;
pub mod peer;

pub use derive::{derive_identity, DerivedIdentity, IdentityDeriver};
pub use peer::{
    encode_identifier, public_key_record, Identifier, IdentifierEncoder, IdentifierHash,
};

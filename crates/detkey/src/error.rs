//! Error types for detkey.
//!
//! All errors are strongly typed and propagated without panicking.
//! Private key material is never included in error messages.

use crate::importer::ImportError;

/// Error types covering derivation, encoding, export and import.
#[derive(Debug, thiserror::Error)]
pub enum DetKeyError {
    #[error("Seed expansion failed: {0}")]
    SeedExpansion(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Identifier encoding failed: {0}")]
    Encoding(String),

    #[error("Key export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("{operation} failed for {name:?}: {source}")]
    Context {
        operation: &'static str,
        name: String,
        #[source]
        source: Box<DetKeyError>,
    },
}

impl DetKeyError {
    /// Wrap this error with the operation and the name it was run for.
    pub fn context(self, operation: &'static str, name: &str) -> Self {
        Self::Context {
            operation,
            name: name.to_string(),
            source: Box::new(self),
        }
    }

    /// Return the innermost error, skipping any `Context` layers.
    pub fn root(&self) -> &DetKeyError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, DetKeyError>;

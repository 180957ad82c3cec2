//! Derive-and-import service.
//!
//! Couples an [`IdentityDeriver`] with an injected [`KeyImporter`], so the
//! key store can be swapped for a test double.

use log::debug;

use crate::error::{DetKeyError, Result};
use crate::identity::{DerivedIdentity, IdentityDeriver};
use crate::importer::KeyImporter;

pub struct KeyService<I> {
    deriver: IdentityDeriver,
    importer: I,
}

impl<I: KeyImporter> KeyService<I> {
    pub fn new(deriver: IdentityDeriver, importer: I) -> Self {
        Self { deriver, importer }
    }

    pub fn deriver(&self) -> &IdentityDeriver {
        &self.deriver
    }

    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// Derive the identity for `name` and import its private key under the
    /// same name. Returns the derived identity on success.
    pub fn generate_and_import(&self, name: &str) -> Result<DerivedIdentity> {
        let derived = self.deriver.derive(name)?;
        self.import(&derived)?;
        Ok(derived)
    }

    /// Import an already derived identity.
    pub fn import(&self, derived: &DerivedIdentity) -> Result<()> {
        debug!("handing key for {:?} to importer", derived.name);
        self.importer
            .import_key(&derived.name, derived.exported_key.as_bytes())
            .map_err(|e| DetKeyError::from(e).context("import_key", &derived.name))
    }
}

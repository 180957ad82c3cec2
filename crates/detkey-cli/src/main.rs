//! detkey CLI — `detkey` command.
//!
//! Derives a deterministic Ed25519 identity from a name, imports the
//! private key into an IPFS node under that name, and prints
//! `<identifier> <name>`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use detkey::config::DEFAULT_API_URL;
use detkey::{
    DeriveOptions, DerivedIdentity, IdentifierHash, IdentityDeriver, ImporterConfig,
    IpfsKeyImporter, KeyService,
};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// detkey — derive a reproducible identity from a name and import it into IPFS.
#[derive(Parser, Debug)]
#[command(
    name = "detkey",
    about = "Deterministic name-seeded identities for IPFS",
    version,
    long_about = "detkey — deterministic name-seeded identities\n\nThe same name always yields the same Ed25519 key and libp2p-key CID.\nThe key is NOT secret to anyone who knows the name."
)]
struct Cli {
    /// Name to derive the identity from; also used as the IPFS key name
    name: String,

    /// Base URL of the IPFS HTTP API
    #[arg(long, env = "DETKEY_IPFS_API", default_value = DEFAULT_API_URL)]
    api: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum attempts when the API cannot be reached
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Use the inline (identity multihash) identifier, as IPFS reports it
    #[arg(long)]
    inline_id: bool,

    /// Derive and print only; do not contact IPFS
    #[arg(long)]
    no_import: bool,

    /// Also write the PKCS#8 PEM private key to this file
    #[arg(long)]
    pem_out: Option<PathBuf>,

    /// Print the derived identity as JSON
    #[arg(long)]
    json: bool,

    /// Include the private key PEM in JSON output
    #[arg(long, requires = "json")]
    show_private: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "detkey=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementation ────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<()> {
    let hash = if cli.inline_id {
        IdentifierHash::Inline
    } else {
        IdentifierHash::Sha256
    };
    let deriver = IdentityDeriver::new(DeriveOptions::default().with_hash(hash));

    let derived = deriver
        .derive(&cli.name)
        .context("failed to create key generator")?;

    if cli.verbose {
        eprintln!("Identifier:  {}", derived.identifier);
        eprintln!("Public key:  {}", hex::encode(derived.public_key));
        eprintln!("Digest:      {}", hash.as_str());
    }

    if let Some(path) = &cli.pem_out {
        write_pem(path, &derived)?;
        if cli.verbose {
            eprintln!("Wrote private key to {}", path.display());
        }
    }

    if !cli.no_import {
        let config = ImporterConfig::default()
            .with_api_url(cli.api.clone())
            .with_timeout(Duration::from_secs(cli.timeout_secs))
            .with_max_attempts(cli.retries);
        let importer = IpfsKeyImporter::new(config).context("failed to set up IPFS importer")?;
        let service = KeyService::new(deriver, importer);
        service.import(&derived).context("operation failed")?;
    }

    print_identity(cli, &derived)
}

fn write_pem(path: &Path, derived: &DerivedIdentity) -> Result<()> {
    std::fs::write(path, derived.exported_key.as_bytes())
        .with_context(|| format!("failed to write to {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("failed to restrict permissions on {}", path.display()))?;
    }

    Ok(())
}

fn print_identity(cli: &Cli, derived: &DerivedIdentity) -> Result<()> {
    if !cli.json {
        println!("{} {}", derived.identifier, derived.name);
        return Ok(());
    }

    let mut value = serde_json::to_value(derived).context("failed to serialize identity")?;
    if cli.show_private {
        value["private_key_pem"] = serde_json::Value::String(derived.exported_key.as_str().into());
    }
    let json = serde_json::to_string_pretty(&value).context("failed to serialize identity")?;
    println!("{json}");
    Ok(())
}

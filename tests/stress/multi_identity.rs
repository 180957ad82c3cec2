//! Stress test: derive identities for a corpus of near-duplicate names and
//! verify that every identifier is distinct and well-formed.

use std::collections::HashSet;

use detkey::identity::peer::{LIBP2P_KEY_CODEC, SHA2_256_CODE};
use detkey::{derive_identity, Ed25519KeyPair, Identifier};

fn near_duplicate_names() -> Vec<String> {
    let mut names = vec![
        "alice".to_string(),
        "Alice".to_string(),
        "alice ".to_string(),
        " alice".to_string(),
        "alicf".to_string(),
        "alic".to_string(),
        "alice\n".to_string(),
        "alice\0".to_string(),
        "аlice".to_string(), // Cyrillic 'а'
        "".to_string(),
    ];
    for i in 0..200 {
        names.push(format!("agent-{i}"));
        names.push(format!("agent-{i:03}"));
    }
    names.sort();
    names.dedup();
    names
}

#[test]
fn stress_near_duplicate_names_unique_identifiers() {
    let names = near_duplicate_names();
    let mut ids = HashSet::new();
    let mut keys = HashSet::new();

    for name in &names {
        let derived = derive_identity(name).expect("derivation should succeed");
        assert!(
            ids.insert(derived.identifier.as_str().to_string()),
            "Duplicate identifier for {name:?}: {}",
            derived.identifier
        );
        assert!(keys.insert(derived.exported_key.as_str().to_string()));
    }

    assert_eq!(ids.len(), names.len());
}

#[test]
fn stress_every_identifier_roundtrips_and_matches_key() {
    for name in near_duplicate_names().iter().take(100) {
        let derived = derive_identity(name).unwrap();

        let parsed = Identifier::parse(derived.identifier.as_str()).unwrap();
        assert_eq!(parsed.cid().codec(), LIBP2P_KEY_CODEC);
        assert_eq!(parsed.cid().hash().code(), SHA2_256_CODE);
        assert_eq!(parsed.to_string(), derived.identifier.as_str());
        assert!(parsed.as_str().starts_with('k'));

        let seed = derived.exported_key.decode_seed().unwrap();
        let pair = Ed25519KeyPair::from_seed(&seed);
        assert!(parsed
            .matches_public_key(&pair.verifying_key_bytes())
            .unwrap());
    }
}

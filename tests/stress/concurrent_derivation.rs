//! Stress test: derivations on many threads agree with each other and with
//! a sequential run.

use std::sync::Arc;
use std::thread;

use detkey::{derive_identity, IdentityDeriver};

#[test]
fn stress_parallel_same_name_agrees() {
    let expected = derive_identity("shared-name").unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| thread::spawn(|| derive_identity("shared-name").unwrap()))
        .collect();

    for handle in handles {
        let derived = handle.join().expect("thread should not panic");
        assert_eq!(derived, expected);
    }
}

#[test]
fn stress_parallel_distinct_names_match_sequential() {
    let names: Vec<String> = (0..64).map(|i| format!("worker-{i}")).collect();
    let sequential: Vec<String> = names
        .iter()
        .map(|n| derive_identity(n).unwrap().identifier.to_string())
        .collect();

    let deriver = Arc::new(IdentityDeriver::default());
    let handles: Vec<_> = names
        .iter()
        .cloned()
        .map(|name| {
            let deriver = Arc::clone(&deriver);
            thread::spawn(move || deriver.derive(&name).unwrap().identifier.to_string())
        })
        .collect();

    let parallel: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread should not panic"))
        .collect();

    assert_eq!(parallel, sequential);
}

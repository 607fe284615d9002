//! Default hash and equality collaborators for keys that implement the std traits.

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

/// Signature of the default hash collaborator.
pub type HashFn<K> = fn(&K) -> u64;

/// Signature of the default equality collaborator.
pub type EqFn<K> = fn(&K, &K) -> bool;

/// Hashes a key with the Fx hasher.
pub fn fx_hash<K: Hash>(key: &K) -> u64 {
    FxBuildHasher.hash_one(key)
}

/// Compares two keys with `Eq`.
pub fn key_eq<K: Eq>(a: &K, b: &K) -> bool {
    a == b
}

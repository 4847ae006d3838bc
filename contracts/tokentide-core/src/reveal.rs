//! Recipient commitment hashing.
//!
//! A gift is keyed by a salted hash of an off-chain recipient identifier
//! (for example an email address). The sender computes
//! `sha256(identifier || salt)` off-chain at deposit time; the claimant
//! reveals the preimage and the manager recomputes the hash on-chain to
//! locate the gift. Secrecy of the preimage is the only claimant
//! authentication this scheme provides.

use soroban_sdk::{Bytes, BytesN, Env};

/// Recomputes the recipient commitment from its preimage:
/// `sha256(identifier || salt)`.
pub fn recipient_hash(env: &Env, identifier: &Bytes, salt: &Bytes) -> BytesN<32> {
    let mut data = identifier.clone();
    data.append(salt);
    env.crypto().sha256(&data).into()
}

/// The all-zero commitment is reserved as the empty sentinel and never
/// addresses a gift.
pub fn is_zero_hash(env: &Env, hash: &BytesN<32>) -> bool {
    *hash == BytesN::from_array(env, &[0u8; 32])
}

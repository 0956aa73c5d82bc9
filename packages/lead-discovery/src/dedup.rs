//! Dedup filter against identities already in storage.

use std::collections::HashSet;

use crate::types::candidate::Candidate;

/// Identities already persisted for the current owner.
pub type KnownIdentitySet = HashSet<String>;

/// Drop candidates whose identity is already known, keeping order.
///
/// Known identities are compared case-insensitively because candidate
/// identities are always lowercase.
pub fn filter_known(candidates: Vec<Candidate>, known: &KnownIdentitySet) -> Vec<Candidate> {
    if known.is_empty() {
        return candidates;
    }

    let known: HashSet<String> = known.iter().map(|k| k.trim().to_lowercase()).collect();
    candidates
        .into_iter()
        .filter(|c| !known.contains(&c.identity))
        .collect()
}

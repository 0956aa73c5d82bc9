//! Discovered lead candidates.

use serde::{Deserialize, Serialize};

/// How a candidate's contact address was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Address appeared in the result's title or snippet.
    Verbatim,

    /// No address in the text, but the text mentions contact/business;
    /// the address was built from the identity and may not exist.
    Synthesized,
}

/// A contact address plus how much to trust it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
    pub address: String,
    pub confidence: Confidence,
}

impl ContactAddress {
    pub fn verbatim(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            confidence: Confidence::Verbatim,
        }
    }

    pub fn synthesized(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            confidence: Confidence::Synthesized,
        }
    }
}

/// Lifecycle status of a lead once handed to the caller.
///
/// Discovery only ever produces `Allocated`. `Used` and `Invalid` are set by
/// the caller's persistence layer after outreach and share this
/// serialization so stored records round-trip through the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    Allocated,
    Used,
    Invalid,
}

/// A discovered record. Identity is unique within one discovery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Lowercased profile handle taken from the result URL.
    pub identity: String,

    /// Cleaned title, or the identity when the title cleans to nothing.
    pub display_name: String,

    /// Canonical profile URL for the identity.
    pub profile_url: String,

    /// Lowercased contact address.
    pub email: String,

    pub confidence: Confidence,

    /// Topic the candidate was discovered under.
    pub topic: String,

    /// Static placeholder; geography is never resolved.
    pub location: String,

    pub status: LeadStatus,
}

impl Candidate {
    /// True when the address was synthesized rather than found in text.
    pub fn is_inferred(&self) -> bool {
        self.confidence == Confidence::Synthesized
    }
}

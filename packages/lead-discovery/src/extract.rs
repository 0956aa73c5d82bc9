//! Result extractor.
//!
//! Turns one search result item into a lead candidate using regex
//! heuristics: profile handle from the URL, contact address from the
//! title and snippet, display name from the title.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{
    candidate::{Candidate, ContactAddress, LeadStatus},
    config::LOCATION_PLACEHOLDER,
    item::SearchResultItem,
};

const PLATFORM_HOST: &str = "instagram.com/";

static RE_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"instagram\.com/([^/?#]+)").unwrap());

// local-part, then "@" / "(at)" / "[at]" with optional surrounding whitespace, then domain.tld.
// Address classes are ASCII-only: Unicode case folding would map U+212A to 'k'.
static RE_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i-u:[a-z0-9._-]+)(?:\s*\(at\)\s*|\s*@\s*|\s*\[at\]\s*)(?i-u:[a-z0-9._-]+\.[a-z0-9._-]+)",
    )
    .unwrap()
});
static RE_AT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:\(at\)|\[at\])\s*").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Path segments that are platform routes, not profiles.
const NON_PROFILE_SEGMENTS: &[&str] = &[
    "p", "reel", "reels", "explore", "stories", "direct", "accounts", "legal", "about", "tv",
    "s", "share",
];

/// Words that justify synthesizing an address when none is written out.
const CONTACT_INDICATORS: &[&str] = &["contact", "business"];

const TITLE_PLATFORM_SUFFIX: &str = " - Instagram";
const TITLE_HANDLE_MARKER: &str = "(@";

/// Canonical profile URL for an identity.
pub fn profile_url(identity: &str) -> String {
    format!("https://instagram.com/{}", identity)
}

/// Pull the profile handle out of a result URL.
///
/// Returns `None` for non-Instagram links and for reserved routes such as
/// `/p/`, `/reels/` or `/explore/`. The handle is lowercased.
pub fn parse_identity(link: &str) -> Option<String> {
    if !link.contains(PLATFORM_HOST) {
        return None;
    }

    let handle = RE_PROFILE.captures(link)?.get(1)?.as_str().to_lowercase();
    if handle.is_empty() || NON_PROFILE_SEGMENTS.contains(&handle.as_str()) {
        return None;
    }

    Some(handle)
}

/// Find a contact address in free text, falling back to a synthesized one.
///
/// Only the first written-out address is used. `(at)` and `[at]` spellings
/// are normalized to `@` and internal whitespace is removed. With no
/// written-out address, text mentioning contact/business yields
/// `contact@<identity>.com` at [`Confidence::Synthesized`](crate::Confidence).
pub fn find_address(text: &str, identity: &str) -> Option<ContactAddress> {
    if let Some(m) = RE_ADDRESS.find(text) {
        let normalized = RE_AT_WORD.replace_all(m.as_str(), "@");
        let normalized = RE_WHITESPACE.replace_all(&normalized, "");
        return Some(ContactAddress::verbatim(normalized.to_lowercase()));
    }

    let lowered = text.to_lowercase();
    if CONTACT_INDICATORS.iter().any(|w| lowered.contains(w)) {
        return Some(ContactAddress::synthesized(format!(
            "contact@{}.com",
            identity
        )));
    }

    None
}

/// Strip the `(@handle)` segment and platform suffix from a result title.
pub fn clean_display_name(title: &str, identity: &str) -> String {
    let name = title
        .split(TITLE_HANDLE_MARKER)
        .next()
        .unwrap_or_default()
        .replace(TITLE_PLATFORM_SUFFIX, "");
    let name = name.trim();

    if name.is_empty() {
        identity.to_string()
    } else {
        name.to_string()
    }
}

/// Extract a candidate with the default location placeholder.
pub fn extract(item: &SearchResultItem, topic: &str) -> Option<Candidate> {
    extract_with_location(item, topic, LOCATION_PLACEHOLDER)
}

/// Extract a candidate from one result item.
///
/// Malformed items (no link, no title) are non-matches, never errors.
pub fn extract_with_location(
    item: &SearchResultItem,
    topic: &str,
    location: &str,
) -> Option<Candidate> {
    let link = item.link.as_deref()?;
    let title = item.title.as_deref()?;
    let identity = parse_identity(link)?;

    let text = format!("{} {}", title, item.snippet.as_deref().unwrap_or_default());
    let contact = find_address(&text, &identity)?;

    Some(Candidate {
        display_name: clean_display_name(title, &identity),
        profile_url: profile_url(&identity),
        email: contact.address,
        confidence: contact.confidence,
        topic: topic.to_string(),
        location: location.to_string(),
        status: LeadStatus::Allocated,
        identity,
    })
}

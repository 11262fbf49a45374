//! Photo resolution by address matching against the feed snapshot.
//!
//! Matching policy: a listing matches when the normalized property address
//! is a substring of the listing's lowercased address. A match with an
//! empty media list does not stop the scan; the first match that actually
//! carries media wins. Linear scan — the snapshot is small and fetched
//! once per request.

use crate::feed::{ExternalListing, MediaAsset};
use crate::normalizer::Property;

/// Deterministic fallback photo for properties with no feed match.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/400x300?text=No+Image+Available";

pub fn placeholder_media() -> Vec<MediaAsset> {
    vec![MediaAsset {
        media_url: PLACEHOLDER_IMAGE_URL.to_string(),
    }]
}

/// Resolve a property's photos from the listing snapshot, or fall back to
/// the placeholder. The matched listing's media list is returned verbatim,
/// order preserved.
pub fn resolve_images(property: &Property, listings: &[ExternalListing]) -> Vec<MediaAsset> {
    let needle = property.unparsed_address.trim().to_lowercase();
    if needle.is_empty() || listings.is_empty() {
        return placeholder_media();
    }

    for listing in listings {
        if listing.media.is_empty() {
            continue;
        }
        let listing_address = listing.display_address().to_lowercase();
        if listing_address.contains(&needle) {
            return listing.media.clone();
        }
    }

    placeholder_media()
}

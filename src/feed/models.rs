use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single photo reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaAsset {
    #[serde(rename = "MediaURL", default)]
    pub media_url: String,
}

/// A listing from the external feed. Read-only, used solely as a photo
/// source; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalListing {
    #[serde(rename = "UnparsedAddress")]
    pub unparsed_address: Option<String>,

    #[serde(rename = "StreetNumber")]
    pub street_number: Option<String>,

    #[serde(rename = "StreetName")]
    pub street_name: Option<String>,

    #[serde(rename = "City")]
    pub city: Option<String>,

    #[serde(rename = "StateOrProvince")]
    pub state_or_province: Option<String>,

    #[serde(rename = "Media")]
    pub media: Vec<MediaAsset>,

    /// Feed-side sort key; carried through deserialization untouched.
    #[serde(rename = "RFModificationTimestamp")]
    pub modification_timestamp: Option<DateTime<Utc>>,
}

impl ExternalListing {
    /// The listing's address: the explicit field when present, otherwise a
    /// reconstruction from its parts joined with single spaces, empty parts
    /// skipped.
    pub fn display_address(&self) -> String {
        if let Some(address) = self.unparsed_address.as_deref() {
            if !address.trim().is_empty() {
                return address.to_string();
            }
        }

        [
            &self.street_number,
            &self.street_name,
            &self.city,
            &self.state_or_province,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

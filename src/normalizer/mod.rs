//! Row normalization into the canonical Property schema.
//!
//! Raw rows arrive with whatever column casing the generated SQL produced.
//! Every logical output field maps to an ordered list of accepted column
//! spellings; each spelling is probed as written, all-lowercase and
//! all-uppercase, and the first non-null hit wins. Values that are absent
//! or fail numeric coercion fall back to the field's documented default.
//!
//! Address parsing is best-effort: a malformed address leaves the derived
//! parts at their defaults and never fails the pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::executor::RawRow;
use crate::feed::MediaAsset;

mod errors;

pub use errors::TransformError;

// Logical output field -> accepted raw column spellings, tried in order.
const PROPERTY_ID_COLUMNS: &[&str] = &["property_id"];
const ADDRESS_COLUMNS: &[&str] = &["unparsed_address"];
const PRICE_COLUMNS: &[&str] = &["list_price"];
const BEDROOM_COLUMNS: &[&str] = &["bedrooms"];
const BATHROOM_COLUMNS: &[&str] = &["bathrooms"];
const AREA_COLUMNS: &[&str] = &["square_footage"];
const LATITUDE_COLUMNS: &[&str] = &["latitude"];
const LONGITUDE_COLUMNS: &[&str] = &["longitude"];
const DESCRIPTION_COLUMNS: &[&str] = &["description"];
const YEAR_BUILT_COLUMNS: &[&str] = &["year_built"];
const PROPERTY_TYPE_COLUMNS: &[&str] = &["property_type"];

/// Canonical representation of a real-estate listing returned to callers.
/// Field names on the wire follow the RESO vocabulary the frontend consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    #[serde(rename = "ListingKey")]
    pub listing_key: String,

    #[serde(rename = "ListingId")]
    pub listing_id: String,

    #[serde(rename = "ListPrice")]
    pub list_price: f64,

    #[serde(rename = "UnparsedAddress")]
    pub unparsed_address: String,

    #[serde(rename = "StreetNumber")]
    pub street_number: String,

    #[serde(rename = "StreetName")]
    pub street_name: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "BedroomsTotal")]
    pub bedrooms_total: i64,

    #[serde(rename = "BathroomsTotalInteger")]
    pub bathrooms_total: i64,

    #[serde(rename = "LivingArea")]
    pub living_area: f64,

    #[serde(rename = "Media")]
    pub media: Vec<MediaAsset>,

    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,

    #[serde(rename = "PublicRemarks")]
    pub public_remarks: String,

    #[serde(rename = "YearBuilt")]
    pub year_built: Option<i64>,

    #[serde(rename = "PropertyType")]
    pub property_type: String,
}

/// Street number, street name and city derived from an unparsed address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressParts {
    pub street_number: String,
    pub street_name: String,
    pub city: String,
}

/// Parse an unparsed address into its derived parts.
///
/// Rules: split on comma; the first segment splits on its first space into
/// (number, name) only when both sides exist; the second segment, trimmed,
/// becomes the city. Further segments are ignored.
pub fn parse_address(unparsed: &str) -> AddressParts {
    let mut parts = AddressParts::default();

    let mut segments = unparsed.split(',');
    if let Some(street) = segments.next() {
        if let Some((number, name)) = street.trim().split_once(' ') {
            parts.street_number = number.to_string();
            parts.street_name = name.to_string();
        }
    }
    if let Some(city) = segments.next() {
        parts.city = city.trim().to_string();
    }

    parts
}

/// Normalize one raw row into a Property. Media starts empty; image
/// resolution is a separate pass.
pub fn normalize_row(row: &RawRow) -> Result<Property, TransformError> {
    let id = string_field(row, PROPERTY_ID_COLUMNS)?;
    let unparsed_address = string_field(row, ADDRESS_COLUMNS)?;
    let address = parse_address(&unparsed_address);

    Ok(Property {
        listing_key: id.clone(),
        listing_id: id,
        list_price: f64_field(row, PRICE_COLUMNS),
        unparsed_address,
        street_number: address.street_number,
        street_name: address.street_name,
        city: address.city,
        bedrooms_total: i64_field(row, BEDROOM_COLUMNS),
        bathrooms_total: i64_field(row, BATHROOM_COLUMNS),
        living_area: f64_field(row, AREA_COLUMNS),
        media: vec![],
        latitude: optional_f64_field(row, LATITUDE_COLUMNS),
        longitude: optional_f64_field(row, LONGITUDE_COLUMNS),
        public_remarks: string_field(row, DESCRIPTION_COLUMNS)?,
        year_built: optional_i64_field(row, YEAR_BUILT_COLUMNS),
        property_type: string_field(row, PROPERTY_TYPE_COLUMNS)?,
    })
}

/// Normalize a batch of rows, failing on the first unusable row.
pub fn normalize_rows(rows: &[RawRow]) -> Result<Vec<Property>, TransformError> {
    rows.iter().map(normalize_row).collect()
}

/// First non-null value among the accepted spellings of `columns`, probing
/// each as written, lowercase and uppercase.
fn lookup<'a>(row: &'a RawRow, columns: &[&str]) -> Option<&'a Value> {
    for column in columns {
        for candidate in [
            (*column).to_string(),
            column.to_lowercase(),
            column.to_uppercase(),
        ] {
            if let Some(value) = row.get(&candidate) {
                if !value.is_null() {
                    return Some(value);
                }
            }
        }
    }
    None
}

fn string_field(row: &RawRow, columns: &[&str]) -> Result<String, TransformError> {
    match lookup(row, columns) {
        None => Ok(String::new()),
        Some(value) => coerce_string(value).ok_or_else(|| TransformError::NonScalarValue {
            column: columns[0].to_string(),
            value: value.to_string(),
        }),
    }
}

fn f64_field(row: &RawRow, columns: &[&str]) -> f64 {
    optional_f64_field(row, columns).unwrap_or(0.0)
}

fn i64_field(row: &RawRow, columns: &[&str]) -> i64 {
    optional_i64_field(row, columns).unwrap_or(0)
}

fn optional_f64_field(row: &RawRow, columns: &[&str]) -> Option<f64> {
    lookup(row, columns).and_then(coerce_f64)
}

fn optional_i64_field(row: &RawRow, columns: &[&str]) -> Option<i64> {
    lookup(row, columns).and_then(coerce_i64)
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

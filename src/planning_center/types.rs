//! Planning Center data types.
//!
//! These types represent the data structures from the Planning Center API.

use serde_json::Value;

/// One resource from a collection response, reduced to what a listing shows.
///
/// JSON:API resources from different products carry different attributes, so
/// every field is optional and decoding never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingItem {
    /// `attributes.name`
    pub name: Option<String>,
    /// `attributes.html_url`, the public page of the resource
    pub html_url: Option<String>,
    /// `attributes.starts_at`, an RFC 3339 timestamp on events
    pub starts_at: Option<String>,
}

impl ListingItem {
    /// Create an item with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Read an item from one entry of a `data` array.
    pub fn from_resource(resource: &Value) -> Self {
        let Some(attrs) = resource.get("attributes").filter(|a| a.is_object()) else {
            return Self::default();
        };

        let name = match &attrs["name"] {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        };

        Self {
            name,
            html_url: attrs["html_url"].as_str().map(String::from),
            starts_at: attrs["starts_at"].as_str().map(String::from),
        }
    }
}

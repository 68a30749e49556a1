//! Decoded feed payload and optional-tree navigation.
//!
//! The feed is modelled as an untyped tree ([`serde_json::Value`]) rather
//! than a fixed schema: SIRI producers disagree on which sub-structures are
//! present, whether a delivery is an array or a single object, and whether
//! leaf values are numbers or text. Every navigation step returns an
//! `Option`, so a missing branch degrades to "no vehicles" instead of failing
//! the whole payload.

use serde_json::Value;

use super::config::FeedFormat;
use super::error::FetchError;
use super::record::VehicleRecord;
use super::xml;

/// Path from the document root to the vehicle-activity array.
pub const VEHICLE_ACTIVITY_PATH: [&str; 4] = [
    "Siri",
    "ServiceDelivery",
    "VehicleMonitoringDelivery",
    "VehicleActivity",
];

/// Look up `key` in `node`.
///
/// When `node` is an array the lookup applies to its first element, matching
/// how SIRI wraps single deliveries in one-element arrays. `null` values are
/// reported as absent.
pub fn child<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    let node = match node {
        Value::Array(items) => items.first()?,
        other => other,
    };
    match node.as_object()?.get(key)? {
        Value::Null => None,
        value => Some(value),
    }
}

/// Follow `path` from `node`, one [`child`] step per segment.
pub fn walk<'a>(node: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(node, |current, key| child(current, key))
}

/// View a node as a list: arrays yield their elements, a single object
/// yields itself, anything else yields nothing.
pub fn entries(node: &Value) -> &[Value] {
    match node {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(node),
        _ => &[],
    }
}

/// Records extracted from one payload, with the number of entries that were
/// skipped for lacking usable structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub records: Vec<VehicleRecord>,
    pub skipped: usize,
}

impl Extraction {
    /// Total number of vehicle-activity entries seen.
    pub fn entries(&self) -> usize {
        self.records.len() + self.skipped
    }
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A decoded feed document.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPayload {
    root: Value,
}

impl FeedPayload {
    /// Wrap an already-decoded tree.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Decode a JSON body.
    pub fn from_json(bytes: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice(bytes)
            .map(Self::from_value)
            .map_err(|e| FetchError::JsonError(e.to_string()))
    }

    /// Decode an XML body.
    pub fn from_xml(bytes: &[u8]) -> Result<Self, FetchError> {
        xml::parse_document(bytes).map(Self::from_value)
    }

    /// Decode a body in the given format.
    ///
    /// A leading UTF-8 byte-order mark is dropped first. With
    /// [`FeedFormat::Auto`] the body is treated as XML when the content type
    /// mentions `xml` or the first non-whitespace byte is `<`.
    pub fn decode(
        bytes: &[u8],
        format: FeedFormat,
        content_type: Option<&str>,
    ) -> Result<Self, FetchError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        match resolve_format(bytes, format, content_type) {
            FeedFormat::Xml => Self::from_xml(bytes),
            _ => Self::from_json(bytes),
        }
    }

    /// The vehicle-activity entries, or an empty slice when any segment of
    /// [`VEHICLE_ACTIVITY_PATH`] is absent.
    pub fn vehicle_activities(&self) -> &[Value] {
        walk(&self.root, &VEHICLE_ACTIVITY_PATH)
            .map(entries)
            .unwrap_or(&[])
    }

    /// Extract every valid vehicle record, skipping malformed entries.
    pub fn extract(&self) -> Extraction {
        let mut extraction = Extraction::default();
        for activity in self.vehicle_activities() {
            match VehicleRecord::from_activity(activity) {
                Some(record) => extraction.records.push(record),
                None => extraction.skipped += 1,
            }
        }
        extraction
    }
}

fn resolve_format(bytes: &[u8], format: FeedFormat, content_type: Option<&str>) -> FeedFormat {
    match format {
        FeedFormat::Auto => {
            let declared_xml = content_type
                .map(|ct| ct.to_ascii_lowercase().contains("xml"))
                .unwrap_or(false);
            let looks_like_xml = bytes
                .iter()
                .find(|b| !b.is_ascii_whitespace())
                .map(|b| *b == b'<')
                .unwrap_or(false);
            if declared_xml || looks_like_xml {
                FeedFormat::Xml
            } else {
                FeedFormat::Json
            }
        }
        explicit => explicit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_child_steps_into_first_array_element() {
        let tree = json!({ "Delivery": [ { "Name": "first" }, { "Name": "second" } ] });
        let delivery = child(&tree, "Delivery").unwrap();
        assert_eq!(child(delivery, "Name").unwrap(), "first");
    }

    #[test]
    fn test_child_treats_null_as_absent() {
        let tree = json!({ "MonitoredVehicleJourney": null });
        assert!(child(&tree, "MonitoredVehicleJourney").is_none());
    }

    #[test]
    fn test_child_on_scalar_is_absent() {
        assert!(child(&json!(42), "Siri").is_none());
        assert!(child(&json!("Siri"), "Siri").is_none());
        assert!(child(&json!([]), "Siri").is_none());
    }

    #[test]
    fn test_walk_stops_at_missing_segment() {
        let tree = json!({ "Siri": { "ServiceDelivery": {} } });
        assert!(walk(&tree, &VEHICLE_ACTIVITY_PATH).is_none());
        assert!(walk(&tree, &["Siri", "ServiceDelivery"]).is_some());
    }

    #[test]
    fn test_entries_accepts_single_object() {
        let single = json!({ "MonitoredVehicleJourney": {} });
        assert_eq!(entries(&single).len(), 1);
        assert_eq!(entries(&json!([1, 2, 3])).len(), 3);
        assert!(entries(&json!("text")).is_empty());
    }

    #[test]
    fn test_absent_path_yields_no_activities() {
        let payload = FeedPayload::from_json(br#"{"Siri":{"ServiceDelivery":{}}}"#).unwrap();
        assert!(payload.vehicle_activities().is_empty());

        let extraction = payload.extract();
        assert!(extraction.records.is_empty());
        assert_eq!(extraction.skipped, 0);
    }

    #[test]
    fn test_empty_delivery_array_yields_no_activities() {
        let payload = FeedPayload::from_json(
            br#"{"Siri":{"ServiceDelivery":{"VehicleMonitoringDelivery":[]}}}"#,
        )
        .unwrap();
        assert!(payload.vehicle_activities().is_empty());
    }

    #[test]
    fn test_only_first_delivery_is_read() {
        let payload = FeedPayload::from_value(json!({
            "Siri": { "ServiceDelivery": { "VehicleMonitoringDelivery": [
                { "VehicleActivity": [ {}, {} ] },
                { "VehicleActivity": [ {}, {}, {} ] }
            ] } }
        }));
        assert_eq!(payload.vehicle_activities().len(), 2);
    }

    #[test]
    fn test_extract_counts_skipped_entries() {
        let payload = FeedPayload::from_value(json!({
            "Siri": { "ServiceDelivery": { "VehicleMonitoringDelivery": [ { "VehicleActivity": [
                { "MonitoredVehicleJourney": { "VehicleLocation": { "Latitude": 43.26, "Longitude": -2.93 } } },
                { "MonitoredVehicleJourney": null },
                { "RecordedAtTime": "2025-03-01T10:00:00Z" }
            ] } ] } }
        }));

        let extraction = payload.extract();
        assert_eq!(extraction.records.len(), 1);
        assert_eq!(extraction.skipped, 2);
        assert_eq!(extraction.entries(), 3);
    }

    #[test]
    fn test_decode_invalid_json_is_error() {
        let result = FeedPayload::decode(b"{not json", FeedFormat::Json, None);
        assert!(matches!(result, Err(FetchError::JsonError(_))));
    }

    #[test]
    fn test_auto_format_sniffs_first_byte() {
        assert_eq!(
            resolve_format(b"  \n<Siri/>", FeedFormat::Auto, None),
            FeedFormat::Xml
        );
        assert_eq!(
            resolve_format(b"{\"Siri\":{}}", FeedFormat::Auto, None),
            FeedFormat::Json
        );
    }

    #[test]
    fn test_auto_format_honours_content_type() {
        assert_eq!(
            resolve_format(b"", FeedFormat::Auto, Some("Application/XML; charset=utf-8")),
            FeedFormat::Xml
        );
        assert_eq!(
            resolve_format(b"<Siri/>", FeedFormat::Json, Some("text/xml")),
            FeedFormat::Json
        );
    }

    #[test]
    fn test_decode_skips_byte_order_mark() {
        let xml = b"\xEF\xBB\xBF<?xml version=\"1.0\"?><Siri><ServiceDelivery>\
            <VehicleMonitoringDelivery><VehicleActivity><MonitoredVehicleJourney>\
            <VehicleLocation><Latitude>43.26</Latitude><Longitude>-2.93</Longitude>\
            </VehicleLocation></MonitoredVehicleJourney></VehicleActivity>\
            </VehicleMonitoringDelivery></ServiceDelivery></Siri>";
        let payload = FeedPayload::decode(xml, FeedFormat::Auto, Some("binary/octet-stream"))
            .expect("BOM-prefixed XML should decode");
        assert_eq!(payload.extract().records.len(), 1);

        let json = b"\xEF\xBB\xBF{\"Siri\":{}}";
        let payload = FeedPayload::decode(json, FeedFormat::Auto, None)
            .expect("BOM-prefixed JSON should decode");
        assert!(payload.vehicle_activities().is_empty());

        let payload = FeedPayload::decode(json, FeedFormat::Json, None);
        assert!(payload.is_ok());
    }
}

//! Wire DTOs for the aerodesk backend and the proxied chart provider.
//!
//! # Design
//! These types are decoded once from a response body and never mutated.
//! Optional wire fields are `Option<_>` and omitted on re-serialization so
//! a decoded value re-serializes to JSON equal to what the server sent
//! (object key order is not kept).
//! Audit records and raw proxy responses have no schema on this side; they
//! stay opaque (`serde_json::Value` / bytes).

use serde::{Deserialize, Serialize};

/// One page of a server-side paginated collection.
///
/// `total` is the unpaginated count on the server, not `items.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageData<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Rectangle in image-pixel space. Ordering of the corners is not checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Pixel {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Geographic rectangle matching a `Pixel` rectangle on a georeferenced chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LatLng {
    pub lng1: f64,
    pub lat1: f64,
    pub lng2: f64,
    pub lat2: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub pixels: Pixel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latlng: Option<LatLng>,
}

/// Named regions of a chart image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundingBoxes {
    pub planview: BoundingBox,
    pub minimums: BoundingBox,
    pub header: BoundingBox,
    #[serde(default)]
    pub insets: Vec<BoundingBox>,
}

/// A single chart image for one airport, as listed by the chart provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirportChartIndex {
    pub id: String,
    pub icao_airport_identifier: String,
    pub type_code: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision_approach: Option<bool>,
    pub index_number: String,
    pub name: String,
    pub revision_date: String,
    pub is_georeferenced: bool,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_boxes: Option<BoundingBoxes>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default)]
    pub runways: Vec<String>,
    pub image_day: String,
    pub image_night: String,
    pub thumb_day: String,
    pub thumb_night: String,
    pub image_day_url: String,
    pub image_night_url: String,
    pub thumb_day_url: String,
    pub thumb_night_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_url: Option<String>,
    pub dark_mode: bool,
}

/// Body of the chart provider's per-airport index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartsIndex {
    pub charts: Vec<AirportChartIndex>,
}

/// An audit log record. The backend owns its schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AuditLog(pub serde_json::Value);

/// Request payload for issuing an email verification code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailCodeRequest {
    pub email: String,
    pub cid: u32,
}

/// Response payload echoing the address the code was sent to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailCodeResponse {
    pub email: String,
}

/// Untyped body returned by the chart proxy.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyPayload {
    Json(serde_json::Value),
    Binary(Vec<u8>),
}

impl ProxyPayload {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ProxyPayload::Json(value) => Some(value),
            ProxyPayload::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ProxyPayload::Json(_) => None,
            ProxyPayload::Binary(bytes) => Some(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_latlng_is_optional() {
        let bbox: BoundingBox =
            serde_json::from_str(r#"{"pixels":{"x1":0,"y1":1,"x2":10.5,"y2":20}}"#).unwrap();
        assert!(bbox.latlng.is_none());
        assert_eq!(bbox.pixels.x2, 10.5);

        let json = serde_json::to_value(&bbox).unwrap();
        assert!(json.get("latlng").is_none());
    }

    #[test]
    fn page_data_keeps_server_total() {
        let page: PageData<AuditLog> = serde_json::from_str(
            r#"{"items":[{"id":1}],"total":45,"page":3,"page_size":20}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 45);
        assert_eq!(page.items[0].0["id"], 1);
    }

    #[test]
    fn audit_log_is_transparent() {
        let raw = r#"{"subject":"login","extra":[1,2]}"#;
        let log: AuditLog = serde_json::from_str(raw).unwrap();
        let reencoded: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&log).unwrap()).unwrap();
        let original: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(reencoded, original);
    }

    #[test]
    fn chart_without_bounding_boxes_decodes() {
        let chart: AirportChartIndex = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "icao_airport_identifier": "KSEA",
            "type_code": "AP",
            "category": "APP",
            "index_number": "11-1",
            "name": "ILS RWY 16L",
            "revision_date": "2024-01-25",
            "is_georeferenced": false,
            "width": 1700,
            "height": 2200,
            "procedures": ["I16L"],
            "runways": ["16L"],
            "image_day": "d.png",
            "image_night": "n.png",
            "thumb_day": "td.png",
            "thumb_night": "tn.png",
            "image_day_url": "https://x/d.png",
            "image_night_url": "https://x/n.png",
            "thumb_day_url": "https://x/td.png",
            "thumb_night_url": "https://x/tn.png",
            "dark_mode": true
        }))
        .unwrap();
        assert!(chart.bounding_boxes.is_none());
        assert!(chart.local_url.is_none());
        assert!(chart.precision_approach.is_none());
        assert_eq!(chart.runways, vec!["16L"]);
    }

    #[test]
    fn proxy_payload_accessors() {
        let json = ProxyPayload::Json(serde_json::json!({"a": 1}));
        assert!(json.as_bytes().is_none());
        assert_eq!(json.as_json().unwrap()["a"], 1);

        let blob = ProxyPayload::Binary(vec![0x89, b'P', b'N', b'G']);
        assert!(blob.as_json().is_none());
        assert_eq!(blob.as_bytes().unwrap().len(), 4);
    }
}

//! In-process stand-in for the aerodesk backend.
//!
//! Serves seeded audit logs, verification codes, METAR reports and a chart
//! proxy that answers for a fixed set of upstream URLs instead of relaying.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub const AUDIT_LOG_COUNT: u64 = 45;
pub const CHART_PROVIDER_PREFIX: &str = "https://charts.api-v2.navigraph.com/charts/";

/// Addresses in this domain get a response echoing a different address.
pub const STALE_EMAIL_DOMAIN: &str = "@stale.test";

/// First bytes of a PNG file; served for any proxied `.png` URL.
pub const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageData {
    pub items: Vec<Value>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page_number: u32,
    pub page_size: u32,
}

#[derive(Deserialize)]
pub struct CodeRequest {
    pub email: String,
    pub cid: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CodeResponse {
    pub email: String,
}

#[derive(Deserialize)]
pub struct MetarQuery {
    pub icao: String,
}

pub struct Fixtures {
    pub audits: Vec<Value>,
    pub metar: HashMap<&'static str, Vec<&'static str>>,
    pub charts: HashMap<&'static str, Value>,
}

pub type Shared = Arc<Fixtures>;

impl Default for Fixtures {
    fn default() -> Self {
        let audits = (1..=AUDIT_LOG_COUNT)
            .map(|id| {
                json!({
                    "id": id,
                    "subject": 1000 + id,
                    "event": "login",
                    "created_at": format!("2025-01-{:02}T00:00:00Z", id % 28 + 1),
                })
            })
            .collect();

        let metar = HashMap::from([
            ("ZBAA", vec!["ZBAA 250300Z 36004MPS CAVOK 08/M10 Q1030 NOSIG"]),
            (
                "KSEA",
                vec![
                    "KSEA 250253Z 17008KT 10SM FEW045 09/04 A3002",
                    "KSEA 250153Z 16007KT 10SM SCT050 10/04 A3001",
                ],
            ),
        ]);

        let charts = HashMap::from([("KSEA", json!({ "charts": [ksea_chart()] }))]);

        Self {
            audits,
            metar,
            charts,
        }
    }
}

fn ksea_chart() -> Value {
    json!({
        "id": "KSEA-11-1",
        "icao_airport_identifier": "KSEA",
        "type_code": "AP",
        "category": "APP",
        "precision_approach": true,
        "index_number": "11-1",
        "name": "ILS or LOC RWY 16L",
        "revision_date": "2025-01-23",
        "is_georeferenced": true,
        "width": 1700,
        "height": 2200,
        "bounding_boxes": {
            "planview": {
                "pixels": {"x1": 60, "y1": 500, "x2": 1640, "y2": 1500},
                "latlng": {"lng1": -122.5, "lat1": 47.3, "lng2": -122.1, "lat2": 47.6}
            },
            "minimums": {"pixels": {"x1": 60, "y1": 1900, "x2": 1640, "y2": 2150}},
            "header": {"pixels": {"x1": 60, "y1": 40, "x2": 1640, "y2": 480}},
            "insets": []
        },
        "procedures": ["I16L"],
        "runways": ["16L"],
        "image_day": "KSEA111_D.png",
        "image_night": "KSEA111_N.png",
        "thumb_day": "KSEA111_D_T.png",
        "thumb_night": "KSEA111_N_T.png",
        "image_day_url": "https://charts.api-v2.navigraph.com/charts/KSEA/KSEA111_D.png",
        "image_night_url": "https://charts.api-v2.navigraph.com/charts/KSEA/KSEA111_N.png",
        "thumb_day_url": "https://charts.api-v2.navigraph.com/charts/KSEA/KSEA111_D_T.png",
        "thumb_night_url": "https://charts.api-v2.navigraph.com/charts/KSEA/KSEA111_N_T.png",
        "dark_mode": true
    })
}

pub fn app() -> Router {
    let state: Shared = Arc::new(Fixtures::default());
    Router::new()
        .route("/audits", get(list_audits))
        .route("/codes", post(send_code))
        .route("/metar", get(get_metar))
        .route("/charts/{*url}", get(proxy_chart))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_audits(
    State(state): State<Shared>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageData>, StatusCode> {
    if query.page_number == 0 || query.page_size == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    let start = (query.page_number as usize - 1) * query.page_size as usize;
    let items = state
        .audits
        .iter()
        .skip(start)
        .take(query.page_size as usize)
        .cloned()
        .collect();
    Ok(Json(PageData {
        items,
        total: state.audits.len() as u64,
        page: query.page_number,
        page_size: query.page_size,
    }))
}

async fn send_code(Json(input): Json<CodeRequest>) -> Result<Json<CodeResponse>, StatusCode> {
    if input.cid == 0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    debug!(email = %input.email, cid = input.cid, "issuing verification code");
    let email = if input.email.ends_with(STALE_EMAIL_DOMAIN) {
        format!("previous{STALE_EMAIL_DOMAIN}")
    } else {
        input.email
    };
    Ok(Json(CodeResponse { email }))
}

async fn get_metar(
    State(state): State<Shared>,
    Query(query): Query<MetarQuery>,
) -> Json<Option<Vec<&'static str>>> {
    Json(state.metar.get(query.icao.as_str()).cloned())
}

/// Answers for the provider's per-airport index (matching the ICAO code
/// case-sensitively, as the provider does) and for any `.png` asset.
async fn proxy_chart(
    State(state): State<Shared>,
    Path(url): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    debug!(%url, "proxy request");
    if let Some(icao) = url.strip_prefix(CHART_PROVIDER_PREFIX) {
        if query.get("version").map(String::as_str) != Some("STD") {
            return StatusCode::BAD_REQUEST.into_response();
        }
        return match state.charts.get(icao) {
            Some(index) => Json(index.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        };
    }
    if url.ends_with(".png") {
        let mut body = PNG_MAGIC.to_vec();
        body.extend_from_slice(url.as_bytes());
        return ([(header::CONTENT_TYPE, "image/png")], body).into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}

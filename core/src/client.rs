//! Stateless HTTP request builder and response parser for the aerodesk API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller (or `Api` with a `Transport`) executes the round-trip.
//!
//! Paths and query values are interpolated verbatim. Nothing here escapes or
//! validates an ICAO code or proxied URL; the server decides what to reject.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, ResponseKind, BINARY_TIMEOUT};
use crate::types::{
    AuditLog, ChartsIndex, EmailCodeRequest, EmailCodeResponse, PageData, ProxyPayload,
};

/// Upstream chart provider endpoint, relayed through `/charts/`.
pub const CHART_PROVIDER_URL: &str = "https://charts.api-v2.navigraph.com/charts";

pub const AUDITS_PATH: &str = "/audits";

/// Synchronous, stateless client for the aerodesk API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_page_data(&self, url: &str, page: u32, page_size: u32) -> HttpRequest {
        HttpRequest::get(format!(
            "{}{url}?page_number={page}&page_size={page_size}",
            self.base_url
        ))
    }

    pub fn build_send_email_code(&self, email: &str, cid: u32) -> Result<HttpRequest, ApiError> {
        let input = EmailCodeRequest {
            email: email.to_string(),
            cid,
        };
        let body =
            serde_json::to_string(&input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::post_json(format!("{}/codes", self.base_url), body))
    }

    pub fn build_metar(&self, icao: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/metar?icao={icao}", self.base_url))
    }

    /// Relay `url` through the backend's chart proxy.
    ///
    /// Binary mode asks the transport for raw bytes and extends the timeout.
    pub fn build_proxy_request(&self, url: &str, binary: bool) -> HttpRequest {
        let mut req = HttpRequest::get(format!("{}/charts/{url}", self.base_url));
        if binary {
            req.response_kind = ResponseKind::Binary;
            req.timeout = Some(BINARY_TIMEOUT);
        }
        req
    }

    /// The provider matches airport codes case-sensitively, so `icao` is
    /// uppercased before it goes into the proxied URL.
    pub fn build_airport_charts_index(&self, icao: &str) -> HttpRequest {
        let upstream = format!("{CHART_PROVIDER_URL}/{}?version=STD", icao.to_uppercase());
        self.build_proxy_request(&upstream, false)
    }

    pub fn build_audit_logs(&self, page: u32, page_size: u32) -> HttpRequest {
        self.build_page_data(AUDITS_PATH, page, page_size)
    }

    pub fn parse_page_data<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<Option<PageData<T>>, ApiError> {
        check_status(&response)?;
        decode_nullable(&response)
    }

    /// Any status other than 200 is a plain `false`. For a 200, a body that
    /// is absent, not JSON, or lacks a string `email` is also `false`.
    pub fn parse_send_email_code(&self, email: &str, response: HttpResponse) -> bool {
        if response.status != 200 {
            return false;
        }
        let body = serde_json::from_slice::<Option<serde_json::Value>>(&response.body)
            .ok()
            .flatten();
        let echoed = body
            .as_ref()
            .and_then(|value| value.get("email"))
            .and_then(serde_json::Value::as_str)
            .map(|echoed| EmailCodeResponse {
                email: echoed.to_string(),
            });
        let accepted = email_code_accepted(response.status, echoed.as_ref(), email);
        if !accepted && body.is_some() {
            warn!(requested = email, body = %response.body_text(), "verification code response does not match request");
        }
        accepted
    }

    pub fn parse_metar(&self, response: HttpResponse) -> Result<Option<Vec<String>>, ApiError> {
        check_status(&response)?;
        decode_nullable(&response)
    }

    /// Decode according to the mode the request was built with. An absent
    /// JSON body comes back as `Value::Null`.
    pub fn parse_proxy_request(
        &self,
        kind: ResponseKind,
        response: HttpResponse,
    ) -> Result<ProxyPayload, ApiError> {
        check_status(&response)?;
        match kind {
            ResponseKind::Binary => Ok(ProxyPayload::Binary(response.body)),
            ResponseKind::Json => {
                let value: Option<serde_json::Value> = decode_nullable(&response)?;
                Ok(ProxyPayload::Json(value.unwrap_or(serde_json::Value::Null)))
            }
        }
    }

    pub fn parse_airport_charts_index(&self, response: HttpResponse) -> Result<ChartsIndex, ApiError> {
        check_status(&response)?;
        serde_json::from_slice(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_audit_logs(
        &self,
        response: HttpResponse,
    ) -> Result<Option<PageData<AuditLog>>, ApiError> {
        self.parse_page_data(response)
    }
}

/// Whether a send-code exchange succeeded: status exactly 200, a body was
/// returned, and it echoes the address that was requested.
pub fn email_code_accepted(status: u16, body: Option<&EmailCodeResponse>, email: &str) -> bool {
    status == 200 && body.is_some_and(|b| b.email == email)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body_text(),
    })
}

/// Empty bodies and a literal `null` both decode to `None`.
fn decode_nullable<T: DeserializeOwned>(response: &HttpResponse) -> Result<Option<T>, ApiError> {
    if response.is_empty_body() {
        return Ok(None);
    }
    serde_json::from_slice(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000")
    }

    fn echo(email: &str) -> EmailCodeResponse {
        EmailCodeResponse {
            email: email.to_string(),
        }
    }

    #[test]
    fn build_page_data_appends_paging_query() {
        let req = client().build_page_data("/sessions", 3, 50);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/sessions?page_number=3&page_size=50"
        );
        assert!(req.body.is_none());
        assert_eq!(req.response_kind, ResponseKind::Json);
    }

    #[test]
    fn build_audit_logs_targets_audits() {
        let req = client().build_audit_logs(2, 20);
        assert_eq!(req.path, "http://localhost:3000/audits?page_number=2&page_size=20");
    }

    #[test]
    fn build_send_email_code_posts_email_and_cid() {
        let req = client().build_send_email_code("pilot@example.com", 1234).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/codes");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"email": "pilot@example.com", "cid": 1234}));
    }

    #[test]
    fn build_metar_forwards_icao_unchanged() {
        let req = client().build_metar("zbaa");
        assert_eq!(req.path, "http://localhost:3000/metar?icao=zbaa");
    }

    #[test]
    fn build_proxy_request_json_mode_uses_defaults() {
        let req = client().build_proxy_request("https://example.com/x.json", false);
        assert_eq!(req.path, "http://localhost:3000/charts/https://example.com/x.json");
        assert_eq!(req.response_kind, ResponseKind::Json);
        assert!(req.timeout.is_none());
    }

    #[test]
    fn build_proxy_request_binary_mode_extends_timeout() {
        let req = client().build_proxy_request("https://example.com/x.png", true);
        assert_eq!(req.response_kind, ResponseKind::Binary);
        assert_eq!(req.timeout, Some(std::time::Duration::from_millis(30_000)));
    }

    #[test]
    fn build_airport_charts_index_uppercases_icao() {
        for icao in ["ksea", "KSEA", "kSeA"] {
            let req = client().build_airport_charts_index(icao);
            assert_eq!(
                req.path,
                "http://localhost:3000/charts/https://charts.api-v2.navigraph.com/charts/KSEA?version=STD"
            );
            assert_eq!(req.response_kind, ResponseKind::Json);
            assert!(req.timeout.is_none());
        }
    }

    #[test]
    fn icao_is_interpolated_without_escaping() {
        let req = client().build_metar("ZBAA&x=1");
        assert_eq!(req.path, "http://localhost:3000/metar?icao=ZBAA&x=1");
    }

    #[test]
    fn email_code_accepted_truth_table() {
        let email = "a@b.c";
        assert!(email_code_accepted(200, Some(&echo(email)), email));
        assert!(!email_code_accepted(500, Some(&echo(email)), email));
        assert!(!email_code_accepted(201, Some(&echo(email)), email));
        assert!(!email_code_accepted(200, None, email));
        assert!(!email_code_accepted(200, Some(&echo("other@b.c")), email));
    }

    #[test]
    fn parse_send_email_code_non_200_is_false_without_decoding() {
        let resp = HttpResponse::json(400, "not json at all");
        assert!(!client().parse_send_email_code("a@b.c", resp));
    }

    #[test]
    fn parse_send_email_code_null_body_is_false() {
        let resp = HttpResponse::json(200, "null");
        assert!(!client().parse_send_email_code("a@b.c", resp));
    }

    #[test]
    fn parse_send_email_code_mismatch_is_false() {
        let resp = HttpResponse::json(200, r#"{"email":"x@y.z"}"#);
        assert!(!client().parse_send_email_code("a@b.c", resp));
    }

    #[test]
    fn parse_send_email_code_match_is_true() {
        let resp = HttpResponse::json(200, r#"{"email":"a@b.c"}"#);
        assert!(client().parse_send_email_code("a@b.c", resp));
    }

    #[test]
    fn parse_send_email_code_malformed_200_bodies_are_false() {
        for body in [
            "{}",
            r#"{"email":null}"#,
            r#"{"status":"ok"}"#,
            r#""queued""#,
            "[]",
            "",
            "not json",
        ] {
            let resp = HttpResponse::json(200, body);
            assert!(!client().parse_send_email_code("a@b.c", resp), "body {body:?}");
        }
        let resp = HttpResponse::json(200, "{}");
        assert!(!client().parse_send_email_code("", resp));
    }

    #[test]
    fn parse_page_data_null_body_is_none() {
        let page = client()
            .parse_page_data::<AuditLog>(HttpResponse::json(200, "null"))
            .unwrap();
        assert!(page.is_none());
        let page = client()
            .parse_page_data::<AuditLog>(HttpResponse::json(200, ""))
            .unwrap();
        assert!(page.is_none());
    }

    #[test]
    fn parse_page_data_server_error() {
        let err = client()
            .parse_page_data::<AuditLog>(HttpResponse::json(500, "boom"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_metar_returns_reports() {
        let resp = HttpResponse::json(200, r#"["ZBAA 250300Z 36004MPS CAVOK 08/M10 Q1030 NOSIG"]"#);
        let metar = client().parse_metar(resp).unwrap().unwrap();
        assert_eq!(metar, vec!["ZBAA 250300Z 36004MPS CAVOK 08/M10 Q1030 NOSIG"]);
    }

    #[test]
    fn parse_metar_bad_json() {
        let err = client()
            .parse_metar(HttpResponse::json(200, "{not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_proxy_request_binary_keeps_bytes() {
        let resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: vec![0x89, b'P', b'N', b'G', 0x00, 0xff],
        };
        let payload = client().parse_proxy_request(ResponseKind::Binary, resp).unwrap();
        assert_eq!(payload, ProxyPayload::Binary(vec![0x89, b'P', b'N', b'G', 0x00, 0xff]));
    }

    #[test]
    fn parse_proxy_request_json_empty_is_null() {
        let payload = client()
            .parse_proxy_request(ResponseKind::Json, HttpResponse::json(200, ""))
            .unwrap();
        assert_eq!(payload, ProxyPayload::Json(serde_json::Value::Null));
    }

    #[test]
    fn parse_proxy_request_not_found() {
        let err = client()
            .parse_proxy_request(ResponseKind::Binary, HttpResponse::json(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_airport_charts_index_empty_list() {
        let index = client()
            .parse_airport_charts_index(HttpResponse::json(200, r#"{"charts":[]}"#))
            .unwrap();
        assert!(index.charts.is_empty());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        let req = client.build_metar("ZSSS");
        assert_eq!(req.path, "http://localhost:3000/metar?icao=ZSSS");
    }
}

//! Asynchronous operations: build, execute once, parse.
//!
//! Each method issues exactly one request through the `Transport` and holds
//! no state between calls, so an `Api` can be shared freely across tasks.

use serde::de::DeserializeOwned;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AuditLog, ChartsIndex, PageData, ProxyPayload};

#[derive(Debug, Clone)]
pub struct Api<T> {
    client: ApiClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: ApiClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get_page_data<D: DeserializeOwned>(
        &self,
        url: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Option<PageData<D>>, ApiError> {
        let req = self.client.build_page_data(url, page, page_size);
        let response = self.transport.execute(req).await?;
        self.client.parse_page_data(response)
    }

    /// Ask the backend to mail a verification code. `Ok(false)` means the
    /// request went through but was not accepted.
    pub async fn send_email_code(&self, email: &str, cid: u32) -> Result<bool, ApiError> {
        let req = self.client.build_send_email_code(email, cid)?;
        let response = self.transport.execute(req).await?;
        Ok(self.client.parse_send_email_code(email, response))
    }

    pub async fn get_metar(&self, icao: &str) -> Result<Option<Vec<String>>, ApiError> {
        let req = self.client.build_metar(icao);
        let response = self.transport.execute(req).await?;
        self.client.parse_metar(response)
    }

    pub async fn send_proxy_request(
        &self,
        url: &str,
        binary: bool,
    ) -> Result<ProxyPayload, ApiError> {
        let req = self.client.build_proxy_request(url, binary);
        let kind = req.response_kind;
        let response = self.transport.execute(req).await?;
        self.client.parse_proxy_request(kind, response)
    }

    pub async fn get_airport_charts_index(&self, icao: &str) -> Result<ChartsIndex, ApiError> {
        let req = self.client.build_airport_charts_index(icao);
        let response = self.transport.execute(req).await?;
        self.client.parse_airport_charts_index(response)
    }

    pub async fn get_audit_logs(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Option<PageData<AuditLog>>, ApiError> {
        let req = self.client.build_audit_logs(page, page_size);
        let response = self.transport.execute(req).await?;
        self.client.parse_audit_logs(response)
    }
}

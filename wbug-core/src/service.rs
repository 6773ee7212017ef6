use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::data;
use crate::model::{Alert, Forecasts, Location, Station};
use crate::xml::{Document, XmlError};

/// Default endpoint for the WeatherBug XML API.
const DEFAULT_BASE_URL: &str = "http://api.wxbug.net";

/// Error raised by a remote call to the WeatherBug API.
///
/// The binding layer itself never raises this kind; sparse or malformed
/// fields come back as defaults and skipped records. Only the transport, a
/// non-success status, or an unparseable response body surface here.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to the WeatherBug API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("WeatherBug API request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse WeatherBug API response: {0}")]
    Xml(#[from] XmlError),
}

/// Client for the WeatherBug XML API.
#[derive(Debug, Clone)]
pub struct WeatherBugService {
    api_code: String,
    base_url: String,
    http: Client,
}

impl WeatherBugService {
    pub fn new(api_code: String) -> Self {
        Self::with_base_url(api_code, DEFAULT_BASE_URL.to_string())
    }

    /// Points the client at a different endpoint; used by tests.
    pub fn with_base_url(api_code: String, base_url: String) -> Self {
        Self { api_code, base_url, http: Client::new() }
    }

    /// Searches for locations matching a city name or postal code.
    pub async fn locations(&self, search: &str) -> Result<Vec<Location>, ServiceError> {
        let doc = self.fetch("getLocationsXML.aspx", &[("SearchString", search)]).await?;
        Ok(data::bind(doc.root(), "aws:locations/aws:location"))
    }

    /// Lists the weather stations around a ZIP code.
    pub async fn stations(&self, zip_code: &str) -> Result<Vec<Station>, ServiceError> {
        let doc = self.fetch("getStationsXML.aspx", &[("zipCode", zip_code)]).await?;
        Ok(data::bind(doc.root(), "aws:stations/aws:station"))
    }

    /// Lists the active severe weather alerts for a ZIP code.
    pub async fn alerts(&self, zip_code: &str) -> Result<Vec<Alert>, ServiceError> {
        let doc = self.fetch("getAlertsXML.aspx", &[("zipCode", zip_code)]).await?;
        Ok(data::bind(doc.root(), "aws:alerts/aws:alert"))
    }

    /// Fetches the seven day forecast for a ZIP code.
    ///
    /// `None` means the response carried no bindable forecast data.
    pub async fn forecasts(&self, zip_code: &str) -> Result<Option<Forecasts>, ServiceError> {
        let doc = self.fetch("getForecastXML.aspx", &[("zipCode", zip_code)]).await?;
        Ok(data::bind_single(doc.root(), "/aws:weather"))
    }

    async fn fetch(
        &self,
        page: &str,
        query: &[(&str, &str)],
    ) -> Result<Document, ServiceError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), page);
        tracing::debug!(%url, "requesting WeatherBug endpoint");

        let res = self
            .http
            .get(&url)
            .query(&[("ACode", self.api_code.as_str())])
            .query(query)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ServiceError::Status { status, body: truncate_body(&body) });
        }

        Ok(Document::parse(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

use std::time::Duration;

use insights_logging::insight_debug;
use url::Url;

use crate::{
    ApiError, FailureKind, JobStatus, JobTicket, StatusResponse, SubmitRequest, SubmitResponse,
};

/// Production deployment of the pricing-insights service.
pub const DEFAULT_BASE_URL: &str = "https://pricegpt-production-4ec0.up.railway.app";

/// Endpoint for both submitting a page and polling a job.
pub const INSIGHTS_PATH: &str = "/v1/api/pricing_insights";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait InsightsApi: Send + Sync {
    /// Start an analysis of `pricing_page_url`.
    async fn submit(&self, pricing_page_url: &str) -> Result<JobTicket, ApiError>;

    /// Fetch the current status of `ticket`, decoding insights once finished.
    async fn status(&self, ticket: &JobTicket) -> Result<JobStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestInsightsApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl ReqwestInsightsApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let endpoint = endpoint_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl InsightsApi for ReqwestInsightsApi {
    async fn submit(&self, pricing_page_url: &str) -> Result<JobTicket, ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SubmitRequest { pricing_page_url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body: SubmitResponse = read_json(response).await?;
        insight_debug!("submit accepted url={} uuid={}", pricing_page_url, body.request_uuid);
        Ok(JobTicket::new(body.request_uuid))
    }

    async fn status(&self, ticket: &JobTicket) -> Result<JobStatus, ApiError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("uuid", ticket.uuid.as_str())])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body: StatusResponse = read_json(response).await?;
        insight_debug!(
            "status uuid={} status={} insights_json_len={:?}",
            ticket,
            body.status,
            body.insights_json.as_ref().map(String::len)
        );
        body.into_status()
    }
}

fn endpoint_url(base_url: &str) -> Result<Url, ApiError> {
    let base = Url::parse(base_url.trim())
        .map_err(|err| ApiError::new(FailureKind::InvalidBaseUrl, err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ApiError::new(
            FailureKind::InvalidBaseUrl,
            format!("unsupported scheme {}", base.scheme()),
        ));
    }
    // Keep any path prefix on the base; `join` would drop its last segment.
    let prefix = base.path().trim_end_matches('/').to_string();
    let mut endpoint = base;
    endpoint.set_path(&format!("{prefix}{INSIGHTS_PATH}"));
    endpoint.set_query(None);
    Ok(endpoint)
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::new(FailureKind::MalformedResponse, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_insights_path() {
        let url = endpoint_url("https://api.example.com").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/api/pricing_insights");
    }

    #[test]
    fn endpoint_keeps_base_prefix() {
        let url = endpoint_url("http://localhost:8080/proxy/").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/v1/api/pricing_insights"
        );
    }

    #[test]
    fn endpoint_rejects_bad_base() {
        let err = endpoint_url("not a url").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidBaseUrl);

        let err = endpoint_url("ftp://example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidBaseUrl);
    }
}

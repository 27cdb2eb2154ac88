use crate::config;
use crate::logging::*;
use crate::messages::{Locale, Messages};
use crate::request::{AnalysisRequest, ImageFile};
use crate::ui::Notifier;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use std::result::Result;
use std::sync::Arc;


/// Whatever JSON the analysis service answers with. Passed through as is.
pub type AnalysisResult = serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
    #[error("failed to build request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Anything the click handler can ask for an analysis.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    async fn fetch_analysis_data(
        &self,
        name: &str,
        image: Option<ImageFile>,
    ) -> Option<AnalysisResult>;
}

pub struct Dispatcher {
    client: reqwest::Client,
    endpoint: Url,
    notifier: Arc<dyn Notifier>,
    messages: &'static Messages,
}

impl Dispatcher {
    pub fn new(endpoint: &str, notifier: Arc<dyn Notifier>, locale: Locale) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint).map_err(|err| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        })?;
        Ok(Dispatcher {
            client: reqwest::Client::new(),
            endpoint,
            notifier,
            messages: locale.messages(),
        })
    }

    /// Reads `ANALYZE_ENDPOINT` from the configuration.
    pub fn from_config(notifier: Arc<dyn Notifier>, locale: Locale) -> anyhow::Result<Self> {
        let endpoint = config::get("ANALYZE_ENDPOINT")?;
        Ok(Dispatcher::new(&endpoint, notifier, locale)?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build(&self, request: &AnalysisRequest) -> Result<RequestBuilder, Error> {
        match request {
            AnalysisRequest::Upload { name, image } => {
                let part = Part::bytes(image.bytes.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(&image.mime_type)
                    .map_err(Error::Request)?;
                let mut form = Form::new().part("image", part);
                if let Some(name) = name {
                    form = form.text("name", name.clone());
                }
                Ok(self.client.post(self.endpoint.clone()).multipart(form))
            }
            AnalysisRequest::Query { name } => Ok(self
                .client
                .get(self.endpoint.clone())
                .query(&[("query", name.as_str())])),
        }
    }

    /// Sends the request and decodes the JSON answer, keeping the failure typed.
    pub async fn send(&self, request: &AnalysisRequest) -> Result<AnalysisResult, Error> {
        let log = DEFAULT.new(o!(
            "function" => "send",
            "name" => request.name().unwrap_or_default().to_string(),
            "has_image" => request.has_image(),
        ));
        debug!(log, "sending analysis request"; "endpoint" => %self.endpoint);

        let response = self
            .build(request)?
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let body = response.bytes().await.map_err(Error::Transport)?;
        let result = serde_json::from_slice(&body)?;
        debug!(log, "analysis received"; "status" => %status, "bytes" => body.len());
        Ok(result)
    }

    /// Returns `None` without touching the network when both inputs are empty.
    ///
    /// Every failure is logged, reported through a single alert and turned
    /// into `None`.
    pub async fn fetch_analysis_data(
        &self,
        name: &str,
        image: Option<ImageFile>,
    ) -> Option<AnalysisResult> {
        let log = DEFAULT.new(o!("function" => "fetch_analysis_data"));
        let request = AnalysisRequest::from_form(name, image)?;

        match self.send(&request).await {
            Ok(result) => Some(result),
            Err(err) => {
                error!(log, "Error fetching analysis data"; "error" => %err);
                self.notifier.alert(self.messages.fetch_failed);
                None
            }
        }
    }

    /// Probes `/health` on the endpoint's host.
    pub async fn check_health(&self) -> Result<HealthStatus, Error> {
        let log = DEFAULT.new(o!("function" => "check_health"));
        let url = self
            .endpoint
            .join("/health")
            .map_err(|err| Error::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
                message: err.to_string(),
            })?;
        info!(log, "checking service health"; "url" => %url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }
        let body = response.bytes().await.map_err(Error::Transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl AnalysisSource for Dispatcher {
    async fn fetch_analysis_data(
        &self,
        name: &str,
        image: Option<ImageFile>,
    ) -> Option<AnalysisResult> {
        Dispatcher::fetch_analysis_data(self, name, image).await
    }
}

use super::error::{CollateXError, Result};
use super::request::CollationRequest;
use super::result::{AlignmentResult, CollationOutput, ResultFormat};
use super::transport::{HttpTransport, RawResponse, Transport};
use super::witness::Witness;
use crate::config::ClientConfig;
use crate::table::{render, DisplayColumn};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Main CollateX client
///
/// Pairs a request configuration with a transport. Each `collate` call
/// performs exactly one round trip and resolves exactly once.
#[derive(Clone)]
pub struct CollationClient {
    transport: Arc<dyn Transport>,
    request: CollationRequest,
}

impl CollationClient {
    /// Create a client over any transport
    pub fn new(transport: Arc<dyn Transport>, request: CollationRequest) -> Self {
        CollationClient { transport, request }
    }

    /// Create an HTTP client from a loaded configuration
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.base_url.as_deref(), config.timeout)?;
        Ok(Self::new(Arc::new(transport), config.request()))
    }

    /// Create an HTTP client from environment variables
    ///
    /// See `ClientConfig::from_env` for the variables read.
    pub fn from_env() -> Result<Self> {
        Self::connect(&ClientConfig::from_env()?)
    }

    pub fn request(&self) -> &CollationRequest {
        &self.request
    }

    /// Copy of this client with a different configuration
    ///
    /// The transport is shared; requests already issued keep the
    /// configuration they were sent with.
    pub fn with_request(&self, request: CollationRequest) -> Self {
        CollationClient {
            transport: Arc::clone(&self.transport),
            request,
        }
    }

    /// Send witnesses for collation and return the raw response text
    ///
    /// Non-success statuses surface as `CollateXError::Transport`; there is no retry.
    pub async fn collate(&self, format: ResultFormat, witnesses: &[Witness]) -> Result<String> {
        let request_id = Uuid::new_v4();
        let body = self.request.body(witnesses)?;

        debug!(
            %request_id,
            url = self.request.service_url(),
            accept = format.mime_type(),
            algorithm = %self.request.algorithm(),
            witnesses = witnesses.len(),
            "Sending collation request"
        );

        let response = self
            .transport
            .post(self.request.service_url(), format.mime_type(), body)
            .await?;

        check_status(request_id, response)
    }

    /// Collate and parse the response into its tagged representation
    pub async fn fetch(
        &self,
        format: ResultFormat,
        witnesses: &[Witness],
    ) -> Result<CollationOutput> {
        let body = self.collate(format, witnesses).await?;
        CollationOutput::parse(format, body)
    }

    /// Alignment table as structured data
    pub async fn to_json(&self, witnesses: &[Witness]) -> Result<AlignmentResult> {
        let body = self.collate(ResultFormat::Json, witnesses).await?;
        AlignmentResult::from_json(&body)
    }

    /// TEI parallel segmentation markup
    pub async fn to_tei(&self, witnesses: &[Witness]) -> Result<String> {
        self.collate(ResultFormat::Tei, witnesses).await
    }

    /// Variant graph as SVG markup
    pub async fn to_svg(&self, witnesses: &[Witness]) -> Result<String> {
        self.collate(ResultFormat::Svg, witnesses).await
    }

    /// Variant graph as GraphViz dot source
    pub async fn to_graphviz(&self, witnesses: &[Witness]) -> Result<String> {
        self.collate(ResultFormat::GraphViz, witnesses).await
    }

    /// Variant graph as GraphML markup
    pub async fn to_graphml(&self, witnesses: &[Witness]) -> Result<String> {
        self.collate(ResultFormat::GraphMl, witnesses).await
    }

    /// Collate as JSON and render the alignment table
    pub async fn to_table(&self, witnesses: &[Witness]) -> Result<Vec<DisplayColumn>> {
        let result = self.to_json(witnesses).await?;
        render(&result)
    }
}

fn check_status(request_id: Uuid, response: RawResponse) -> Result<String> {
    if !response.is_success() {
        warn!(
            %request_id,
            status = response.status,
            status_text = %response.status_text,
            "Collation request failed"
        );
        return Err(CollateXError::Transport {
            status: response.status,
            status_text: response.status_text,
        });
    }

    info!(
        %request_id,
        status = response.status,
        content_type = response.content_type.as_deref().unwrap_or(""),
        bytes = response.body.len(),
        "Collation response received"
    );
    Ok(response.body)
}

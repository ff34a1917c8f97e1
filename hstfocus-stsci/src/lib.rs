//! hstfocus-stsci
//!
//! Production [`FocusModelProvider`] backed by the focus-model web tool
//! hosted at the Space Telescope Science Institute. The tool exposes a web
//! form, not an API: a POST to its CGI script makes the server generate the
//! output files, and a follow-up GET retrieves the plaintext table (or the
//! rendered PNG plot) from a predictable file name.
//!
//! The model queries 5-minute interval temperature telemetry from 2003
//! onwards; requesting windows outside a camera's operational period will
//! produce model values regardless, so callers must pick sensible dates.
#![warn(missing_docs)]

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use url::Url;

use hstfocus_core::{FocusError, FocusModelProvider, ModelTableRequest};

/// Stable provider name used in logs and error messages.
pub const PROVIDER_NAME: &str = "stsci";

const DEFAULT_BASE_URL: &str = "http://focustool.stsci.edu";
const DEFAULT_USER_AGENT: &str = concat!("hstfocus/", env!("CARGO_PKG_VERSION"));
const REQUEST_PATH: &str = "/cgi-bin/control3.py";

/// Connector for the STScI focus tool.
///
/// Construct through [`StsciConnector::builder`]; the endpoint and HTTP
/// client are injected there rather than read from ambient globals.
pub struct StsciConnector {
    http: reqwest::Client,
    base_url: Url,
}

/// Builder for [`StsciConnector`].
#[derive(Default)]
pub struct StsciBuilder {
    base_url: Option<Url>,
    http: Option<reqwest::Client>,
    user_agent: Option<String>,
}

impl StsciBuilder {
    /// Point the connector at a different server (tests, mirrors).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Supply a preconfigured `reqwest::Client`; overrides `user_agent`.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// User agent for the internally built client.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// `Provider` if the internal HTTP client cannot be constructed, or
    /// `InvalidArg` if the default base URL fails to parse (unreachable with
    /// the shipped constant).
    pub fn build(self) -> Result<StsciConnector, FocusError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| FocusError::InvalidArg(format!("bad base url: {e}")))?,
        };
        let http = match self.http {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(
                    self.user_agent
                        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                )
                .build()
                .map_err(|e| FocusError::provider(PROVIDER_NAME, e.to_string()))?,
        };
        Ok(StsciConnector { http, base_url })
    }
}

impl StsciConnector {
    /// Returns an unconfigured builder pointing at the public STScI server.
    #[must_use]
    pub fn builder() -> StsciBuilder {
        StsciBuilder::default()
    }

    fn endpoint(&self, path: &str) -> Result<Url, FocusError> {
        self.base_url
            .join(path)
            .map_err(|e| FocusError::InvalidArg(format!("bad endpoint {path:?}: {e}")))
    }

    fn transport(e: &reqwest::Error) -> FocusError {
        FocusError::provider(PROVIDER_NAME, e.to_string())
    }

    /// The server's "generated but empty" responses phrase the absence of
    /// model output rather than using an HTTP status.
    fn looks_like_no_data(body: &str) -> bool {
        let b = body.to_ascii_lowercase();
        b.contains("no data") || b.contains("no model output")
    }

    /// File name the CGI script writes the table (or plot) under.
    fn output_path(req: &ModelTableRequest, kind: &str, ext: &str) -> String {
        format!(
            "/images/focus{kind}{}.{}_{}-{}.{ext}",
            req.year,
            req.date_stamp(),
            req.start.file_stamp(),
            req.stop.file_stamp()
        )
    }

    /// First protocol step: POST the form controls so the server generates
    /// the output files for this window.
    async fn generate(&self, req: &ModelTableRequest) -> Result<(), FocusError> {
        let form = [
            ("Output", "Model".to_string()),
            ("Year", req.year.to_string()),
            ("Camera", req.camera.as_str().to_string()),
            ("Date", req.date_param()),
            ("Start", req.start.param()),
            ("Stop", req.stop.param()),
        ];
        tracing::debug!(window = %req.label(), "generating model output");
        let response = self
            .http
            .post(self.endpoint(REQUEST_PATH)?)
            .form(&form)
            .send()
            .await
            .map_err(|e| Self::transport(&e))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FocusError::provider(
                PROVIDER_NAME,
                format!("model generation failed: {status}"),
            ))
        }
    }

    /// Second protocol step: retrieve one generated file.
    async fn retrieve(
        &self,
        req: &ModelTableRequest,
        kind: &str,
        ext: &str,
        accept: &str,
    ) -> Result<reqwest::Response, FocusError> {
        let url = self.endpoint(&Self::output_path(req, kind, ext))?;
        let response = self
            .http
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| Self::transport(&e))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(FocusError::no_data(format!(
                "model output for {}",
                req.label()
            ))),
            status if !status.is_success() => Err(FocusError::provider(
                PROVIDER_NAME,
                format!("output retrieval failed: {status}"),
            )),
            _ => Ok(response),
        }
    }
}

#[async_trait]
impl FocusModelProvider for StsciConnector {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn model_table(&self, req: &ModelTableRequest) -> Result<String, FocusError> {
        self.generate(req).await?;
        let response = self.retrieve(req, "data", "txt", "text/plain").await?;
        let body = response.text().await.map_err(|e| Self::transport(&e))?;
        if Self::looks_like_no_data(&body) {
            return Err(FocusError::no_data(format!(
                "model output for {}",
                req.label()
            )));
        }
        Ok(body)
    }

    async fn model_plot(&self, req: &ModelTableRequest) -> Result<Vec<u8>, FocusError> {
        self.generate(req).await?;
        let response = self.retrieve(req, "plot", "png", "image/png").await?;
        let bytes = response.bytes().await.map_err(|e| Self::transport(&e))?;
        Ok(bytes.to_vec())
    }
}

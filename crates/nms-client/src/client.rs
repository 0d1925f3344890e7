use nms_config::ApiConfig;
use nms_core::{Error, Result};
use reqwest::{Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Error body sent by the orchestrator on 4xx/5xx.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the orchestrator REST API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::from_config(&ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Configuration(format!("invalid base url '{}': {}", config.base_url, e))
        })?;

        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        if let Some(path) = &config.ca_cert_path {
            let pem = read_pem(path)?;
            let roots = reqwest::Certificate::from_pem_bundle(&pem)
                .map_err(|e| Error::Configuration(format!("invalid CA bundle '{}': {}", path, e)))?;
            for root in roots {
                builder = builder.add_root_certificate(root);
            }
        }

        match (&config.client_cert_path, &config.client_key_path) {
            (Some(cert), Some(key)) => {
                let mut pem = read_pem(cert)?;
                pem.extend(read_pem(key)?);
                let identity = reqwest::Identity::from_pem(&pem).map_err(|e| {
                    Error::Configuration(format!("invalid client certificate '{}': {}", cert, e))
                })?;
                builder = builder.identity(identity);
            }
            (None, None) => {}
            _ => {
                return Err(Error::Configuration(
                    "client_cert_path and client_key_path must be set together".to_string(),
                ))
            }
        }

        let http = builder
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    pub(crate) fn url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::Configuration(format!("base url '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.send(Method::GET, url, None::<&()>).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<()> {
        self.send(Method::PUT, url, Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<()> {
        self.send(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<()> {
        self.send(Method::DELETE, url, None::<&()>).await?;
        Ok(())
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response> {
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Best effort: the body may be empty or not JSON at all.
        let message = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message),
            Err(_) => None,
        };
        Err(Error::Http {
            status: status.as_u16(),
            message,
        })
    }
}

fn read_pem(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::Configuration(format!("failed to read '{}': {}", path, e)))
}

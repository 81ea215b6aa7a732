use reqwest::{header, Client};
use serde_json::Value;

use super::{ApiRequest, ApiResponse, CsrfSource, Transport};
use crate::{
    config::{ClientConfig, CSRF_HEADER},
    error::ApiError,
};

/// reqwest-backed transport. In the browser this goes through `fetch` with
/// credentials included so the session and CSRF cookies travel along.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
    csrf: CsrfSource,
}

impl HttpTransport {
    pub fn new(config: ClientConfig, csrf: CsrfSource) -> Result<Self, ApiError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let client = builder.build()?;

        Ok(Self::with_client(client, config, csrf))
    }

    pub fn with_client(client: Client, config: ClientConfig, csrf: CsrfSource) -> Self {
        Self {
            client,
            config,
            csrf,
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.config.endpoint(&request.path);
        let mut builder = self
            .client
            .request(request.method, &url)
            .header(header::ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = self.csrf.token() {
            builder = builder.header(CSRF_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(v) => v,
                // Error pages are usually HTML; keep them for the error message.
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => return Err(e.into()),
            }
        };

        Ok(ApiResponse { status, body })
    }
}

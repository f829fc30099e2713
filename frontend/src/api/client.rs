use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    api::types::{ApiError, ErrorBody},
    config,
};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    timeout: Duration,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self::build(None, config::current().request_timeout())
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self::build(Some(base_url.into()), config::current().request_timeout())
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self::build(self.base_url, timeout)
    }

    fn build(base_url: Option<String>, timeout: Duration) -> Self {
        Self {
            client: build_http_client(timeout),
            base_url,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        let base = if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        };
        base.trim_end_matches('/').to_string()
    }

    pub(crate) async fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.resolved_base_url().await, path)
    }

    /// Sends `request`, mapping transport failures and the client deadline to `ApiError`.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        #[cfg(target_arch = "wasm32")]
        let result = with_deadline(request.send(), self.timeout).await?;
        #[cfg(not(target_arch = "wasm32"))]
        let result = request.send().await;

        result.map_err(|err| {
            if err.is_timeout() {
                timeout_error()
            } else if err.is_builder() {
                ApiError::unknown(format!("Invalid request: {}", err))
            } else {
                ApiError::request_failed(format!("Request failed: {}", err))
            }
        })
    }

    pub(crate) async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::parse(format!("Failed to parse response: {}", e)))
        } else {
            let detail = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
                .and_then(|body| body.message());
            log::debug!("request failed with status {}", status.as_u16());
            Err(ApiError::http(status.as_u16(), detail))
        }
    }
}

fn timeout_error() -> ApiError {
    ApiError::timeout("The server took too long to respond. Please try again.")
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|err| {
        log::warn!("falling back to default http client: {}", err);
        Client::new()
    })
}

#[cfg(target_arch = "wasm32")]
fn build_http_client(_timeout: Duration) -> Client {
    Client::new()
}

#[cfg(target_arch = "wasm32")]
async fn with_deadline<F: std::future::Future>(
    fut: F,
    timeout: Duration,
) -> Result<F::Output, ApiError> {
    use futures::future::{select, Either};

    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    let deadline = gloo_timers::future::TimeoutFuture::new(millis);
    futures::pin_mut!(fut);
    futures::pin_mut!(deadline);
    match select(fut, deadline).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(timeout_error()),
    }
}

pub(crate) fn with_bearer(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header(header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Guest routes are addressed by an HttpOnly cookie, so the browser must send it.
pub(crate) fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    #[cfg(target_arch = "wasm32")]
    {
        request.fetch_credentials_include()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        request
    }
}

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

pub(crate) fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_keeps_slug_characters() {
        assert_eq!(path_segment("guy-fawkes"), "guy-fawkes");
        assert_eq!(path_segment("ada_lovelace"), "ada_lovelace");
        assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn with_timeout_keeps_base_url() {
        let client = ApiClient::new_with_base_url("http://example.test")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(client.timeout(), Duration::from_millis(250));
        assert_eq!(client.base_url.as_deref(), Some("http://example.test"));
    }
}

//! HTTP transport used to talk to node APIs

use crate::{NetworkError, NetworkResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Raw response returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON. Non-2xx responses are rejected before decoding.
    pub fn decode_json<T: DeserializeOwned>(&self, url: &str) -> NetworkResult<T> {
        if !self.is_success() {
            return Err(NetworkError::HttpStatus {
                status: self.status,
                url: url.to_string(),
            });
        }

        serde_json::from_str(&self.body)
            .map_err(|e| NetworkError::Decode(format!("{} from {}", e, url)))
    }
}

/// Issues GET requests against node APIs
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a GET request with the given query parameters
    async fn get(&self, url: &str, query: &[(&str, String)]) -> NetworkResult<HttpResponse>;
}

/// GET `url` and decode the JSON body, bounded by `timeout`.
///
/// An elapsed timeout is reported as [`NetworkError::Timeout`] so callers can
/// treat it like any other connection failure.
pub async fn get_json<T, D>(
    transport: &T,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> NetworkResult<D>
where
    T: HttpTransport + ?Sized,
    D: DeserializeOwned,
{
    let response = tokio::time::timeout(timeout, transport.get(url, query))
        .await
        .map_err(|_| NetworkError::Timeout)??;

    response.decode_json(url)
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> NetworkResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::Config(format!("HTTP client error: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> NetworkResult<HttpResponse> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        success: bool,
    }

    #[test]
    fn test_decode_rejects_error_status() {
        let response = HttpResponse::new(500, r#"{"success":true}"#);
        let result: NetworkResult<Ping> = response.decode_json("http://10.0.0.1:4001/x");
        assert!(matches!(
            result,
            Err(NetworkError::HttpStatus { status: 500, .. })
        ));
    }

    #[test]
    fn test_decode_malformed_body() {
        let response = HttpResponse::new(200, "<html>not json</html>");
        let result: NetworkResult<Ping> = response.decode_json("http://10.0.0.1:4001/x");
        assert!(matches!(result, Err(NetworkError::Decode(_))));
    }

    #[tokio::test]
    async fn test_get_json_decodes() {
        let transport = ScriptedTransport::new().json("http://10.0.0.1:4001/ping", r#"{"success":true}"#);

        let ping: Ping = get_json(
            &transport,
            "http://10.0.0.1:4001/ping",
            &[],
            Duration::from_secs(5),
        )
        .await
        .unwrap();

        assert_eq!(ping, Ping { success: true });
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_json_times_out() {
        let transport = ScriptedTransport::new().hang("http://10.0.0.1:4001/ping");

        let result: NetworkResult<Ping> = get_json(
            &transport,
            "http://10.0.0.1:4001/ping",
            &[],
            Duration::from_secs(2),
        )
        .await;

        assert!(matches!(result, Err(NetworkError::Timeout)));
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::new(Duration::from_secs(10)).is_ok());
    }
}

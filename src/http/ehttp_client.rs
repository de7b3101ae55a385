use super::{HttpClient, HttpConfig, HttpError, HttpResponse, HttpResult};
use async_trait::async_trait;
use std::collections::HashMap;

/// HTTP client using ehttp for WASM and native compatibility
///
/// ehttp works in both WASM and native environments without requiring tokio.
pub struct EhttpClient {
    config: HttpConfig,
}

impl EhttpClient {
    /// Create a new ehttp client with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new ehttp client with custom configuration
    pub fn with_config(config: HttpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Convert ehttp error to our error type
    fn convert_error(&self, error: String) -> HttpError {
        // ehttp only reports string errors
        if error.contains("timeout") || error.contains("Timeout") {
            HttpError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else if error.contains("connection") || error.contains("Connection") {
            HttpError::Network { message: error }
        } else {
            HttpError::RequestFailed { message: error }
        }
    }

    /// Convert ehttp response to our response type
    fn convert_response(response: ehttp::Response) -> HttpResponse {
        let mut headers = HashMap::new();
        for (key, value) in response.headers {
            headers.insert(key, value);
        }

        HttpResponse {
            status: response.status,
            body: response.bytes,
            headers,
        }
    }

    fn build_headers(&self) -> ehttp::Headers {
        let mut headers = ehttp::Headers::default();
        for (key, value) in &self.config.default_headers {
            headers.insert(key.clone(), value.clone());
        }
        headers.insert("User-Agent".to_string(), self.config.user_agent.clone());
        headers
    }

    fn build_request(&self, method: &str, url: &str) -> ehttp::Request {
        let mut request = ehttp::Request::get(url);
        request.method = method.to_string();
        request.headers = self.build_headers();
        request
    }

    /// Execute an HTTP request, yielding until ehttp delivers the response
    ///
    /// ehttp has no per-request timeout; on wasm the browser's fetch limits apply.
    async fn execute_request(&self, method: &str, url: &str) -> HttpResult<HttpResponse> {
        let request = self.build_request(method, url);
        tracing::debug!("{} {}", method, url);

        ehttp::fetch_async(request)
            .await
            .map(Self::convert_response)
            .map_err(|error| self.convert_error(error))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl HttpClient for EhttpClient {
    async fn get(&self, url: &str) -> HttpResult<HttpResponse> {
        self.execute_request("GET", url).await
    }

    async fn test_connectivity(&self, url: &str) -> HttpResult<()> {
        let response = self.execute_request("HEAD", url).await?;

        if response.status >= 200 && response.status < 400 {
            Ok(())
        } else {
            Err(HttpError::HttpStatus {
                status: response.status,
            })
        }
    }
}

impl Default for EhttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_ehttp_client_with_config() {
        let config = HttpConfig::new()
            .with_timeout(Duration::from_secs(10))
            .with_user_agent("test-agent");

        let client = EhttpClient::with_config(config);
        assert_eq!(client.config().timeout, Duration::from_secs(10));
        assert_eq!(client.config().user_agent, "test-agent");
    }

    #[test]
    fn test_convert_error() {
        let client = EhttpClient::new();
        assert!(matches!(
            client.convert_error("Request timeout".to_string()),
            HttpError::Timeout { seconds: 30 }
        ));
        assert!(matches!(
            client.convert_error("Connection refused".to_string()),
            HttpError::Network { .. }
        ));
        assert!(matches!(
            client.convert_error("Something went wrong".to_string()),
            HttpError::RequestFailed { .. }
        ));
    }

    #[test]
    fn test_build_request_sets_method_and_headers() {
        let client = EhttpClient::with_config(HttpConfig::new().with_user_agent("tiles/1.0"));
        let request = client.build_request("HEAD", "https://example.com/0/0/0.png");

        assert_eq!(request.method, "HEAD");
        assert_eq!(request.url, "https://example.com/0/0/0.png");
        assert_eq!(request.headers.get("User-Agent"), Some("tiles/1.0"));
    }

    #[tokio::test]
    async fn test_unreachable_host_returns_error_without_blocking() {
        let client = EhttpClient::new();
        let result = client.get("http://127.0.0.1:9/0/0/0.png").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_convert_response_keeps_binary_body() {
        let ehttp_response = ehttp::Response {
            url: "https://example.com/0/0/0.png".to_string(),
            ok: true,
            status: 200,
            status_text: "OK".to_string(),
            headers: ehttp::Headers::default(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        };

        let response = EhttpClient::convert_response(ehttp_response);
        assert_eq!(response.status, 200);
        assert_eq!(response.body, vec![0x89, b'P', b'N', b'G']);
    }
}

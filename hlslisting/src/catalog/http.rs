//! HTTP client abstraction for testability

use super::types::CatalogError;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Default request timeout in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Trait for blocking HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError>;

    /// Performs an HTTP GET request with Bearer token authentication.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `bearer_token` - The bearer token for Authorization header
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get_with_bearer(&self, url: &str, bearer_token: &str) -> Result<Vec<u8>, CatalogError>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

/// User-Agent sent with every request.
const DEFAULT_USER_AGENT: &str = concat!("hlslisting/", env!("CARGO_PKG_VERSION"));

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| CatalogError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn execute(
        &self,
        request: reqwest::blocking::RequestBuilder,
        url: &str,
    ) -> Result<Vec<u8>, CatalogError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match request.send() {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(CatalogError::Http(format!("Request failed: {}", e)));
            }
        };

        // Check HTTP status
        if !response.status().is_success() {
            return Err(CatalogError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        // Read response body
        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| CatalogError::Http(format!("Failed to read response: {}", e)))
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.execute(self.client.get(url), url)
    }

    fn get_with_bearer(&self, url: &str, bearer_token: &str) -> Result<Vec<u8>, CatalogError> {
        self.execute(self.client.get(url).bearer_auth(bearer_token), url)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Mock HTTP client that replays queued responses in order and records
    /// every requested URL.
    ///
    /// When the queue runs dry, `fallback` is returned.
    pub struct MockHttpClient {
        responses: Mutex<VecDeque<Result<Vec<u8>, CatalogError>>>,
        fallback: Result<Vec<u8>, CatalogError>,
        requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockHttpClient {
        pub fn new(fallback: Result<Vec<u8>, CatalogError>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                fallback,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_responses(responses: Vec<Result<Vec<u8>, CatalogError>>) -> Self {
            let mock = Self::new(Err(CatalogError::Http("no more responses".to_string())));
            mock.responses.lock().unwrap().extend(responses);
            mock
        }

        /// URLs requested so far, with the bearer token if one was sent.
        pub fn requests(&self) -> Vec<(String, Option<String>)> {
            self.requests.lock().unwrap().clone()
        }

        fn respond(&self, url: &str, token: Option<&str>) -> Result<Vec<u8>, CatalogError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), token.map(str::to_string)));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
            self.respond(url, None)
        }

        fn get_with_bearer(&self, url: &str, bearer_token: &str) -> Result<Vec<u8>, CatalogError> {
            self.respond(url, Some(bearer_token))
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com");
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient::new(Err(CatalogError::Http("Test error".to_string())));

        let result = mock.get("http://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_mock_client_replays_in_order() {
        let mock = MockHttpClient::with_responses(vec![Ok(vec![1]), Ok(vec![2])]);

        assert_eq!(mock.get("http://a").unwrap(), vec![1]);
        assert_eq!(mock.get_with_bearer("http://b", "tok").unwrap(), vec![2]);
        assert!(mock.get("http://c").is_err());

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1], ("http://b".to_string(), Some("tok".to_string())));
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::with_timeout(5).is_ok());
    }
}

//! Helix REST collaborator.
//!
//! A thin request/response wrapper around the Twitch Helix API with
//! cursor-based pagination. The chat session never calls into this module;
//! callbacks that need account data do.

mod lookup;
mod pagination;
mod streams;
mod videos;

pub use lookup::{FollowQuery, GameQuery, UserQuery};
pub use pagination::Page;
pub use streams::{StreamQuery, StreamType};
pub use videos::{VideoPeriod, VideoQuery, VideoSort, VideoType};

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::HelixConfig;
use crate::error::{HelixError, HelixResult};

/// Ordered query pairs; a key may repeat for multi-valued filters.
pub type Query = Vec<(String, String)>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const BEARER: &str = "Bearer ";

/// One API call, relative to the client's base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: Method,
    pub query: Query,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Status and raw body of an API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body, or turn a non-2xx status into [`HelixError::Api`].
    pub fn json<T: DeserializeOwned>(&self) -> HelixResult<T> {
        if !self.is_success() {
            return Err(self.api_error());
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The API's `message` field when present, the raw body otherwise.
    pub fn api_error(&self) -> HelixError {
        let message = serde_json::from_str::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
            .unwrap_or_else(|| self.body.clone());
        HelixError::Api {
            status: self.status,
            message,
        }
    }
}

/// Anything that can carry out an [`ApiRequest`].
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn do_request(&self, request: ApiRequest) -> HelixResult<ApiResponse>;
}

/// HTTP client for the Helix API.
#[derive(Clone)]
pub struct HelixClient {
    http: reqwest::Client,
    api_host: String,
    api_base: String,
    authorization: Option<Zeroizing<String>>,
    client_id: Option<String>,
}

impl HelixClient {
    pub fn new(api_host: impl Into<String>, api_base: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("tmichat/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            api_host: api_host.into().trim_end_matches('/').to_owned(),
            api_base: api_base.into(),
            authorization: None,
            client_id: None,
        }
    }

    pub fn from_config(config: &HelixConfig) -> Self {
        let mut client = Self::new(&config.api_host, &config.api_base);
        client.client_id = config.client_id.clone();
        client
    }

    /// Use `token` for the `Authorization` header.
    ///
    /// A chat-style `oauth:` prefix is dropped and `Bearer ` is added unless
    /// the token already starts with it (any case).
    pub fn authenticate(&mut self, token: &str) {
        let token = token.strip_prefix(tmi_proto::TOKEN_PREFIX).unwrap_or(token);
        let has_scheme = token
            .get(..6)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer"));
        let value = if has_scheme {
            token.to_owned()
        } else {
            format!("{BEARER}{token}")
        };
        self.authorization = Some(Zeroizing::new(value));
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Value sent as `Authorization`, if authenticated.
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref().map(String::as_str)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.api_host, self.api_base, endpoint)
    }

    /// Active streams, sorted by viewer count.
    pub async fn get_streams<T: DeserializeOwned>(
        &self,
        query: &StreamQuery,
    ) -> HelixResult<Page<T>> {
        Page::fetch(self, ApiRequest::get("/streams").with_query(query.to_query())).await
    }

    /// Metadata of active streams, filtered like [`get_streams`](Self::get_streams).
    pub async fn get_streams_metadata<T: DeserializeOwned>(
        &self,
        query: &StreamQuery,
    ) -> HelixResult<Page<T>> {
        let request = ApiRequest::get("/streams/metadata").with_query(query.to_query());
        Page::fetch(self, request).await
    }

    pub async fn get_users<T: DeserializeOwned>(&self, query: &UserQuery) -> HelixResult<Vec<T>> {
        let request = ApiRequest::get("/users").with_query(query.to_query()?);
        Ok(Page::<T>::fetch(self, request).await?.data)
    }

    pub async fn get_games<T: DeserializeOwned>(&self, query: &GameQuery) -> HelixResult<Vec<T>> {
        let request = ApiRequest::get("/games").with_query(query.to_query()?);
        Ok(Page::<T>::fetch(self, request).await?.data)
    }

    pub async fn get_users_follows<T: DeserializeOwned>(
        &self,
        query: &FollowQuery,
    ) -> HelixResult<Page<T>> {
        let request = ApiRequest::get("/users/follows").with_query(query.to_query()?);
        Page::fetch(self, request).await
    }

    pub async fn get_videos<T: DeserializeOwned>(
        &self,
        query: &VideoQuery,
    ) -> HelixResult<Page<T>> {
        let request = ApiRequest::get("/videos").with_query(query.to_query()?);
        Page::fetch(self, request).await
    }
}

#[async_trait]
impl RequestSender for HelixClient {
    async fn do_request(&self, request: ApiRequest) -> HelixResult<ApiResponse> {
        let url = self.url(&request.endpoint);
        debug!(method = %request.method, url = %url, "helix request");

        let mut builder = self.http.request(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(client_id) = &self.client_id {
            builder = builder.header("Client-Id", client_id.as_str());
        }
        if let Some(authorization) = &self.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, url = %url, "helix response");
        Ok(ApiResponse { status, body })
    }
}

impl fmt::Debug for HelixClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelixClient")
            .field("api_host", &self.api_host)
            .field("api_base", &self.api_base)
            .field("authenticated", &self.authorization.is_some())
            .field("client_id", &self.client_id)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every request.
    #[derive(Default)]
    pub(crate) struct ScriptedSender {
        pub(crate) requests: Mutex<Vec<ApiRequest>>,
        responses: Mutex<VecDeque<ApiResponse>>,
    }

    impl ScriptedSender {
        pub(crate) fn respond(self, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().push_back(ApiResponse {
                status,
                body: body.to_owned(),
            });
            self
        }

        pub(crate) fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RequestSender for ScriptedSender {
        async fn do_request(&self, request: ApiRequest) -> HelixResult<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_normalizes_token() {
        let mut client = HelixClient::new("https://api.twitch.tv", "/helix");
        assert_eq!(client.authorization(), None);

        client.authenticate("oauth:abc123");
        assert_eq!(client.authorization(), Some("Bearer abc123"));

        client.authenticate("abc123");
        assert_eq!(client.authorization(), Some("Bearer abc123"));

        client.authenticate("bearer xyz");
        assert_eq!(client.authorization(), Some("bearer xyz"));
    }

    #[test]
    fn test_url_joins_host_base_and_endpoint() {
        let client = HelixClient::new("https://api.twitch.tv/", "/helix");
        assert_eq!(client.url("/streams"), "https://api.twitch.tv/helix/streams");
    }

    #[test]
    fn test_debug_hides_authorization() {
        let mut client = HelixClient::new("https://api.twitch.tv", "/helix");
        client.authenticate("abc123");
        assert!(!format!("{client:?}").contains("abc123"));
    }

    #[test]
    fn test_api_error_prefers_message_field() {
        let response = ApiResponse {
            status: 401,
            body: r#"{"error":"Unauthorized","status":401,"message":"Invalid OAuth token"}"#.into(),
        };
        match response.json::<serde_json::Value>() {
            Err(HelixError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid OAuth token");
            }
            other => panic!("expected api error, got {other:?}"),
        }

        let response = ApiResponse {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(
            response.api_error().to_string(),
            "api error 502: bad gateway"
        );
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::new(Method::POST, "/entitlements/upload")
            .with_header("Content-Type", "application/json")
            .with_body("{}");
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.body.as_deref(), Some("{}"));
    }
}

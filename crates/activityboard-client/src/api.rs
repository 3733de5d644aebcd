//! HTTP client for the activities API.
//!
//! This module provides the transport used by the board:
//! - `GET /activities` and `GET /activities/{name}` for reads
//! - `POST`/`DELETE /activities/{name}/signup` for mutations
//! - request timeout and user agent configuration

use std::time::Duration;

use reqwest::{Client, Method as HttpMethod, Response};
use tracing::{debug, trace};
use url::Url;

use activityboard_core::{Activity, ActivityCatalog};
use activityboard_protocol::{Method, Reply, Request, decode_activity, decode_catalog};

use crate::error::ClientResult;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the activities API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The underlying HTTP client.
    client: Client,
    /// Base URL the endpoints are appended to.
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`.
    pub fn new(base_url: Url, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("activityboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Parses `base_url` and creates a client with the default timeout.
    pub fn from_base(base_url: &str) -> ClientResult<Self> {
        Self::new(Url::parse(base_url)?, DEFAULT_TIMEOUT)
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches every activity, in server order.
    pub async fn list_activities(&self) -> ClientResult<ActivityCatalog> {
        let (status, body) = self.send(&Request::list_activities()).await?;
        Ok(decode_catalog(status, &body)?)
    }

    /// Fetches a single activity.
    pub async fn get_activity(&self, name: &str) -> ClientResult<Activity> {
        let (status, body) = self.send(&Request::get_activity(name)).await?;
        Ok(decode_activity(name, status, &body)?)
    }

    /// Registers `email` for `activity`.
    ///
    /// A rejection by the server is a successful call returning
    /// [`Reply::Rejected`]; only transport and decoding failures are errors.
    pub async fn signup(&self, activity: &str, email: &str) -> ClientResult<Reply> {
        self.mutate(&Request::signup(activity, email)).await
    }

    /// Removes `email` from `activity`.
    pub async fn unregister(&self, activity: &str, email: &str) -> ClientResult<Reply> {
        self.mutate(&Request::unregister(activity, email)).await
    }

    async fn mutate(&self, request: &Request) -> ClientResult<Reply> {
        let (status, body) = self.send(request).await?;
        Ok(Reply::from_parts(status, &body)?)
    }

    /// Sends a request and reads the whole body.
    async fn send(&self, request: &Request) -> ClientResult<(u16, Vec<u8>)> {
        let url = request.url(&self.base_url)?;
        let method = match request.method() {
            Method::Get => HttpMethod::GET,
            Method::Post => HttpMethod::POST,
            Method::Delete => HttpMethod::DELETE,
        };

        debug!(method = request.method().as_str(), url = %url, "sending request");

        let response = self.client.request(method, url).send().await?;
        self.read_response(response).await
    }

    async fn read_response(&self, response: Response) -> ClientResult<(u16, Vec<u8>)> {
        let status = response.status();
        trace!(status = %status, "received response");

        let body = response.bytes().await?;
        Ok((status.as_u16(), body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ApiClient::new(
            Url::parse("http://127.0.0.1:8000").unwrap(),
            Duration::from_secs(10),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn client_base_url() {
        let client = ApiClient::from_base("https://school.example/api/").unwrap();
        assert_eq!(client.base_url().as_str(), "https://school.example/api/");
    }

    #[test]
    fn invalid_base_url() {
        assert!(ApiClient::from_base("::not a url::").is_err());
    }
}

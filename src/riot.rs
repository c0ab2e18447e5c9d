//! The region-templated Riot API client and its typed endpoints.
//!
//! [`RiotClient`] owns a [`Client`] whose base URL is a template with exactly
//! one `{region}` placeholder. Each typed endpoint method is a thin binding:
//! it supplies a path template, the parameter mapping, and the target type,
//! and delegates everything else to [`RiotClient::invoke_json`]. No endpoint
//! method carries branching logic of its own.
//!
//! # Example
//!
//! ```ignore
//! use riot_api_client::{Region, RiotClient};
//!
//! let client = RiotClient::builder(std::env::var("RIOT_API_KEY")?)
//!     .build()?;
//!
//! let account = client
//!     .get_account_by_riot_id(Region::Europe, "Ayato", "11235")
//!     .await?;
//! println!("{}#{}", account.game_name, account.tag_line);
//! ```

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method};
use serde::de::DeserializeOwned;

use crate::ClientError;
use crate::builder::ClientBuilder;
use crate::client::{Client, expand_path};
use crate::interceptor::Interceptor;
use crate::region::Region;
use crate::schemas::{Account, ActiveShard};
use crate::transport::Transport;

/// Base URL template of the Riot API. The single `{region}` placeholder is
/// resolved per call.
const DEFAULT_BASE_URL: &str = "https://{region}.api.riotgames.com";

/// Header carrying the API key, set once at construction.
const API_KEY_HEADER: &str = "X-Riot-Token";

/// Typed client for the Riot Games REST API.
///
/// Cheap to clone; clones share the transport. Like [`Client`], the
/// configuration is read-only once calls begin.
#[derive(Debug, Clone)]
pub struct RiotClient {
    client: Client,
}

impl RiotClient {
    /// Create a builder seeded with the Riot base URL template and the
    /// given API key as the `X-Riot-Token` default header.
    pub fn builder<S: Into<String>>(api_key: S) -> RiotClientBuilder {
        RiotClientBuilder {
            inner: Client::builder(DEFAULT_BASE_URL).default_header(API_KEY_HEADER, api_key),
        }
    }

    /// Create a client with the given API key and default configuration.
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self, ClientError> {
        Self::builder(api_key).build()
    }

    /// Access the underlying dispatch client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Return a copy of this client with the default deadline replaced.
    ///
    /// The original is untouched; deriving from a shared client is safe
    /// while calls are in flight.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            client: self.client.with_timeout(timeout),
        }
    }

    /// Resolve the `{region}` placeholder in the base URL template.
    fn url_for(&self, region: Region, path: &str) -> String {
        format!(
            "{}{}",
            self.client.base_url().replace("{region}", region.as_str()),
            path
        )
    }

    /// Typed JSON dispatch.
    ///
    /// Expands the path template, resolves the region, performs the raw
    /// exchange, validates the status, and decodes the body. A status
    /// outside `[200, 300)` yields [`ClientError::Status`] without touching
    /// the body; a body that isn't the expected JSON yields
    /// [`ClientError::Decode`]. The collected body is dropped on every exit
    /// path.
    pub async fn invoke_json<T: DeserializeOwned>(
        &self,
        region: Region,
        method: Method,
        path_template: &str,
        path_params: &[(&str, &str)],
        queries: &[(String, String)],
        headers: &HeaderMap,
        body: Option<Bytes>,
    ) -> Result<T, ClientError> {
        let path = expand_path(path_template, path_params);
        let url = self.url_for(region, &path);

        let response = self
            .client
            .invoke(method, &url, body, headers, queries)
            .await?;

        if !response.status.is_success() {
            return Err(ClientError::Status {
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| ClientError::Decode(format!("JSON decoding failed: {e}")))
    }

    // ----- Account-V1 -----

    /// Get an account by its PUUID.
    pub async fn get_account_by_puuid(
        &self,
        region: Region,
        puuid: &str,
    ) -> Result<Account, ClientError> {
        self.invoke_json(
            region,
            Method::GET,
            "/riot/account/v1/accounts/by-puuid/{puuid}",
            &[("puuid", puuid)],
            &[],
            &HeaderMap::new(),
            None,
        )
        .await
    }

    /// Get an account by Riot ID (game name + tag line).
    pub async fn get_account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<Account, ClientError> {
        self.invoke_json(
            region,
            Method::GET,
            "/riot/account/v1/accounts/by-riot-id/{game_name}/{tag_line}",
            &[("game_name", game_name), ("tag_line", tag_line)],
            &[],
            &HeaderMap::new(),
            None,
        )
        .await
    }

    /// Get the account behind an RSO access token.
    pub async fn get_account_me(
        &self,
        region: Region,
        authorization: &str,
    ) -> Result<Account, ClientError> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(authorization).map_err(|_| {
            ClientError::Construction("invalid authorization header value".into())
        })?;
        headers.insert(http::header::AUTHORIZATION, value);

        self.invoke_json(
            region,
            Method::GET,
            "/riot/account/v1/accounts/me",
            &[],
            &[],
            &headers,
            None,
        )
        .await
    }

    /// Get the active shard of a player for a given game.
    pub async fn get_active_shard(
        &self,
        region: Region,
        game: &str,
        puuid: &str,
    ) -> Result<ActiveShard, ClientError> {
        self.invoke_json(
            region,
            Method::GET,
            "/riot/account/v1/active-shards/by-game/{game}/by-puuid/{puuid}",
            &[("game", game), ("puuid", puuid)],
            &[],
            &HeaderMap::new(),
            None,
        )
        .await
    }

    // ----- Match-V5 -----

    /// List match IDs for a player, newest first.
    pub async fn get_match_ids_by_puuid(
        &self,
        region: Region,
        puuid: &str,
        start: Option<u32>,
        count: Option<u32>,
    ) -> Result<Vec<String>, ClientError> {
        let mut queries = Vec::new();
        if let Some(start) = start {
            queries.push(("start".to_owned(), start.to_string()));
        }
        if let Some(count) = count {
            queries.push(("count".to_owned(), count.to_string()));
        }

        self.invoke_json(
            region,
            Method::GET,
            "/lol/match/v5/matches/by-puuid/{puuid}/ids",
            &[("puuid", puuid)],
            &queries,
            &HeaderMap::new(),
            None,
        )
        .await
    }
}

/// Builder for [`RiotClient`], forwarding to [`ClientBuilder`].
#[derive(Debug)]
pub struct RiotClientBuilder {
    inner: ClientBuilder,
}

impl RiotClientBuilder {
    /// Replace the base URL template.
    ///
    /// Useful for regional proxies or test servers; the template must still
    /// carry the `{region}` placeholder if endpoints are to be region-scoped.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.inner = self.inner.base_url(base_url);
        self
    }

    /// Add a default header, overwriting a previous default with the same name.
    pub fn default_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.inner = self.inner.default_header(name, value);
        self
    }

    /// Add a default query parameter, overwriting a previous default with the
    /// same key.
    pub fn default_query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.inner = self.inner.default_query(key, value);
        self
    }

    /// Append an interceptor to the chain.
    pub fn interceptor<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.inner = self.inner.interceptor(interceptor);
        self
    }

    /// Replace the terminal transport.
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.inner = self.inner.transport(transport);
        self
    }

    /// Replace the terminal transport with a shared instance.
    pub fn transport_arc(mut self, transport: Arc<dyn Transport>) -> Self {
        self.inner = self.inner.transport_arc(transport);
        self
    }

    /// Set the default deadline for calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RiotClient, ClientError> {
        Ok(RiotClient {
            client: self.inner.build()?,
        })
    }
}

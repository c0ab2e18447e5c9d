//! Typed HTTP client for the Riot Games REST API.
//!
//! This crate provides a small, layered client SDK:
//!
//! - [`Client`] — generic dispatch: URL building, default/per-call header and
//!   query merging, interceptor composition, raw exchange.
//! - [`RiotClient`] — region-templated typed dispatch: path template
//!   expansion, status validation, JSON decoding, and the generated-looking
//!   endpoint bindings.
//! - [`Transport`](transport::Transport) — the pluggable capability doing one
//!   request/response exchange; [`HyperTransport`](transport::HyperTransport)
//!   by default.
//! - [`Interceptor`] — layers wrapping the transport to observe or mutate
//!   requests and responses.
//!
//! ## Example
//!
//! ```ignore
//! use riot_api_client::{LoggingInterceptor, Region, RiotClient};
//!
//! # async fn run() -> Result<(), riot_api_client::ClientError> {
//! let client = RiotClient::builder(std::env::var("RIOT_API_KEY").unwrap())
//!     .interceptor(LoggingInterceptor::new())
//!     .build()?;
//!
//! let account = client
//!     .get_account_by_riot_id(Region::Europe, "Ayato", "11235")
//!     .await?;
//! println!("{}#{}", account.game_name, account.tag_line);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Clients are `Clone + Send + Sync`; configuration is read-only once calls
//! begin and there is no internal locking. Per-call deadline overrides are
//! derived copies ([`RiotClient::with_timeout`]), never mutations of a shared
//! instance.
//!
//! ## Errors
//!
//! Every failure is a [`ClientError`]; nothing is retried, swallowed, or
//! logged by the core. Attach a [`LoggingInterceptor`] if you want request
//! and response lines through `tracing`.

mod builder;
mod client;
mod error;
mod interceptor;
mod region;
pub mod schemas;
pub mod transport;

mod riot;

#[cfg(test)]
pub(crate) mod testutil;

pub use builder::ClientBuilder;
pub use client::{Client, expand_path};
pub use error::ClientError;
pub use interceptor::{
    ExchangeFn, FnInterceptor, HeaderInterceptor, Interceptor, InterceptorChain,
    LoggingInterceptor, Next,
};
pub use region::Region;
pub use riot::{RiotClient, RiotClientBuilder};
pub use transport::{ExchangeRequest, ExchangeResponse, Transport};

//! Delivery API client stack
//!
//! # Module Layout
//!
//! - [`transport`]  -- `Transport` trait, request/response/failure types,
//!   and the reqwest-backed implementation
//! - [`client`]     -- authenticated client: bearer attachment, `401`
//!   classification, single-flight token refresh, one-shot replay
//! - [`auth`]       -- magic-link endpoints and their wire types
//! - [`deliveries`] -- delivery list/detail endpoints and wire types
//! - [`ping`]       -- reachability probe

pub mod auth;
pub mod client;
pub mod deliveries;
pub mod ping;
pub mod transport;

pub use client::ApiClient;
pub use transport::{ApiFailure, ApiResult, HttpResponse, OutgoingRequest, Transport};

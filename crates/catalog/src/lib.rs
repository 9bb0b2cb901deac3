//! Catalog feed client.
//!
//! Thin wrapper around the retailer's product search endpoint. Returns raw
//! listings only; normalization and scoring live in the engine crate.

pub mod client;
pub mod useragent;

pub use client::{FeedClient, FeedError};
pub use useragent::{FixedUserAgent, RotatingUserAgents, UserAgentProvider};

//! CORE API adapter
//!
//! Token session management and the authenticated record search client
//! for the CORE (mines) data source.

pub mod client;
pub mod models;
pub mod token;

pub use client::CoreApiClient;
pub use token::{Clock, HttpTokenFetcher, IssuedToken, SystemClock, TokenFetcher, TokenSession};

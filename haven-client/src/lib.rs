//! Typed client for the Haven listing API
//!
//! [`HavenClient`] wraps the HTTP endpoints and unpacks the response envelope.
//! [`ListingView`] holds the state a listing page renders from and applies
//! fetch results in request order: when filters change while an earlier
//! request is still in flight, the earlier response is discarded.

pub mod client;
pub mod config;
pub mod errors;
pub mod sequencer;
pub mod state;

pub use client::{query_pairs, HavenClient, Page};
pub use config::ClientConfig;
pub use errors::ClientError;
pub use sequencer::{RequestSequencer, Ticket};
pub use state::{FetchState, ListingView};

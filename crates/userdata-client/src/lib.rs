//! Retrying HTTP fetcher for boot-time userdata.
//!
//! This crate provides the [`Fetcher`], which pulls the raw userdata
//! document from a provisioning endpoint and keeps trying until the
//! [`RetryConfig`] budget runs out or the caller cancels.

mod config;
mod fetcher;

pub use config::*;
pub use fetcher::{Fetcher, FetcherBuilder};
pub use tokio_util::sync::CancellationToken;
pub use userdata_core::{Result, UserdataError};

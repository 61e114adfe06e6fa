//! Fetch and decode machine configuration from a provisioning endpoint at
//! boot.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use userdata::{download, CancellationToken, Fetcher, RetryConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> userdata::Result<()> {
//!     let retry = RetryConfig::attempts(10).delay(Duration::from_secs(1));
//!     let fetcher = Fetcher::new(retry)?;
//!
//!     let config = download(&fetcher, "http://169.254.169.254/userdata", &CancellationToken::new()).await?;
//!
//!     if let Some(install) = &config.install {
//!         for (name, part) in install.partitions() {
//!             println!("{name}: {} ({} bytes)", part.device, part.size);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

// Re-export core types
pub use userdata_core::*;

// Re-export client
pub use userdata_client::{
    CancellationToken, Fetcher, FetcherBuilder, RetryBudget, RetryConfig, DEFAULT_DELAY,
    DEFAULT_MAX_DELAY,
};

// Re-export runtime for convenience
pub use tokio;

use tracing::{error, info};

/// Fetch the document at `endpoint` and decode it.
///
/// The fetch retries according to the fetcher's policy. Decoding happens
/// once, on the first successful body; a malformed document is returned as
/// an error and is not fetched again.
pub async fn download(
    fetcher: &Fetcher,
    endpoint: &str,
    cancel: &CancellationToken,
) -> Result<Configuration> {
    let bytes = fetcher.fetch_with_cancel(endpoint, cancel).await?;

    match decode(&bytes) {
        Ok(config) => {
            info!(
                endpoint,
                version = %config.version,
                "decoded userdata"
            );
            Ok(config)
        }
        Err(e) => {
            error!(endpoint, error = %e, "userdata is not a valid configuration");
            Err(e)
        }
    }
}

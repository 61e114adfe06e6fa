//! userdatactl - fetch and validate boot-time userdata
//!
//! Runs on a single-threaded runtime; nothing here needs a worker pool.

use anyhow::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    userdata_cli::run().await
}

//! # userdata-cli
//!
//! Operator tool around the userdata fetch-and-decode pipeline.
//!
//! ## Features
//!
//! - **Fetch**: pull userdata from a provisioning endpoint with retries,
//!   validate it, print a summary or the full document, optionally save it
//! - **Validate**: decode a userdata file from local disk
//! - **Kernel command line**: the endpoint may come from `userdata.endpoint=`

pub mod cli;
pub mod cmdline;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;

//! Core types for boot-time userdata.
//!
//! This crate provides the pieces shared by the fetcher and its callers:
//!
//! - **Types**: the [`Configuration`] document and its sections
//! - **Decoding**: [`decode`] turns raw bytes into a [`Configuration`]
//! - **Errors**: the [`UserdataError`] taxonomy for the whole pipeline
//!
//! # Example
//!
//! ```rust
//! use userdata_core::{decode, Result};
//!
//! fn boot_disk(bytes: &[u8]) -> Result<Option<String>> {
//!     let config = decode(bytes)?;
//!     Ok(config
//!         .install
//!         .and_then(|install| install.boot)
//!         .map(|boot| boot.device))
//! }
//!
//! let disk = boot_disk(b"install:\n  boot:\n    device: /dev/sda\n    size: 1024\n").unwrap();
//! assert_eq!(disk.as_deref(), Some("/dev/sda"));
//! ```

mod decode;
mod error;
pub mod types;

pub use decode::decode;
pub use error::{Result, UserdataError};
pub use types::*;

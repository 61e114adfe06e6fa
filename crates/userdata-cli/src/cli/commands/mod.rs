//! Command implementations.

pub mod fetch;
pub mod validate;

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Settings loaded from the config file
    pub config: Config,

    /// Output format
    pub output_format: OutputFormat,

    /// Disable colors
    pub no_color: bool,
}

impl Context {
    /// Whether output may be colored.
    pub const fn color(&self) -> bool {
        !self.no_color
    }
}

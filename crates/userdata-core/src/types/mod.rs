mod configuration;
mod install;
mod networking;
mod security;
mod services;

pub use configuration::*;
pub use install::*;
pub use networking::*;
pub use security::*;
pub use services::*;

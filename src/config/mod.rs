//! Tool settings for `vwconfig`.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{MergeSettings, Settings};

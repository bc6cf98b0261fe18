//! Command module structure for gascheck CLI

use anyhow::Result;
use std::path::Path;

use gascheck::config::Config;

pub mod archive;
pub mod properties;
pub mod validate;

/// Load the configuration from an explicit file, or the merged defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

//! Configuration file loading for virtual-lab
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Credential environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./virtual_lab.toml` or `./.virtual_lab.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/virtual-lab/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileApiKeysConfig, FileConfig, FileMeetingConfig, FileOutputConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;

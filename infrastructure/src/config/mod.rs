//! Configuration file loading for xuanji
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `XUANJI_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./xuanji.toml` or `./.xuanji.toml`
//! 4. Global: `$XDG_CONFIG_HOME/xuanji/config.toml` (or `~/.config/xuanji/config.toml`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_ASSISTANT_NAME, DEFAULT_ENDPOINT_URL, FileConfig, FileEndpointConfig,
    FileOutputConfig, FilePersonaConfig, FileReplConfig,
};
pub use loader::ConfigLoader;

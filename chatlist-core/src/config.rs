use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("page_size must be greater than zero")]
    ZeroPageSize,
}

/// Settings of the message list.
///
/// Every field is optional in TOML; missing ones take the defaults. The
/// window sizes are read by `VirtualList::from_config`; the container only
/// uses `auto_scroll_to_bottom`.
///
/// ```toml
/// initial_list_size = 20
/// page_size = 20
/// auto_scroll_to_bottom = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Rows drawn on the first render.
    pub initial_list_size: usize,
    /// Rows added to the window each time more are requested.
    pub page_size: usize,
    /// Ask the renderer to scroll to the end after every published update.
    pub auto_scroll_to_bottom: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            initial_list_size: 20,
            page_size: 20,
            auto_scroll_to_bottom: false,
        }
    }
}

impl ListConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ListConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}

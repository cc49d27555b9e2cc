//! Script host configuration via `maris.toml`
//!
//! Settings are loaded once when the host is constructed. To change them,
//! edit the file and rebuild the host; nothing is re-read mid-flight.

use serde::{Deserialize, Serialize};
use std::path::Path;

use maris_core::DEFAULT_INLINE_CAPACITY;

use crate::error::{Error, Result};

/// Config file name placed in the data directory.
pub const CONFIG_FILE_NAME: &str = "maris.toml";

/// Script host configuration loaded from `maris.toml`.
///
/// # Example
///
/// ```toml
/// # Inline reply buffer size in bytes
/// reply_inline_bytes = 16384
///
/// # Name reported in script error positions
/// source_name = "<script>"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Bytes of reply buffered inline before spilling into overflow blocks.
    #[serde(default = "default_reply_inline_bytes")]
    pub reply_inline_bytes: usize,
    /// Name reported as the script origin in evaluation errors.
    #[serde(default = "default_source_name")]
    pub source_name: String,
}

fn default_reply_inline_bytes() -> usize {
    DEFAULT_INLINE_CAPACITY
}

fn default_source_name() -> String {
    "<script>".to_string()
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            reply_inline_bytes: default_reply_inline_bytes(),
            source_name: default_source_name(),
        }
    }
}

impl ScriptConfig {
    /// Check the loaded values for nonsense before handing them to the host.
    ///
    /// # Errors
    ///
    /// Returns an error if `reply_inline_bytes` is zero or `source_name`
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.reply_inline_bytes == 0 {
            return Err(Error::Config {
                message: "reply_inline_bytes must be greater than zero".to_string(),
            });
        }
        if self.source_name.is_empty() {
            return Err(Error::Config {
                message: "source_name must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Maris script host configuration
#
# Bytes of reply buffered inline before spilling into overflow blocks.
# Larger values avoid block allocations for big replies at the cost of
# a bigger per-client footprint.
reply_inline_bytes = 16384

# Name reported as the script origin in evaluation errors.
source_name = "<script>"
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        let config: ScriptConfig = toml::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Config {
                message: format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }
}

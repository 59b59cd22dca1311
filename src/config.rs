//! Table configuration
//!
//! Read from a YAML file, then overridden by CLI flags / environment:
//!
//! ```yaml
//! header_row: 1
//! strict_headers: false
//! ```

use crate::error::{SheetError, SheetResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Row scanned by header auto-detection.
    pub header_row: u32,
    /// Fail appends/updates that name an unknown header instead of skipping
    /// the record.
    pub strict_headers: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            header_row: 1,
            strict_headers: false,
        }
    }
}

impl TableConfig {
    pub fn from_file(path: &Path) -> SheetResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> SheetResult<Self> {
        let config: TableConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SheetResult<()> {
        if self.header_row == 0 {
            return Err(SheetError::Config(
                "header_row is 1-based and must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

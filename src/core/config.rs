use serde::{Deserialize, Serialize};

use super::date::DEFAULT_DATE_FORMAT;

/// Options for flattening documents into records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// `chrono` format string applied to the issue timestamp.
    pub date_format: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_brazilian_date_format() {
        assert_eq!(ExtractConfig::default().date_format, "%d/%m/%Y");
    }
}

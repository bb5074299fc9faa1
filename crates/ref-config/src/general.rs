//! Search and listing defaults.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows shown by `refs list` and `refs search` when no `--limit` is given.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Match search terms case-sensitively unless a command says otherwise.
    /// The shell starts with this setting and `case on|off` overrides it.
    #[serde(default)]
    pub case_sensitive: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            case_sensitive: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searches_fold_case_by_default() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert!(!config.case_sensitive);
    }
}

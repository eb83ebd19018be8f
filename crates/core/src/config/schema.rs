//! Configuration schema definitions

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub recent: RecentConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub viewer: ViewerConfig,

    #[serde(default)]
    pub copy: CopyConfig,
}

/// Storage root and listing behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    /// Storage root; `~` and `$VAR` are expanded. Unset means the app data dir.
    #[serde(default)]
    pub root: Option<String>,

    /// Include dot-entries in listings and search results
    #[serde(default)]
    pub show_hidden: bool,
}

/// Recursive search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results a single search returns
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    100
}

/// Recently-opened files configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentConfig {
    /// Records kept before the oldest are evicted
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            limit: default_recent_limit(),
        }
    }
}

fn default_recent_limit() -> usize {
    50
}

/// Persistent store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `recent.json` and `favorites.json`
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Also drop records for descendants when a directory is deleted, renamed or moved
    #[serde(default = "default_true")]
    pub purge_descendants: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            purge_descendants: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Text viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Text files larger than this are refused
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_text_bytes: default_max_text_bytes(),
        }
    }
}

fn default_max_text_bytes() -> u64 {
    5 * 1024 * 1024
}

/// Resolved-name copy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Word placed in the collision suffix, as in `report (copia 1).pdf`
    #[serde(default = "default_duplicate_label")]
    pub duplicate_label: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            duplicate_label: default_duplicate_label(),
        }
    }
}

fn default_duplicate_label() -> String {
    "copia".to_string()
}

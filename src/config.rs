//! Client configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the cache and remote read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Cached payloads older than this are refetched on the next read.
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,

    /// Result cap applied to every remote list call.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_cache_max_age_secs() -> u64 {
    60 * 60 * 24
}

fn default_list_limit() -> usize {
    100
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            cache_max_age_secs: default_cache_max_age_secs(),
            list_limit: default_list_limit(),
        }
    }
}

//! Default value functions used by serde for config deserialization.

pub fn default_api_base() -> String {
    "https://api.telegram.org".to_string()
}

pub fn default_timeout_secs() -> u64 {
    30
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}

pub fn default_backoff_max_secs() -> u64 {
    60
}

pub fn default_batch_limit() -> u32 {
    100
}

pub fn default_log_level() -> String {
    "info".to_string()
}

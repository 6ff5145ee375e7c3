use std::time::Duration;

pub const DEFAULT_BASE: &str = "./output";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Settings read from the environment; CLI flags override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub default_base: String,
    pub http_timeout: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            default_base: DEFAULT_BASE.to_owned(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_base = lookup("SCHEMA_BROWSER_BASE")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE.to_owned());
        let timeout_secs = lookup("SCHEMA_BROWSER_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| (1..=300).contains(v))
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            default_base,
            http_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the search server, e.g. `http://localhost:7700`
    #[serde(default = "default_host")]
    pub host: String,

    /// Sent as `X-Meili-API-Key` when non-empty
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout applied by the HTTP transport
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub wait: WaitConfig,
}

fn default_host() -> String {
    "http://localhost:7700".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

/// Settings for waiting on asynchronous updates
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaitConfig {
    /// Deadline used by the default wait, measured from the start of the wait
    #[serde(default = "default_wait_timeout_ms")]
    pub timeout_ms: u64,

    /// Pause between two status polls
    #[serde(default = "default_wait_interval_ms")]
    pub interval_ms: u64,

    #[serde(default)]
    pub on_fetch_error: FetchErrorPolicy,
}

fn default_wait_timeout_ms() -> u64 {
    5_000
}

fn default_wait_interval_ms() -> u64 {
    50
}

impl WaitConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_wait_timeout_ms(),
            interval_ms: default_wait_interval_ms(),
            on_fetch_error: FetchErrorPolicy::default(),
        }
    }
}

/// What the update poller does when fetching the update status fails
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", tag = "policy")]
pub enum FetchErrorPolicy {
    /// Stop waiting and report the status as unknown
    #[default]
    Unknown,
    /// Poll again after the interval; once `attempts` retries in a row have
    /// also failed, report the status as unknown
    Retry { attempts: u32 },
    /// Stop waiting and return the fetch error
    Propagate,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            api_key: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
            wait: WaitConfig::default(),
        }
    }
}

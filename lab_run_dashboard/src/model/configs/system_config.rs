use crate::common::*;

use crate::enums::run_mode::*;

pub const MIN_POLL_INTERVAL_SEC: f64 = 0.1;
pub const MAX_POLL_INTERVAL_SEC: f64 = 5.0;
pub const MAX_CACHE_TTL_SEC: u64 = 86_400;

fn default_poll_interval_sec() -> f64 {
    1.0
}

fn default_cache_ttl_sec() -> u64 {
    300
}

#[derive(Debug, Clone, Deserialize, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct SystemConfig {
    pub mode: RunMode,
    #[serde(default = "default_poll_interval_sec")]
    pub poll_interval_sec: f64,
    #[serde(default = "default_cache_ttl_sec")]
    pub cache_ttl_sec: u64,
}

impl SystemConfig {
    #[doc = "Poll delay, clamped to the 0.1 - 5.0 second range of the update-interval control"]
    pub fn poll_interval(&self) -> Duration {
        let secs: f64 = if self.poll_interval_sec.is_finite() {
            self.poll_interval_sec
                .clamp(MIN_POLL_INTERVAL_SEC, MAX_POLL_INTERVAL_SEC)
        } else {
            default_poll_interval_sec()
        };

        Duration::from_secs_f64(secs)
    }

    #[doc = "Cache window, capped at one day"]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_sec.min(MAX_CACHE_TTL_SEC))
    }
}

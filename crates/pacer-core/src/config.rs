//! Engine configuration.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Defaults applied to every animator created from this config.
/// Keep this minimal; per-run values are mutable on the animator itself.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Duration a fresh animator runs for until `set_duration` is called.
    pub default_duration: Duration,

    /// Delay between polling ticks. This is a coarse approximation of a
    /// frame clock: smaller values trade CPU for tick resolution.
    pub tick_interval: Duration,

    /// Easing installed at `start()` when the caller never set one.
    pub default_easing: Easing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_millis(200),
            tick_interval: Duration::from_millis(10),
            default_easing: Easing::AccelerateDecelerate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// it should deserialize a host-supplied config, easing by name
    #[test]
    fn config_from_json() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "default_duration": { "secs": 0, "nanos": 150000000 },
                "tick_interval": { "secs": 0, "nanos": 5000000 },
                "default_easing": "FastOutSlowIn"
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.default_duration, Duration::from_millis(150));
        assert_eq!(cfg.tick_interval, Duration::from_millis(5));
        assert_eq!(cfg.default_easing, Easing::FastOutSlowIn);
    }
}

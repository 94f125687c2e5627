use log::LevelFilter;
#[cfg(feature = "serde")]
use serde::Deserialize;

pub const ENV_REJECT_UNBOUNDED_TIMEOUT: &str = "WINDROID_USB_REJECT_UNBOUNDED_TIMEOUT";
pub const ENV_LOG_LEVEL: &str = "WINDROID_USB_LOG";

/// Runtime knobs for [`UsbManager`](crate::UsbManager).
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbConfig {
    /// Fail transfers with `timeout == 0` instead of letting usbdevfs wait forever.
    pub reject_unbounded_timeout: bool,
    pub log_level: LevelFilter,
}

impl Default for UsbConfig {
    fn default() -> Self {
        UsbConfig {
            reject_unbounded_timeout: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl UsbConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = UsbConfig::default();
        if let Some(value) = lookup(ENV_REJECT_UNBOUNDED_TIMEOUT) {
            match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.reject_unbounded_timeout = true,
                "0" | "false" | "no" | "" => config.reject_unbounded_timeout = false,
                other => log::warn!("{}: ignoring unknown value {:?}", ENV_REJECT_UNBOUNDED_TIMEOUT, other),
            }
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            match value.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!("{}: ignoring unknown level {:?}", ENV_LOG_LEVEL, value),
            }
        }
        config
    }
}

//! Timezone utilities for the reporting window
//!
//! The reporting window is derived from "now" as seen in a timezone. This
//! module detects the system's local timezone and parses timezone names
//! from configuration or command-line input.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Configuration for timezone handling
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The timezone to evaluate "now" in
    pub tz: Tz,
    /// Whether the timezone is UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        let tz = get_local_timezone();
        Self {
            is_utc: tz == Tz::UTC,
            tz,
        }
    }
}

impl TimezoneConfig {
    /// Build a timezone configuration from an optional name and a UTC flag
    ///
    /// The UTC flag wins over an explicit name; with neither, the local
    /// timezone is detected.
    pub fn from_name(timezone_str: Option<&str>, use_utc: bool) -> crate::error::Result<Self> {
        if use_utc {
            return Ok(Self {
                tz: Tz::UTC,
                is_utc: true,
            });
        }

        if let Some(tz_str) = timezone_str {
            let tz = Tz::from_str(tz_str).map_err(|_| {
                crate::error::AdstatError::InvalidTimezone(format!(
                    "'{}'. Use format like 'Europe/Paris', 'America/New_York', or 'UTC'",
                    tz_str
                ))
            })?;
            Ok(Self {
                tz,
                is_utc: tz == Tz::UTC,
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }

    /// Current instant in the configured timezone
    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Detect the system's local timezone
///
/// The `TZ` environment variable wins; otherwise the platform timezone is
/// used. Falls back to UTC when neither can be parsed.
pub fn get_local_timezone() -> Tz {
    if let Ok(tz_str) = std::env::var("TZ")
        && let Ok(tz) = Tz::from_str(&tz_str)
    {
        debug!("Using timezone from TZ environment variable: {}", tz_str);
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(tz_str) => match Tz::from_str(&tz_str) {
            Ok(tz) => {
                debug!("Using system timezone from iana-time-zone: {}", tz_str);
                tz
            }
            Err(_) => {
                debug!(
                    "Could not parse timezone from iana-time-zone: '{}', falling back to UTC",
                    tz_str
                );
                Tz::UTC
            }
        },
        Err(e) => {
            debug!(
                "Could not detect local timezone via iana-time-zone: {:?}, falling back to UTC",
                e
            );
            Tz::UTC
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ENV_MUTEX, EnvVarGuard};

    #[test]
    fn test_timezone_config_utc() {
        let config = TimezoneConfig::from_name(None, true).unwrap();
        assert!(config.is_utc);
        assert_eq!(config.tz, Tz::UTC);
        assert_eq!(config.display_name(), "UTC");
    }

    #[test]
    fn test_timezone_config_explicit() {
        let config = TimezoneConfig::from_name(Some("Europe/Paris"), false).unwrap();
        assert!(!config.is_utc);
        assert_eq!(config.display_name(), "Europe/Paris");
    }

    #[test]
    fn test_utc_flag_overrides_name() {
        let config = TimezoneConfig::from_name(Some("Asia/Tokyo"), true).unwrap();
        assert!(config.is_utc);
    }

    #[test]
    fn test_timezone_config_invalid() {
        let result = TimezoneConfig::from_name(Some("Invalid/Timezone"), false);
        assert!(matches!(
            result,
            Err(crate::error::AdstatError::InvalidTimezone(_))
        ));
    }

    #[tokio::test]
    async fn test_tz_env_var_is_preferred() {
        let _lock = ENV_MUTEX.lock().await;
        let mut guard = EnvVarGuard::new();
        guard.set("TZ", "America/New_York");

        assert_eq!(get_local_timezone().name(), "America/New_York");
    }
}

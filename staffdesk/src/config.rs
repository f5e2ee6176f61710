use anyhow::anyhow;
use chrono::Weekday;
use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;

const DEFAULT_STORE_PATH: &str = "./staffdesk.json";
const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the JSON file standing in for browser storage.
    pub store_path: PathBuf,
    pub time_zone: Tz,
    /// The only weekday on which weekly reports may be submitted.
    pub submission_day: Weekday,
    /// Cosmetic pause before credentials are checked.
    pub login_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            time_zone: chrono_tz::UTC,
            submission_day: Weekday::Fri,
            login_delay_ms: DEFAULT_LOGIN_DELAY_MS,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_path = lookup("STAFFDESK_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let time_zone_name = lookup("APP_TIMEZONE").unwrap_or_else(|| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .parse()
            .map_err(|_| anyhow!("Invalid APP_TIMEZONE value: {}", time_zone_name))?;

        let submission_day_name =
            lookup("STAFFDESK_SUBMISSION_DAY").unwrap_or_else(|| "Fri".to_string());
        let submission_day: Weekday = submission_day_name.parse().map_err(|_| {
            anyhow!(
                "Invalid STAFFDESK_SUBMISSION_DAY value: {}",
                submission_day_name
            )
        })?;

        let login_delay_ms = lookup("STAFFDESK_LOGIN_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LOGIN_DELAY_MS);

        Ok(Config {
            store_path,
            time_zone,
            submission_day,
            login_delay_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.store_path, PathBuf::from("./staffdesk.json"));
        assert_eq!(config.time_zone, chrono_tz::UTC);
        assert_eq!(config.submission_day, Weekday::Fri);
        assert_eq!(config.login_delay_ms, 1000);
    }

    #[test]
    fn values_are_read_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("STAFFDESK_STORE_PATH", "/tmp/desk.json"),
            ("APP_TIMEZONE", "Asia/Tokyo"),
            ("STAFFDESK_SUBMISSION_DAY", "thursday"),
            ("STAFFDESK_LOGIN_DELAY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.store_path, PathBuf::from("/tmp/desk.json"));
        assert_eq!(config.time_zone, chrono_tz::Asia::Tokyo);
        assert_eq!(config.submission_day, Weekday::Thu);
        assert_eq!(config.login_delay_ms, 0);
    }

    #[test]
    fn invalid_timezone_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("APP_TIMEZONE", "Mars/Olympus")]))
            .unwrap_err();
        assert!(err.to_string().contains("APP_TIMEZONE"));
    }

    #[test]
    fn invalid_submission_day_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("STAFFDESK_SUBMISSION_DAY", "someday")]))
            .unwrap_err();
        assert!(err.to_string().contains("STAFFDESK_SUBMISSION_DAY"));
    }

    #[test]
    fn unparsable_delay_falls_back_to_default() {
        let config =
            Config::from_lookup(lookup_from(&[("STAFFDESK_LOGIN_DELAY_MS", "soon")])).unwrap();
        assert_eq!(config.login_delay_ms, 1000);
    }
}

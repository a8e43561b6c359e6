use std::env;
use std::str::FromStr;

// Main configuration container, filled from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub catalog: CatalogConfig,
    pub seat_map: SeatMapConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected `pretty` or `json`, got `{}`", other)),
        }
    }
}

// Relational schema; disabled when no URL is set
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub pool_size: u32,
}

// Admin tables live in Redis when a URL is set, in process memory otherwise
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: Option<String>,
}

// External movies/theaters backend
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct SeatMapConfig {
    /// Chance that a generated seat starts out booked.
    pub booked_probability: f64,
    /// Open seat maps untouched for this long are discarded.
    pub idle_ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Config {
            app: AppConfig {
                host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "PORT", 8000)?,
                environment: optional("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
                rust_log: optional("RUST_LOG")
                    .unwrap_or_else(|| "cinema_booking=debug,tower_http=debug".to_string()),
                log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
            },
            database: DatabaseConfig {
                url: optional("DATABASE_URL"),
                pool_size: parse_or(&lookup, "DB_POOL_SIZE", 5)?,
            },
            redis: RedisConfig {
                url: optional("REDIS_URL"),
            },
            catalog: CatalogConfig {
                base_url: optional("CATALOG_URL").map(|u| u.trim_end_matches('/').to_string()),
                timeout_seconds: parse_or(&lookup, "CATALOG_TIMEOUT_SECONDS", 10)?,
            },
            seat_map: SeatMapConfig {
                booked_probability: parse_or(&lookup, "SEAT_BOOKED_PROBABILITY", 0.15)?,
                idle_ttl_seconds: parse_or(&lookup, "SEAT_MAP_IDLE_TTL_SECONDS", 1800)?,
                sweep_interval_seconds: parse_or(&lookup, "SEAT_MAP_SWEEP_INTERVAL_SECONDS", 60)?,
            },
        };

        let p = config.seat_map.booked_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::Invalid {
                key: "SEAT_BOOKED_PROBABILITY",
                value: p.to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }

        if config.seat_map.sweep_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                key: "SEAT_MAP_SWEEP_INTERVAL_SECONDS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(config)
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_need_no_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.log_format, LogFormat::Pretty);
        assert!(config.redis.url.is_none());
        assert!(config.database.url.is_none());
        assert!(config.catalog.base_url.is_none());
        assert_eq!(config.seat_map.booked_probability, 0.15);
    }

    #[test]
    fn catalog_url_loses_trailing_slash() {
        let config = config_from(&[("CATALOG_URL", "http://localhost:4000/")]).unwrap();
        assert_eq!(config.catalog.base_url.as_deref(), Some("http://localhost:4000"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", " "), ("REDIS_URL", "")]).unwrap();
        assert_eq!(config.app.port, 8000);
        assert!(config.redis.url.is_none());
    }

    #[test]
    fn bad_port_is_reported() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().starts_with("PORT has an invalid value `eighty`"));
    }

    #[test]
    fn probability_must_be_a_fraction() {
        assert!(config_from(&[("SEAT_BOOKED_PROBABILITY", "1.5")]).is_err());
        let config = config_from(&[("SEAT_BOOKED_PROBABILITY", "0")]).unwrap();
        assert_eq!(config.seat_map.booked_probability, 0.0);
    }

    #[test]
    fn sweep_interval_must_be_positive() {
        let err = config_from(&[("SEAT_MAP_SWEEP_INTERVAL_SECONDS", "0")]).unwrap_err();
        assert!(err.to_string().starts_with("SEAT_MAP_SWEEP_INTERVAL_SECONDS has an invalid value `0`"));
        let config = config_from(&[("SEAT_MAP_SWEEP_INTERVAL_SECONDS", "5")]).unwrap();
        assert_eq!(config.seat_map.sweep_interval_seconds, 5);
    }

    #[test]
    fn json_log_format() {
        let config = config_from(&[("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(config.app.log_format, LogFormat::Json);
    }
}

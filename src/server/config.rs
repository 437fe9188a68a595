use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::server::error::config::ConfigError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
/// Top of every hour, in the six-field (seconds first) cron format.
const DEFAULT_REMINDER_SCHEDULE: &str = "0 0 * * * *";

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,

    pub host: IpAddr,
    pub port: u16,

    /// Cron expression driving the document reminder job.
    pub reminder_schedule: String,

    /// Origins allowed to make cross-origin requests. `None` accepts every origin.
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable by name, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is not set
    /// - `Err(ConfigError::InvalidEnvVar)` - `PORT` or `HOST` cannot be parsed, or
    ///   `CORS_ALLOWED_ORIGINS` names no origin
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url =
            get("DATABASE_URL").ok_or(ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|e| invalid("PORT", &value, e))?,
            None => DEFAULT_PORT,
        };

        let host = match get("HOST") {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|e| invalid("HOST", &value, e))?,
            None => DEFAULT_HOST,
        };

        let reminder_schedule =
            get("REMINDER_SCHEDULE").unwrap_or_else(|| DEFAULT_REMINDER_SCHEDULE.to_string());

        let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(value) => {
                let origins: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect();

                if origins.is_empty() {
                    return Err(invalid(
                        "CORS_ALLOWED_ORIGINS",
                        &value,
                        "list contains no origins",
                    ));
                }

                Some(origins)
            }
            None => None,
        };

        Ok(Self {
            database_url,
            host,
            port,
            reminder_schedule,
            cors_allowed_origins,
        })
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(name: &str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

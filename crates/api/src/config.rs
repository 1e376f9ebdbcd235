use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Errors raised while loading configuration. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read database password from {}: {source}", path.display())]
    PasswordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(#[source] sqlx::Error),
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for the compose deployment (database
/// host `db`, password mounted as a secret file).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
}

/// Connection target for the blog store.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL. When set, the discrete fields below are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub name: String,
    /// File holding the password (a mounted secret).
    pub password_file: PathBuf,
    /// `0` opens a dedicated connection per operation; anything else uses a
    /// pool of at most that many connections.
    pub max_connections: u32,
    /// Upper bound on one store operation, connect included. Always below
    /// the HTTP request timeout so a stalled store surfaces as a 500.
    pub timeout_secs: u64,
    /// Emit a tracing event for every store operation.
    pub trace_ops: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `HOST`                 | `0.0.0.0`                   |
    /// | `PORT`                 | `3000`                      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    /// | `LOG_FORMAT`           | `text` (`json` also valid)  |
    /// | `DATABASE_URL`         | unset                       |
    /// | `DB_HOST`              | `db`                        |
    /// | `DB_PORT`              | `5432`                      |
    /// | `DB_USER`              | `postgres`                  |
    /// | `DB_NAME`              | `example`                   |
    /// | `DB_PASSWORD_FILE`     | `/run/secrets/db-password`  |
    /// | `DB_MAX_CONNECTIONS`   | `0`                         |
    /// | `DB_TIMEOUT_SECS`      | `10`                        |
    /// | `STORE_TRACE_OPS`      | `false`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or(&lookup, "PORT", 3000)?;
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'text' or 'json'".into(),
                })
            }
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            host: lookup("DB_HOST").unwrap_or_else(|| "db".into()),
            port: parse_or(&lookup, "DB_PORT", 5432)?,
            user: lookup("DB_USER").unwrap_or_else(|| "postgres".into()),
            name: lookup("DB_NAME").unwrap_or_else(|| "example".into()),
            password_file: lookup("DB_PASSWORD_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/run/secrets/db-password")),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 0)?,
            timeout_secs: parse_or(&lookup, "DB_TIMEOUT_SECS", 10)?,
            trace_ops: parse_or(&lookup, "STORE_TRACE_OPS", false)?,
        };

        if database.timeout_secs == 0 || database.timeout_secs >= request_timeout_secs {
            return Err(ConfigError::Invalid {
                key: "DB_TIMEOUT_SECS",
                value: database.timeout_secs.to_string(),
                reason: format!(
                    "must be between 1 and REQUEST_TIMEOUT_SECS ({request_timeout_secs}) exclusive"
                ),
            });
        }

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            log_format,
            database,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build connect options, reading the password secret if no URL is set.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(ConfigError::DatabaseUrl);
        }

        let password = read_password(&self.password_file)?;
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name)
            .password(&password))
    }
}

/// Read a secret file, dropping the trailing newline editors and `echo` add.
fn read_password(path: &Path) -> Result<String, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::PasswordFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string())
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
    }
}

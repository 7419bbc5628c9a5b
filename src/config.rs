use std::str::FromStr;

use anyhow::{bail, Context};
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub max_connections: u32,
    /// The single origin allowed to make credentialed cross-origin calls.
    pub allowed_origin: String,
    /// Serves `GET /api/user123`. Off unless explicitly enabled.
    pub expose_credentials: bool,
    pub seed_credential: Option<SeedCredential>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
        name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedCredential {
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = match lookup("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => DatabaseConfig::Parts {
                host: lookup("DB_HOST").context("DATABASE_URL or DB_HOST must be set")?,
                port: parse_or(&lookup, "DB_PORT", 5432)?,
                user: lookup("DB_USER"),
                password: lookup("DB_PASSWORD"),
                name: lookup("DB_NAME"),
            },
        };

        let seed_credential = match (lookup("SEED_USERNAME"), lookup("SEED_PASSWORD")) {
            (Some(username), Some(password)) => Some(SeedCredential { username, password }),
            (None, None) => None,
            _ => bail!("SEED_USERNAME and SEED_PASSWORD must be set together"),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 5000)?,
            database,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            allowed_origin: lookup("ALLOWED_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            expose_credentials: parse_flag(&lookup, "EXPOSE_CREDENTIALS")?,
            seed_credential,
        })
    }

    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        match &self.database {
            DatabaseConfig::Url(url) => {
                PgConnectOptions::from_str(url).context("DATABASE_URL is not a valid Postgres URL")
            }
            DatabaseConfig::Parts {
                host,
                port,
                user,
                password,
                name,
            } => {
                let mut opts = PgConnectOptions::new().host(host).port(*port);
                if let Some(user) = user {
                    opts = opts.username(user);
                }
                if let Some(password) = password {
                    opts = opts.password(password);
                }
                if let Some(name) = name {
                    opts = opts.database(name);
                }
                Ok(opts)
            }
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => bail!("{} must be true/false, got {:?}", key, v),
    }
}

use std::net::{IpAddr, Ipv4Addr};

use serde::Serialize;

const DEFAULT_PORT: u16 = 8081;
const DEFAULT_POOL_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    Dev,
    Staging,
    Production,
}

impl Env {
    pub fn from_env() -> Self {
        match var("ENVIRONMENT") {
            Ok(Some(env)) => match env.as_str() {
                "dev" | "development" => Env::Dev,
                "staging" => Env::Staging,
                "production" => Env::Production,
                _ => Env::Dev,
            },
            _ => Env::Dev,
        }
    }
}

pub enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: usize,
    },
    Memory,
}

pub struct ServerConfig {
    pub env: Env,
    pub host: IpAddr,
    pub port: u16,
    pub frontend_url: Option<String>,
    pub store: StoreBackend,
}

fn var(key: &str) -> Result<Option<String>, String> {
    match std::env::var(key) {
        Ok(env) => Ok(Some(env)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(format!(
            "Could not get the environment variable `{key}` due to unicode error"
        )),
    }
}

fn required_var(key: &str) -> String {
    let val = var(key);
    match val {
        Ok(val) => match val {
            Some(val) => val,
            None => {
                tracing::error!("Environment variable `{key}` is required");
                std::process::exit(1)
            }
        },
        Err(e) => {
            tracing::error!(
                "Environment variable `{key}` is required, but could not retrieve: {e}"
            );
            std::process::exit(1)
        }
    }
}

/// Parses an optional variable, keeping the default when it is missing or
/// malformed.
fn parsed_var<T: std::str::FromStr>(key: &str, default: T) -> T {
    match var(key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Environment variable `{key}` has an invalid value `{raw}`, using the default");
            default
        }),
        _ => default,
    }
}

impl ServerConfig {
    pub fn new_from_env(env: Env) -> Self {
        let store = match var("BLOG_STORE") {
            Ok(Some(kind)) if kind == "memory" => {
                tracing::warn!("Using the in-memory blog store, data is lost on restart");
                StoreBackend::Memory
            }
            _ => StoreBackend::Postgres {
                database_url: required_var("DATABASE_URL"),
                max_connections: parsed_var("DB_POOL_MAX", DEFAULT_POOL_SIZE),
            },
        };

        ServerConfig {
            env,
            host: parsed_var("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parsed_var("PORT", DEFAULT_PORT),
            frontend_url: var("FRONTEND_URL").ok().flatten(),
            store,
        }
    }
}

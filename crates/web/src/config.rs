use anyhow::{Context, Result, bail};
use storage::services::DEFAULT_WINDOW_SIZE;

/// Largest matchweek window a client may ask for (a 20-club double round robin).
pub const MAX_WINDOW_SIZE: usize = 38;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub matchweek_window_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let matchweek_window_size = match get("MATCHWEEK_WINDOW_SIZE") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("MATCHWEEK_WINDOW_SIZE must be a number")?,
            None => DEFAULT_WINDOW_SIZE,
        };

        if !(1..=MAX_WINDOW_SIZE).contains(&matchweek_window_size) {
            bail!(
                "MATCHWEEK_WINDOW_SIZE must be between 1 and {}",
                MAX_WINDOW_SIZE
            );
        }

        Ok(Self {
            host: get("HOST").context("Cannot load HOST env variable")?,
            port: get("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: get("DATABASE_URL").context("Cannot load DATABASE_URL env variable")?,
            api_keys: get("API_KEYS").unwrap_or_default(),
            matchweek_window_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("HOST", "127.0.0.1"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/matchday"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_source(source(BASE)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_keys, "");
        assert_eq!(config.matchweek_window_size, DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn test_window_size_override() {
        let mut vars = BASE.to_vec();
        vars.push(("MATCHWEEK_WINDOW_SIZE", "7"));
        let config = Config::from_source(source(&vars)).unwrap();
        assert_eq!(config.matchweek_window_size, 7);
    }

    #[test]
    fn test_window_size_out_of_range() {
        let mut vars = BASE.to_vec();
        vars.push(("MATCHWEEK_WINDOW_SIZE", "0"));
        assert!(Config::from_source(source(&vars)).is_err());
    }

    #[test]
    fn test_missing_database_url() {
        let vars = &BASE[..2];
        assert!(Config::from_source(source(vars)).is_err());
    }

    #[test]
    fn test_invalid_port() {
        let vars = [
            ("HOST", "127.0.0.1"),
            ("PORT", "http"),
            ("DATABASE_URL", "postgres://localhost/matchday"),
        ];
        assert!(Config::from_source(source(&vars)).is_err());
    }
}

//! Client configuration from environment variables
//!
//! Variables:
//! - `COLLATEX_URL`: base URL the service path is resolved against
//!   (e.g. `http://localhost:7369/`)
//! - `COLLATEX_SERVICE`: service path or absolute URL (default `collate`)
//! - `COLLATEX_ALGORITHM`: `dekker`, `needleman-wunsch` or `medite`
//! - `COLLATEX_DISTANCE`: enables Levenshtein token matching with this distance
//! - `COLLATEX_JOINED`: `true` or `false`
//! - `COLLATEX_TIMEOUT_SECS`: request timeout
//!
//! Unset or empty variables keep the request defaults. Command-line flags
//! override whatever is loaded here.

use crate::collatex::error::{CollateXError, Result};
use crate::collatex::request::{Algorithm, CollationRequest, DEFAULT_SERVICE_URL};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL for relative service paths
    pub base_url: Option<String>,

    /// Service path or absolute URL
    pub service_url: String,

    /// Alignment algorithm
    pub algorithm: Algorithm,

    /// Levenshtein distance; `None` means exact matching
    pub fuzzy_distance: Option<u32>,

    /// Whether the service joins adjacent aligned tokens
    pub joined: bool,

    /// Request timeout (none = transport default)
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: None,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            algorithm: Algorithm::default(),
            fuzzy_distance: None,
            joined: true,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from any variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty string = not set
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = ClientConfig::default();

        if let Some(url) = get("COLLATEX_URL") {
            config.base_url = Some(url);
        }

        if let Some(service) = get("COLLATEX_SERVICE") {
            config.service_url = service;
        }

        if let Some(algorithm) = get("COLLATEX_ALGORITHM") {
            config.algorithm = algorithm.parse()?;
        }

        if let Some(distance) = get("COLLATEX_DISTANCE") {
            let distance = distance.trim().parse::<u32>().map_err(|_| {
                CollateXError::Config(format!(
                    "COLLATEX_DISTANCE must be a non-negative integer, got '{}'",
                    distance
                ))
            })?;
            config.fuzzy_distance = Some(distance);
        }

        if let Some(joined) = get("COLLATEX_JOINED") {
            config.joined = parse_bool("COLLATEX_JOINED", &joined)?;
        }

        if let Some(timeout) = get("COLLATEX_TIMEOUT_SECS") {
            let secs = timeout.trim().parse::<u64>().map_err(|_| {
                CollateXError::Config(format!(
                    "COLLATEX_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    timeout
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Request configuration described by this config
    pub fn request(&self) -> CollationRequest {
        let request = CollationRequest::new()
            .with_service_url(self.service_url.clone())
            .with_algorithm(self.algorithm)
            .with_joined(self.joined);

        match self.fuzzy_distance {
            Some(distance) => request.with_fuzzy_matching(Some(distance)),
            None => request.with_exact_matching(),
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CollateXError::Config(format!(
            "{} must be 'true' or 'false', got '{}'",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collatex::request::TokenComparator;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ClientConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.request(), CollationRequest::new());
    }

    #[test]
    fn test_all_variables() {
        let config = load(&[
            ("COLLATEX_URL", "http://localhost:7369/"),
            ("COLLATEX_SERVICE", "api/collate"),
            ("COLLATEX_ALGORITHM", "medite"),
            ("COLLATEX_DISTANCE", "2"),
            ("COLLATEX_JOINED", "false"),
            ("COLLATEX_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert_eq!(config.base_url.as_deref(), Some("http://localhost:7369/"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));

        let request = config.request();
        assert_eq!(request.service_url(), "api/collate");
        assert_eq!(request.algorithm(), Algorithm::Medite);
        assert_eq!(
            request.token_comparator(),
            TokenComparator::Levenshtein { distance: 2 }
        );
        assert!(!request.joined());
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = load(&[("COLLATEX_ALGORITHM", ""), ("COLLATEX_JOINED", "  ")]).unwrap();
        assert_eq!(config.algorithm, Algorithm::Dekker);
        assert!(config.joined);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("COLLATEX_ALGORITHM", "fastest")]),
            Err(CollateXError::Config(_))
        ));
        assert!(matches!(
            load(&[("COLLATEX_DISTANCE", "-1")]),
            Err(CollateXError::Config(_))
        ));
        assert!(matches!(
            load(&[("COLLATEX_JOINED", "yes")]),
            Err(CollateXError::Config(_))
        ));
        assert!(matches!(
            load(&[("COLLATEX_TIMEOUT_SECS", "soon")]),
            Err(CollateXError::Config(_))
        ));
    }
}

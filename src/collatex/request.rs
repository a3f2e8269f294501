//! Collation request configuration
//!
//! `CollationRequest` is an immutable value: every `with_*` method consumes
//! the request and returns an updated copy. Each round trip serializes a
//! snapshot of the configuration, so changing it afterwards never touches a
//! request already in flight.

use super::error::{CollateXError, Result as CollateXResult};
use super::witness::Witness;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default service endpoint, resolved against the client's base URL
pub const DEFAULT_SERVICE_URL: &str = "collate";

/// Default edit distance for fuzzy token matching
pub const DEFAULT_FUZZY_DISTANCE: u32 = 1;

/// Alignment algorithm run by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    Dekker,
    NeedlemanWunsch,
    Medite,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dekker => "dekker",
            Algorithm::NeedlemanWunsch => "needleman-wunsch",
            Algorithm::Medite => "medite",
        }
    }
}

impl FromStr for Algorithm {
    type Err = CollateXError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dekker" => Ok(Algorithm::Dekker),
            "needleman-wunsch" | "needlemanwunsch" => Ok(Algorithm::NeedlemanWunsch),
            "medite" => Ok(Algorithm::Medite),
            other => Err(CollateXError::Config(format!(
                "Unknown algorithm '{}' (expected dekker, needleman-wunsch or medite)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the service decides whether two tokens match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TokenComparator {
    /// Tokens match only when equal
    #[default]
    Equality,
    /// Tokens match within the given edit distance
    Levenshtein { distance: u32 },
}

/// Immutable collation configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollationRequest {
    service_url: String,
    algorithm: Algorithm,
    token_comparator: TokenComparator,
    joined: bool,
}

impl Default for CollationRequest {
    fn default() -> Self {
        CollationRequest {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            algorithm: Algorithm::default(),
            token_comparator: TokenComparator::default(),
            joined: true,
        }
    }
}

impl CollationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn token_comparator(&self) -> TokenComparator {
        self.token_comparator
    }

    pub fn joined(&self) -> bool {
        self.joined
    }

    pub fn with_service_url(self, service_url: impl Into<String>) -> Self {
        CollationRequest {
            service_url: service_url.into(),
            ..self
        }
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        CollationRequest { algorithm, ..self }
    }

    pub fn with_dekker(self) -> Self {
        self.with_algorithm(Algorithm::Dekker)
    }

    pub fn with_needleman_wunsch(self) -> Self {
        self.with_algorithm(Algorithm::NeedlemanWunsch)
    }

    pub fn with_medite(self) -> Self {
        self.with_algorithm(Algorithm::Medite)
    }

    pub fn with_exact_matching(self) -> Self {
        CollationRequest {
            token_comparator: TokenComparator::Equality,
            ..self
        }
    }

    /// Match tokens within `max_distance` edits (default 1)
    pub fn with_fuzzy_matching(self, max_distance: Option<u32>) -> Self {
        CollationRequest {
            token_comparator: TokenComparator::Levenshtein {
                distance: max_distance.unwrap_or(DEFAULT_FUZZY_DISTANCE),
            },
            ..self
        }
    }

    pub fn with_joined(self, joined: bool) -> Self {
        CollationRequest { joined, ..self }
    }

    /// Serialize the request body for the given witnesses
    pub fn body(&self, witnesses: &[Witness]) -> CollateXResult<Vec<u8>> {
        serialize_body(&CollationBody {
            witnesses,
            algorithm: self.algorithm,
            token_comparator: self.token_comparator,
            joined: self.joined,
        })
    }
}

fn serialize_body<T: Serialize>(body: &T) -> CollateXResult<Vec<u8>> {
    serde_json::to_vec(body)
        .map_err(|e| CollateXError::Request(format!("Failed to serialize request body: {}", e)))
}

/// Wire format of the POST body
#[derive(Serialize)]
struct CollationBody<'a> {
    witnesses: &'a [Witness],
    algorithm: Algorithm,
    #[serde(rename = "tokenComparator")]
    token_comparator: TokenComparator,
    joined: bool,
}

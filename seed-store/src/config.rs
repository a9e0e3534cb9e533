//! Runtime and collection configuration.
//!
//! All settings are read once at startup and passed into the pipeline as a
//! plain value. Environment variables used:
//! - `QDRANT_HOST` (default: "qdrant")
//! - `QDRANT_PORT` (default: 6334)
//! - `QDRANT_HTTPS` (default: false)
//! - `QDRANT_API_KEY` (optional, passed through as-is)
//! - `QDRANT_TIMEOUT_SECS` (default: 60)
//! - `COLLECTION_NAME` (default: "nt-cctv-vehicles")
//! - `QDRANT_DISTANCE` (values: "Cosine" | "Dot" | "Euclid" | "Manhattan"; default: "Cosine")
//! - `SEED_RETRY_INTERVAL_SECS` (default: 3)
//! - `SEED_MAX_ATTEMPTS` (optional; unset means retry forever)
//! - `SEED_DATA_PATH` (default: "data.json")

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::errors::SeedError;

pub mod defaults {
    pub const HOST: &str = "qdrant";
    pub const PORT: u16 = 6334;
    pub const HTTPS: bool = false;
    pub const TIMEOUT_SECS: u64 = 60;
    pub const COLLECTION_NAME: &str = "nt-cctv-vehicles";
    pub const RETRY_INTERVAL_SECS: u64 = 3;
    pub const DATA_PATH: &str = "data.json";
}

/// Distance function used for the vector space.
///
/// Parsed case-insensitively from `QDRANT_DISTANCE`; unknown names are an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceKind {
    /// Cosine distance (recommended for most embeddings).
    Cosine,
    /// Dot product (useful for normalized vectors).
    #[serde(alias = "dotproduct")]
    Dot,
    /// Euclidean distance (L2).
    #[serde(alias = "euclidean", alias = "l2")]
    Euclid,
    /// Manhattan distance (L1).
    #[serde(alias = "l1")]
    Manhattan,
}

impl FromStr for DistanceKind {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
    }
}

/// Describes the vector space of the collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
    /// Distance function.
    pub distance: DistanceKind,
}

/// Configuration for one seeding run.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    /// Qdrant host name.
    pub host: String,
    /// Qdrant gRPC port.
    pub port: u16,
    /// Use TLS (`https`) instead of plaintext.
    pub https: bool,
    /// Optional API key; `None` means no key is sent.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Target collection name.
    pub collection: String,
    /// Distance function used when the collection has to be created.
    pub distance: DistanceKind,
    /// Fixed delay between connection attempts.
    pub retry_interval: Duration,
    /// Optional cap on connection attempts (`None` = retry forever).
    pub max_attempts: Option<u32>,
    /// JSON array of input records.
    pub data_path: PathBuf,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_string(),
            port: defaults::PORT,
            https: defaults::HTTPS,
            api_key: None,
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
            collection: defaults::COLLECTION_NAME.to_string(),
            distance: DistanceKind::Cosine,
            retry_interval: Duration::from_secs(defaults::RETRY_INTERVAL_SECS),
            max_attempts: None,
            data_path: PathBuf::from(defaults::DATA_PATH),
        }
    }
}

impl SeedConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to [`defaults`]; present but malformed values
    /// fail with [`SeedError::EnvParse`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SeedError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cfg = Self {
            host: lookup("QDRANT_HOST").unwrap_or_else(|| defaults::HOST.into()),
            port: parse_var(&lookup, "QDRANT_PORT")?.unwrap_or(defaults::PORT),
            https: parse_var(&lookup, "QDRANT_HTTPS")?.unwrap_or(defaults::HTTPS),
            api_key: lookup("QDRANT_API_KEY"),
            timeout: Duration::from_secs(
                parse_var(&lookup, "QDRANT_TIMEOUT_SECS")?.unwrap_or(defaults::TIMEOUT_SECS),
            ),
            collection: lookup("COLLECTION_NAME")
                .unwrap_or_else(|| defaults::COLLECTION_NAME.into()),
            distance: parse_var(&lookup, "QDRANT_DISTANCE")?.unwrap_or(DistanceKind::Cosine),
            retry_interval: Duration::from_secs(
                parse_var(&lookup, "SEED_RETRY_INTERVAL_SECS")?
                    .unwrap_or(defaults::RETRY_INTERVAL_SECS),
            ),
            max_attempts: parse_var(&lookup, "SEED_MAX_ATTEMPTS")?,
            data_path: lookup("SEED_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(defaults::DATA_PATH)),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), SeedError> {
        if self.host.trim().is_empty() {
            return Err(SeedError::Config("host is empty".into()));
        }
        if self.port == 0 {
            return Err(SeedError::Config("port must be > 0".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(SeedError::Config("collection is empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(SeedError::Config("timeout must be > 0".into()));
        }
        if self.max_attempts == Some(0) {
            return Err(SeedError::Config("max_attempts must be > 0 when set".into()));
        }
        Ok(())
    }

    /// gRPC endpoint, e.g. `http://qdrant:6334`.
    pub fn url(&self) -> String {
        let scheme = if self.https { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    /// Logs a short summary. The API key is only reported as present/absent.
    pub fn log_summary(&self) {
        info!("========================================");
        info!("Seeding Qdrant collection");
        info!("   -> Qdrant URL  : {}", self.url());
        info!("   -> API key     : {}", if self.api_key.is_some() { "set" } else { "not set" });
        info!("   -> Collection  : {}", self.collection);
        info!("   -> Distance    : {:?}", self.distance);
        info!("   -> Input file  : {}", self.data_path.display());
        match self.max_attempts {
            Some(n) => info!("   -> Retry       : every {:?}, max {n} attempts", self.retry_interval),
            None => info!("   -> Retry       : every {:?}, unbounded", self.retry_interval),
        }
        info!("========================================");
    }
}

/// Read and parse an optional variable; `Ok(None)` when it is unset.
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, SeedError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(v) => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| SeedError::EnvParse {
                key: key.into(),
                value: v,
            }),
        None => Ok(None),
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
    fn defaults_when_nothing_set() {
        let cfg = SeedConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.url(), "http://qdrant:6334");
        assert_eq!(cfg.collection, "nt-cctv-vehicles");
        assert_eq!(cfg.distance, DistanceKind::Cosine);
        assert_eq!(cfg.retry_interval, Duration::from_secs(3));
        assert_eq!(cfg.timeout, Duration::from_secs(60));
        assert_eq!(cfg.max_attempts, None);
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.data_path, PathBuf::from("data.json"));
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = SeedConfig::from_lookup(lookup_from(&[
            ("QDRANT_HOST", "db.internal"),
            ("QDRANT_PORT", "7000"),
            ("QDRANT_HTTPS", "true"),
            ("QDRANT_API_KEY", "secret"),
            ("COLLECTION_NAME", "cars"),
            ("QDRANT_DISTANCE", "dot"),
            ("SEED_MAX_ATTEMPTS", "5"),
            ("SEED_RETRY_INTERVAL_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(cfg.url(), "https://db.internal:7000");
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.collection, "cars");
        assert_eq!(cfg.distance, DistanceKind::Dot);
        assert_eq!(cfg.max_attempts, Some(5));
        assert_eq!(cfg.retry_interval, Duration::from_secs(1));
    }

    #[test]
    fn malformed_number_is_reported_with_key() {
        let err = SeedConfig::from_lookup(lookup_from(&[("QDRANT_PORT", "abc")])).unwrap_err();
        match err {
            SeedError::EnvParse { key, value } => {
                assert_eq!(key, "QDRANT_PORT");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn distance_names_are_case_insensitive_with_aliases() {
        for (raw, want) in [
            ("COSINE", DistanceKind::Cosine),
            ("DotProduct", DistanceKind::Dot),
            ("l2", DistanceKind::Euclid),
            (" Euclid ", DistanceKind::Euclid),
            ("manhattan", DistanceKind::Manhattan),
            ("L1", DistanceKind::Manhattan),
        ] {
            let cfg = SeedConfig::from_lookup(lookup_from(&[("QDRANT_DISTANCE", raw)])).unwrap();
            assert_eq!(cfg.distance, want, "input {raw:?}");
        }
    }

    #[test]
    fn unknown_distance_is_reported_with_key() {
        let err = SeedConfig::from_lookup(lookup_from(&[("QDRANT_DISTANCE", "cosin")]))
            .unwrap_err();
        match err {
            SeedError::EnvParse { key, value } => {
                assert_eq!(key, "QDRANT_DISTANCE");
                assert_eq!(value, "cosin");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_attempt_cap_is_rejected() {
        let err =
            SeedConfig::from_lookup(lookup_from(&[("SEED_MAX_ATTEMPTS", "0")])).unwrap_err();
        assert!(matches!(err, SeedError::Config(_)));
    }

    #[test]
    fn empty_collection_is_rejected() {
        let err = SeedConfig::from_lookup(lookup_from(&[("COLLECTION_NAME", "  ")])).unwrap_err();
        assert!(matches!(err, SeedError::Config(_)));
    }
}

//! One-shot seeding of a Qdrant collection from a JSON dump.
//!
//! The pipeline is strictly sequential:
//! - Connect: probe Qdrant until it answers (fixed delay, unbounded by default)
//! - Ensure the target collection exists (size inferred from the first record)
//! - Map each input record into a point (`id`, `vectors`, rest → payload)
//! - Upsert all points in a single request
//!
//! [`Seeder`] wires configuration and the Qdrant client; the free functions
//! accept any [`VectorStore`].

mod config;
mod connect;
mod errors;
mod ingest;
mod io_json;
mod mappers;
mod qdrant_facade;
mod record;
mod store;

#[cfg(test)]
mod test_support;

pub use config::{DistanceKind, SeedConfig, VectorSpace, defaults};
pub use connect::{RetryPolicy, Sleeper, TokioSleeper, connect_with_retry};
pub use errors::SeedError;
pub use ingest::{SeedReport, ensure_collection, run, run_from_path, seed_records, write_batch};
pub use io_json::{parse_records, read_records};
pub use mappers::{infer_vector_size, to_point, to_points};
pub use qdrant_facade::QdrantFacade;
pub use record::{ID_FIELD, InputRecord, Point, PointKey, VECTOR_FIELD};
pub use store::{StoreFuture, VectorStore};

use tracing::trace;

/// High-level facade that wires configuration and the Qdrant client.
///
/// This is the single entry point recommended for application code.
pub struct Seeder {
    cfg: SeedConfig,
    client: QdrantFacade,
}

impl Seeder {
    /// Constructs a seeder from the given configuration.
    ///
    /// # Errors
    /// Returns `SeedError::Config` for invalid settings or
    /// `SeedError::Qdrant` if the client cannot be built.
    pub fn new(cfg: SeedConfig) -> Result<Self, SeedError> {
        trace!("Seeder::new collection={}", cfg.collection);
        let client = QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    pub fn config(&self) -> &SeedConfig {
        &self.cfg
    }

    /// Runs the full pipeline with real-time retry delays.
    ///
    /// # Errors
    /// Any error after a successful connection; connection failures only
    /// surface when an attempt cap is configured.
    pub async fn run(&self) -> Result<SeedReport, SeedError> {
        trace!("Seeder::run path={:?}", self.cfg.data_path);
        ingest::run(&self.cfg, &self.client, &TokioSleeper).await
    }
}

//! End-to-end seeding pipeline: connect → load → ensure collection → map → upsert.
//!
//! Every step after the connector is single-shot: any error propagates to
//! the caller and nothing is retried.

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::config::{DistanceKind, SeedConfig, VectorSpace};
use crate::connect::{RetryPolicy, Sleeper, connect_with_retry};
use crate::errors::SeedError;
use crate::io_json::read_records;
use crate::mappers::{infer_vector_size, to_points};
use crate::record::{InputRecord, Point};
use crate::store::VectorStore;

/// Outcome of one seeding run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedReport {
    /// Probes needed before the database answered.
    pub attempts: u32,
    /// Whether this run created the collection.
    pub created: bool,
    /// Dimensionality inferred from the first record.
    pub vector_size: usize,
    /// Points submitted in the single upsert.
    pub written: usize,
}

/// Runs the whole pipeline against `store` using the input file from `cfg`.
pub async fn run(
    cfg: &SeedConfig,
    store: &dyn VectorStore,
    sleeper: &dyn Sleeper,
) -> Result<SeedReport, SeedError> {
    run_from_path(cfg, store, sleeper, &cfg.data_path).await
}

/// Same as [`run`] with an explicit input path.
pub async fn run_from_path(
    cfg: &SeedConfig,
    store: &dyn VectorStore,
    sleeper: &dyn Sleeper,
    path: impl AsRef<Path>,
) -> Result<SeedReport, SeedError> {
    let attempts = connect_with_retry(store, &RetryPolicy::from_config(cfg), sleeper).await?;
    let records = read_records(path)?;
    let mut report = seed_records(store, &cfg.collection, cfg.distance, &records).await?;
    report.attempts = attempts;
    Ok(report)
}

/// Seeds already-loaded records into a connected store.
///
/// The returned report has `attempts == 0`; [`run`] fills it in.
///
/// # Errors
/// [`SeedError::EmptyInput`] / [`SeedError::EmptyVector`] before any
/// collection call; mapping errors before any write; store errors as-is.
#[instrument(skip(store, records), fields(records = records.len()))]
pub async fn seed_records(
    store: &dyn VectorStore,
    collection: &str,
    distance: DistanceKind,
    records: &[InputRecord],
) -> Result<SeedReport, SeedError> {
    let vector_size = infer_vector_size(records)?;
    debug!("Vector size determined: {}", vector_size);

    let space = VectorSpace {
        size: vector_size,
        distance,
    };
    let created = ensure_collection(store, collection, &space).await?;

    let points = to_points(records)?;
    let written = write_batch(store, collection, points).await?;

    info!("Done! Inserted {} points.", written);
    Ok(SeedReport {
        attempts: 0,
        created,
        vector_size,
        written,
    })
}

/// Creates the collection when it is missing. Returns `true` if created.
///
/// An existing collection is left untouched; its vector size and distance
/// are not compared with `space`.
pub async fn ensure_collection(
    store: &dyn VectorStore,
    collection: &str,
    space: &VectorSpace,
) -> Result<bool, SeedError> {
    info!(
        "Ensuring collection '{}' with size={} distance={:?}",
        collection, space.size, space.distance
    );

    if store.collection_exists(collection).await? {
        debug!("Collection '{}' already exists", collection);
        return Ok(false);
    }

    store.create_collection(collection, space).await?;
    Ok(true)
}

/// Sends all points in one upsert request and returns the count submitted.
pub async fn write_batch(
    store: &dyn VectorStore,
    collection: &str,
    points: Vec<Point>,
) -> Result<usize, SeedError> {
    info!(
        "Upserting {} points into collection '{}'",
        points.len(),
        collection
    );
    store.upsert(collection, points).await
}

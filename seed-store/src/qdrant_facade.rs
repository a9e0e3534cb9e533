//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant interactions live behind [`VectorStore`] so the pipeline can be
//! driven against an in-memory store in tests.

use std::collections::HashMap;

use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, ListValue, PointId, PointStruct, Struct,
    UpsertPointsBuilder, Value as QValue, VectorParamsBuilder, value,
};
use qdrant_client::{Payload, Qdrant};
use tracing::{debug, info};

use crate::config::{DistanceKind, SeedConfig, VectorSpace};
use crate::errors::SeedError;
use crate::record::{Point, PointKey};
use crate::store::{StoreFuture, VectorStore};

/// A facade over the Qdrant gRPC client.
pub struct QdrantFacade {
    client: Qdrant,
}

impl QdrantFacade {
    /// Builds the client from the given configuration.
    ///
    /// Reachability is checked separately by [`crate::connect_with_retry`].
    pub fn new(cfg: &SeedConfig) -> Result<Self, SeedError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.url()).timeout(cfg.timeout);
        if let Some(key) = &cfg.api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| SeedError::Qdrant(format!("client build: {e}")))?;

        Ok(Self { client })
    }
}

impl VectorStore for QdrantFacade {
    fn probe(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            let res = self
                .client
                .list_collections()
                .await
                .map_err(|e| SeedError::Qdrant(e.to_string()))?;
            debug!("Probe ok: {} collections visible", res.collections.len());
            Ok(())
        })
    }

    fn collection_exists<'a>(&'a self, collection: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            self.client
                .collection_exists(collection)
                .await
                .map_err(|e| SeedError::Qdrant(format!("collection_exists: {e}")))
        })
    }

    fn create_collection<'a>(
        &'a self,
        collection: &'a str,
        space: &'a VectorSpace,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(collection).vectors_config(
                        VectorParamsBuilder::new(space.size as u64, to_distance(space.distance)),
                    ),
                )
                .await
                .map_err(|e| SeedError::Qdrant(format!("create_collection: {e}")))?;

            info!("Collection '{}' created successfully", collection);
            Ok(())
        })
    }

    fn upsert<'a>(&'a self, collection: &'a str, points: Vec<Point>) -> StoreFuture<'a, usize> {
        Box::pin(async move {
            let count = points.len();
            let qpoints: Vec<PointStruct> = points.into_iter().map(to_point_struct).collect();

            let res = self
                .client
                .upsert_points(UpsertPointsBuilder::new(collection, qpoints).wait(true))
                .await
                .map_err(|e| SeedError::Qdrant(format!("upsert_points: {e}")))?;

            debug!("Upsert operation result={:?}", res.result);
            Ok(count)
        })
    }
}

fn to_distance(kind: DistanceKind) -> Distance {
    match kind {
        DistanceKind::Cosine => Distance::Cosine,
        DistanceKind::Dot => Distance::Dot,
        DistanceKind::Euclid => Distance::Euclid,
        DistanceKind::Manhattan => Distance::Manhattan,
    }
}

fn to_point_struct(p: Point) -> PointStruct {
    let id: PointId = match p.id {
        PointKey::Num(n) => n.into(),
        PointKey::Text(s) => s.into(),
    };
    let payload: HashMap<String, QValue> = p
        .payload
        .into_iter()
        .map(|(k, v)| (k, json_to_qvalue(v)))
        .collect();

    PointStruct::new(id, p.vector, Payload::from(payload))
}

/// Converts `serde_json::Value` into Qdrant `Value` (handles arrays/objects).
fn json_to_qvalue(v: serde_json::Value) -> QValue {
    use value::Kind as K;
    let kind = match v {
        serde_json::Value::String(s) => K::StringValue(s),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                K::IntegerValue(i)
            } else if n.is_u64() {
                // above i64::MAX; a double would lose digits
                K::StringValue(n.to_string())
            } else {
                K::DoubleValue(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::Bool(b) => K::BoolValue(b),
        serde_json::Value::Array(arr) => K::ListValue(ListValue {
            values: arr.into_iter().map(json_to_qvalue).collect(),
        }),
        serde_json::Value::Object(map) => K::StructValue(Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, json_to_qvalue(v)))
                .collect(),
        }),
        serde_json::Value::Null => K::NullValue(0),
    };
    QValue { kind: Some(kind) }
}

//! In-memory doubles shared by unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use std::{future::Future, pin::Pin};

use crate::config::VectorSpace;
use crate::connect::Sleeper;
use crate::errors::SeedError;
use crate::record::{Point, PointKey};
use crate::store::{StoreFuture, VectorStore};

/// A collection held in memory: its space plus points keyed by id.
#[derive(Clone, Debug)]
pub struct MemCollection {
    pub space: VectorSpace,
    pub points: BTreeMap<PointKey, Point>,
}

/// [`VectorStore`] with upsert-by-id semantics and call counters.
#[derive(Default)]
pub struct MemoryStore {
    failing_probes: AtomicU32,
    probe_calls: AtomicU32,
    create_calls: AtomicU32,
    upsert_calls: AtomicU32,
    fail_create: bool,
    collections: Mutex<HashMap<String, MemCollection>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first `n` probes fail.
    pub fn failing_probes(self, n: u32) -> Self {
        self.failing_probes.store(n, Ordering::SeqCst);
        self
    }

    /// Every `create_collection` call fails.
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Seeds an existing collection.
    pub fn with_collection(self, name: &str, space: VectorSpace) -> Self {
        self.collections.lock().unwrap().insert(
            name.to_string(),
            MemCollection {
                space,
                points: BTreeMap::new(),
            },
        );
        self
    }

    pub fn probe_calls(&self) -> u32 {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn upsert_calls(&self) -> u32 {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn collection(&self, name: &str) -> Option<MemCollection> {
        self.collections.lock().unwrap().get(name).cloned()
    }
}

impl VectorStore for MemoryStore {
    fn probe(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.probe_calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failing_probes.load(Ordering::SeqCst);
            if left > 0 {
                self.failing_probes.store(left - 1, Ordering::SeqCst);
                return Err(SeedError::Qdrant("connection refused".into()));
            }
            Ok(())
        })
    }

    fn collection_exists<'a>(&'a self, collection: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move { Ok(self.collections.lock().unwrap().contains_key(collection)) })
    }

    fn create_collection<'a>(
        &'a self,
        collection: &'a str,
        space: &'a VectorSpace,
    ) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(SeedError::Qdrant("create rejected".into()));
            }
            let mut cols = self.collections.lock().unwrap();
            if cols.contains_key(collection) {
                return Err(SeedError::Qdrant(format!(
                    "collection `{collection}` already exists"
                )));
            }
            cols.insert(
                collection.to_string(),
                MemCollection {
                    space: space.clone(),
                    points: BTreeMap::new(),
                },
            );
            Ok(())
        })
    }

    fn upsert<'a>(&'a self, collection: &'a str, points: Vec<Point>) -> StoreFuture<'a, usize> {
        Box::pin(async move {
            self.upsert_calls.fetch_add(1, Ordering::SeqCst);
            let mut cols = self.collections.lock().unwrap();
            let col = cols
                .get_mut(collection)
                .ok_or_else(|| SeedError::Qdrant(format!("collection `{collection}` not found")))?;

            // All-or-nothing, like a single Qdrant request.
            if let Some(bad) = points.iter().find(|p| p.vector.len() != col.space.size) {
                return Err(SeedError::Qdrant(format!(
                    "wrong vector dimension for point {}: expected {}, got {}",
                    bad.id,
                    col.space.size,
                    bad.vector.len()
                )));
            }

            let count = points.len();
            for p in points {
                col.points.insert(p.id.clone(), p);
            }
            Ok(count)
        })
    }
}

/// [`Sleeper`] that returns immediately and records requested delays.
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, dur: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.sleeps.lock().unwrap().push(dur);
        Box::pin(async {})
    }
}

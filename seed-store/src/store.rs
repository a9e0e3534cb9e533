use crate::config::VectorSpace;
use crate::errors::SeedError;
use crate::record::Point;
use std::{future::Future, pin::Pin};

/// Boxed future returned by [`VectorStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SeedError>> + Send + 'a>>;

/// Vector database operations needed to seed a collection.
///
/// Implement this trait to plug in another backend; [`crate::QdrantFacade`]
/// is the production implementation.
pub trait VectorStore: Send + Sync {
    /// Lightweight metadata query used as a health probe.
    fn probe(&self) -> StoreFuture<'_, ()>;

    /// Whether the named collection exists.
    fn collection_exists<'a>(&'a self, collection: &'a str) -> StoreFuture<'a, bool>;

    /// Creates the named collection with the given vector space.
    fn create_collection<'a>(
        &'a self,
        collection: &'a str,
        space: &'a VectorSpace,
    ) -> StoreFuture<'a, ()>;

    /// Inserts or overwrites all points in one request; returns how many were sent.
    fn upsert<'a>(&'a self, collection: &'a str, points: Vec<Point>) -> StoreFuture<'a, usize>;
}

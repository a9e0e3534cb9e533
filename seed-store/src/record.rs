//! Core data models used by the library.

use serde_json::{Map, Value};

/// One loosely-typed element of the input array.
///
/// Carries at least `id` and `vectors`; every other field is metadata.
pub type InputRecord = Map<String, Value>;

/// Field holding the point identifier.
pub const ID_FIELD: &str = "id";
/// Field holding the dense vector.
pub const VECTOR_FIELD: &str = "vectors";

/// Point identifier as accepted by Qdrant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PointKey {
    /// Unsigned integer id.
    Num(u64),
    /// String id (Qdrant expects a UUID and rejects anything else).
    Text(String),
}

impl std::fmt::Display for PointKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointKey::Num(n) => write!(f, "{n}"),
            PointKey::Text(s) => f.write_str(s),
        }
    }
}

/// Canonical unit written to the collection: id + vector + payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub id: PointKey,
    pub vector: Vec<f32>,
    pub payload: Map<String, Value>,
}

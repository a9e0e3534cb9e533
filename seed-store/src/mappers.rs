//! Mappers turning loosely-typed input records into canonical [`Point`]s.
//!
//! A record is partitioned into three parts: the `id` field, the `vectors`
//! field and everything else (the payload). Input records are only borrowed.

use serde_json::{Map, Value};

use crate::errors::SeedError;
use crate::record::{ID_FIELD, InputRecord, Point, PointKey, VECTOR_FIELD};

/// Infers the collection dimensionality from the first record.
///
/// Only the first record is inspected; uniform length across the rest is
/// assumed and left to the database to enforce.
///
/// # Errors
/// - [`SeedError::EmptyInput`] for an empty slice.
/// - [`SeedError::MissingField`] / [`SeedError::InvalidVector`] if the first
///   record has no usable `vectors` array.
/// - [`SeedError::EmptyVector`] if that array is empty.
pub fn infer_vector_size(records: &[InputRecord]) -> Result<usize, SeedError> {
    let first = records.first().ok_or(SeedError::EmptyInput)?;
    let arr = first
        .get(VECTOR_FIELD)
        .ok_or(SeedError::MissingField {
            index: 0,
            field: VECTOR_FIELD,
        })?
        .as_array()
        .ok_or(SeedError::InvalidVector { index: 0 })?;

    if arr.is_empty() {
        return Err(SeedError::EmptyVector);
    }
    Ok(arr.len())
}

/// Maps every record in order; the first malformed record aborts the batch.
pub fn to_points(records: &[InputRecord]) -> Result<Vec<Point>, SeedError> {
    records
        .iter()
        .enumerate()
        .map(|(index, r)| to_point(index, r))
        .collect()
}

/// Projects one record into a [`Point`].
///
/// `index` is only used for error reporting.
pub fn to_point(index: usize, record: &InputRecord) -> Result<Point, SeedError> {
    let id = record.get(ID_FIELD).ok_or(SeedError::MissingField {
        index,
        field: ID_FIELD,
    })?;
    let vector = record.get(VECTOR_FIELD).ok_or(SeedError::MissingField {
        index,
        field: VECTOR_FIELD,
    })?;

    let payload: Map<String, Value> = record
        .iter()
        .filter(|(k, _)| k.as_str() != ID_FIELD && k.as_str() != VECTOR_FIELD)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Point {
        id: point_key(index, id)?,
        vector: dense_vector(index, vector)?,
        payload,
    })
}

fn point_key(index: usize, v: &Value) -> Result<PointKey, SeedError> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .map(PointKey::Num)
            .ok_or(SeedError::InvalidId { index }),
        Value::String(s) => Ok(PointKey::Text(s.clone())),
        _ => Err(SeedError::InvalidId { index }),
    }
}

fn dense_vector(index: usize, v: &Value) -> Result<Vec<f32>, SeedError> {
    let arr = v.as_array().ok_or(SeedError::InvalidVector { index })?;
    arr.iter()
        .map(|x| x.as_f64().map(|f| f as f32).filter(|f| f.is_finite()))
        .collect::<Option<Vec<f32>>>()
        .ok_or(SeedError::InvalidVector { index })
}

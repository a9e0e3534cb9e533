//! JSON input reader.
//!
//! The input file is a single JSON array whose elements are objects
//! (see [`InputRecord`]). Anything else is rejected up front.

use std::io::{BufReader, Read};
use std::{fs::File, path::Path};

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::SeedError;
use crate::record::InputRecord;

/// Reads all records from a JSON array file.
///
/// # Errors
/// - [`SeedError::Io`] if the file cannot be opened or read.
/// - [`SeedError::Parse`] if the content is not a JSON array.
/// - [`SeedError::NotAnObject`] if any element is not an object.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<InputRecord>, SeedError> {
    info!("Reading input records: {:?}", path.as_ref());
    let file = File::open(path.as_ref())?;
    parse_records(BufReader::new(file))
}

/// Parses records from any reader holding a JSON array.
pub fn parse_records(reader: impl Read) -> Result<Vec<InputRecord>, SeedError> {
    let raw: Vec<Value> = serde_json::from_reader(reader)?;

    let mut out = Vec::with_capacity(raw.len());
    for (index, v) in raw.into_iter().enumerate() {
        match v {
            Value::Object(obj) => out.push(obj),
            _ => return Err(SeedError::NotAnObject { index }),
        }
    }

    debug!("Loaded {} input records", out.len());
    Ok(out)
}

//! Reading and writing of JSON-encoded files.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{from_reader, to_writer_pretty};
use thiserror::Error;

use crate::odds::{InvalidQuote, OddsTable, RawOdds};

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = File::open(path)?;
    Ok(from_reader(file)?)
}

/// JSON-encodes the `value` in pretty-printed form and writes it to a given `path`.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<(), io::Error> {
    let file = File::create(path)?;
    Ok(to_writer_pretty(file, value)?)
}

pub trait ReadJsonFile<D> {
    fn read_json_file(path: impl AsRef<Path>) -> Result<D, io::Error>;
}

impl<D: DeserializeOwned> ReadJsonFile<D> for D {
    fn read_json_file(path: impl AsRef<Path>) -> Result<D, io::Error> {
        read_json(path)
    }
}

pub trait WriteJsonFile {
    fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), io::Error>;
}

impl<S: Serialize> WriteJsonFile for S {
    fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), io::Error> {
        write_json(path, self)
    }
}

#[derive(Debug, Error)]
pub enum OddsFileError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Quote(#[from] InvalidQuote),
}

/// Reads an [OddsTable] from a JSON object of ticket identifiers to odds, in the same shape as
/// a decoded [payload](crate::payload).
pub fn read_odds(path: impl AsRef<Path>) -> Result<OddsTable, OddsFileError> {
    let raw = RawOdds::read_json_file(path)?;
    Ok(OddsTable::try_from(&raw)?)
}

/// Writes `odds` in the shape accepted by [read_odds], tickets in ascending order.
pub fn write_odds(path: impl AsRef<Path>, odds: &OddsTable) -> Result<(), io::Error> {
    RawOdds::from(odds).write_json_file(path)
}

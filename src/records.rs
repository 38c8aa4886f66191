//! CSV exports parsed into records.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Single CSV row keyed by the header columns.
///
/// Serializes into a JSON object with the keys in header order.
#[derive(Debug, Clone)]
pub struct Record {
    headers: Arc<StringRecord>,
    values: StringRecord,
}

impl Record {
    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|header| header == column)
            .and_then(|index| self.values.get(index))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().zip(self.values.iter())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("no such file: `{}`", path.display())]
    NotFound {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("permission denied: `{}`", path.display())]
    PermissionDenied {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("malformed CSV: duplicate column `{0}`")]
    DuplicateColumn(String),
}

impl ReadError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path, source },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// Stable error kind for the logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not-found",
            Self::PermissionDenied { .. } => "permission-denied",
            Self::Io { .. } => "io",
            Self::Parse(_) | Self::DuplicateColumn(_) => "parse",
        }
    }
}

/// Reads and parses the whole file. Nothing is cached.
pub async fn read_records(path: &Path) -> Result<Vec<Record>, ReadError> {
    let content = tokio::fs::read(path)
        .await
        .map_err(|source| ReadError::from_io(path, source))?;
    parse_records(&content)
}

/// Parses the CSV content, the first row is the header.
///
/// Rows with a field count different from the header's fail the whole parse,
/// and so does a header naming the same column twice.
pub fn parse_records(content: &[u8]) -> Result<Vec<Record>, ReadError> {
    let mut reader = ReaderBuilder::new().from_reader(content);
    let headers = Arc::new(reader.headers()?.clone());
    let mut seen = HashSet::with_capacity(headers.len());
    if let Some(column) = headers.iter().find(|column| !seen.insert(*column)) {
        return Err(ReadError::DuplicateColumn(column.to_string()));
    }
    let records = reader
        .records()
        .map(|values| {
            values
                .map(|values| Record {
                    headers: Arc::clone(&headers),
                    values,
                })
                .map_err(ReadError::from)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

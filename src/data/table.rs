use std::{io::Read, path::Path};

use crate::foundation::error::{NarravisError, NarravisResult};

/// One raw tabular row: ordered `(column, value)` pairs, untyped.
///
/// Rows keep their source column order so re-running normalization over the
/// same table is bit-identical. All IO is front-loaded here; everything
/// downstream of [`RawTable`] is pure.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawRow {
    columns: Vec<(String, String)>,
}

impl RawRow {
    /// Build a row from `(column, value)` pairs. Intended for tests and
    /// non-CSV collaborators feeding the normalizer directly.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a cell by column name. First match wins on duplicate headers.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// A loaded table: header-mapped rows in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RawTable {
    /// Rows in the order they appear in the source.
    pub rows: Vec<RawRow>,
}

/// Read a CSV file into a [`RawTable`], treating the first row as headers.
pub fn read_csv_path(path: impl AsRef<Path>) -> NarravisResult<RawTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| NarravisError::data(format!("open '{}': {e}", path.display())))?;
    read_csv(file).map_err(|e| match e {
        NarravisError::Data(msg) => NarravisError::data(format!("'{}': {msg}", path.display())),
        other => other,
    })
}

/// Read CSV content from any reader into a [`RawTable`].
pub fn read_csv<R: Read>(reader: R) -> NarravisResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| NarravisError::data(format!("csv headers: {e}")))?
        .clone();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| NarravisError::data(format!("csv record: {e}")))?;
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (
                    name.to_string(),
                    record.get(i).unwrap_or_default().to_string(),
                )
            })
            .collect();
        rows.push(RawRow { columns });
    }
    Ok(RawTable { rows })
}

#[cfg(test)]
#[path = "../../tests/unit/data/table.rs"]
mod tests;

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::SimError;
use crate::statistics::{ResultRow, RESULT_HEADER};

/// Destination of the per-temperature result rows, appended in simulation
/// order.
pub trait RowSink {
    fn push_row(&mut self, row: &ResultRow) -> Result<(), SimError>;
}

impl RowSink for Vec<ResultRow> {
    fn push_row(&mut self, row: &ResultRow) -> Result<(), SimError> {
        self.push(*row);
        Ok(())
    }
}

/// CSV result table: one header row, then one row per temperature.
///
/// Every appended row is flushed immediately so an interrupted sweep leaves
/// the temperatures finished so far on disk.
pub struct ResultWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl ResultWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| SimError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(RESULT_HEADER)
            .map_err(|source| SimError::Csv {
                path: path.clone(),
                source,
            })?;
        let mut out = Self { path, writer };
        out.flush()?;
        Ok(out)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&mut self) -> Result<(), SimError> {
        self.writer.flush().map_err(|source| SimError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl RowSink for ResultWriter {
    fn push_row(&mut self, row: &ResultRow) -> Result<(), SimError> {
        self.writer.serialize(row).map_err(|source| SimError::Csv {
            path: self.path.clone(),
            source,
        })?;
        self.flush()
    }
}

/// Write a complete result table to `path`, replacing any existing file.
pub fn write_results(path: impl AsRef<Path>, rows: &[ResultRow]) -> Result<(), SimError> {
    let mut writer = ResultWriter::create(path)?;
    for row in rows {
        writer.push_row(row)?;
    }
    Ok(())
}

/// Read a result table written by [`ResultWriter`].
pub fn read_results(path: impl AsRef<Path>) -> Result<Vec<ResultRow>, SimError> {
    let path = path.as_ref();
    let wrap = |source| SimError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(wrap)?;
    reader
        .deserialize()
        .collect::<Result<Vec<ResultRow>, csv::Error>>()
        .map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn row(temperature: f64) -> ResultRow {
        ResultRow {
            temperature,
            mean_magnetization: -1021.375,
            error_magnetization: 0.1 + 0.2,
            correlation_time_magnetization: 3.25,
            mean_energy: -2043.9921875,
            error_energy: 1.0 / 3.0,
            correlation_time_energy: 0.0,
        }
    }

    #[test]
    fn test_header_written_on_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        ResultWriter::create(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.trim_end(),
            "temperature,mean_magnetization,error_magnetization,correlation_time_magnetization,\
             mean_energy,error_energy,correlation_time_energy"
        );
        assert!(read_results(&path).unwrap().is_empty());
    }

    #[test]
    fn test_rows_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let rows = vec![row(4.0), row(3.9), row(3.8)];
        write_results(&path, &rows).unwrap();
        assert_eq!(read_results(&path).unwrap(), rows);
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<ResultRow> = Vec::new();
        sink.push_row(&row(2.0)).unwrap();
        sink.push_row(&row(1.5)).unwrap();
        assert_eq!(sink, vec![row(2.0), row(1.5)]);

        let dyn_sink: &mut dyn RowSink = &mut sink;
        dyn_sink.push_row(&row(1.0)).unwrap();
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");
        assert!(matches!(ResultWriter::create(&path), Err(SimError::Io { .. })));
    }
}

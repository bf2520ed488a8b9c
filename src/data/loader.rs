//! CSV Data Loader Module
//! Resolves the input file, decodes it and parses it with Polars.
//! Parsed tables are cached per (path, encoding) for the process lifetime.

use crate::config::DataSourceConfig;
use crate::data::model::{Dataset, REQUIRED_COLUMNS};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(
        "Neither '{}' found in {}. Please verify files are in the directory.",
        .candidates.join("' nor '"),
        .base_dir.display()
    )]
    FileNotFound {
        base_dir: PathBuf,
        candidates: Vec<String>,
    },
    #[error("Error loading dataset {}: {reason}", .path.display())]
    ParseError { path: PathBuf, reason: String },
}

impl LoaderError {
    fn parse(path: &Path, reason: impl Into<String>) -> Self {
        LoaderError::ParseError {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Text encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1: every byte is the code point of the same value.
    #[default]
    Latin1,
    Utf8,
}

impl TextEncoding {
    /// Decode raw file bytes into a UTF-8 string.
    pub fn decode(self, bytes: &[u8]) -> Result<String, String> {
        match self {
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                String::from_utf8(bytes.to_vec())
                    .map_err(|e| format!("file is not valid UTF-8: {e}"))
            }
        }
    }
}

/// Loads the disaster table from the configured location.
pub struct DataLoader {
    config: DataSourceConfig,
    cache: HashMap<(PathBuf, TextEncoding), Arc<Dataset>>,
}

impl DataLoader {
    pub fn new(config: DataSourceConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    /// Find the first candidate file that exists: primary, then fallback.
    pub fn resolve_path(&self) -> Result<PathBuf, LoaderError> {
        let candidates = [&self.config.primary_file, &self.config.fallback_file];

        for (idx, name) in candidates.iter().enumerate() {
            let path = self.config.base_dir.join(name);
            if path.is_file() {
                if idx > 0 {
                    log::warn!(
                        "'{}' not found, using fallback {}",
                        self.config.primary_file,
                        path.display()
                    );
                }
                return Ok(path);
            }
        }

        Err(LoaderError::FileNotFound {
            base_dir: self.config.base_dir.clone(),
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Load the dataset, reading the disk only on the first call for a given
    /// resolved path and encoding.
    pub fn load(&mut self) -> Result<Arc<Dataset>, LoaderError> {
        let path = self.resolve_path()?;
        let encoding = self.config.encoding;
        let key = (path.clone(), encoding);

        if let Some(dataset) = self.cache.get(&key) {
            log::debug!("Dataset cache hit for {}", path.display());
            return Ok(Arc::clone(dataset));
        }

        let df = Self::read_csv(&path, encoding)?;
        log::info!(
            "Dataset loaded successfully from {} ({} rows, {} columns)",
            path.display(),
            df.height(),
            df.width()
        );

        let dataset = Arc::new(Dataset { source: path, df });
        self.cache.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Decode and parse a CSV file, then check the required columns exist.
    /// Column types are inferred from every row and a cell that does not
    /// parse fails the whole read.
    pub fn read_csv(path: &Path, encoding: TextEncoding) -> Result<DataFrame, LoaderError> {
        let bytes = std::fs::read(path)
            .map_err(|e| LoaderError::parse(path, format!("failed to read file: {e}")))?;
        let text = encoding
            .decode(&bytes)
            .map_err(|reason| LoaderError::parse(path, reason))?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
            .finish()
            .map_err(|e| LoaderError::parse(path, e.to_string()))?;

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| df.column(name).is_err())
        {
            return Err(LoaderError::parse(
                path,
                format!("missing required column '{missing}'"),
            ));
        }

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "Year,Disaster Type,Country,Total Deaths,Total Affected,Total Damages ('000 US$)\n";

    fn config_for(dir: &TempDir) -> DataSourceConfig {
        DataSourceConfig {
            base_dir: dir.path().to_path_buf(),
            ..DataSourceConfig::default()
        }
    }

    fn write_csv(dir: &TempDir, name: &str, rows: &[&str]) {
        let mut body = HEADER.to_string();
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        fs::write(dir.path().join(name), body).unwrap();
    }

    #[test]
    fn falls_back_to_secondary_file() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "data2.csv", &["2001,Flood,India,3,10,100"]);

        let mut loader = DataLoader::new(config_for(&dir));
        let dataset = loader.load().unwrap();

        assert_eq!(dataset.source, dir.path().join("data2.csv"));
        assert_eq!(dataset.row_count(), 1);
    }

    #[test]
    fn prefers_primary_file() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "natural_disasters.csv", &["2001,Flood,India,3,10,100", "2002,Storm,Chile,,,"]);
        write_csv(&dir, "data2.csv", &["2001,Flood,India,3,10,100"]);

        let mut loader = DataLoader::new(config_for(&dir));
        let dataset = loader.load().unwrap();

        assert_eq!(dataset.source, dir.path().join("natural_disasters.csv"));
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn missing_files_report_not_found() {
        let dir = TempDir::new().unwrap();
        let mut loader = DataLoader::new(config_for(&dir));

        let err = loader.load().unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound { .. }));
        assert!(err.to_string().contains("natural_disasters.csv"));
        assert!(err.to_string().contains("data2.csv"));
    }

    #[test]
    fn repeated_loads_use_cache() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "natural_disasters.csv", &["2001,Flood,India,3,10,100"]);

        let mut loader = DataLoader::new(config_for(&dir));
        let first = loader.load().unwrap();

        write_csv(&dir, "natural_disasters.csv", &["2001,Flood,India,3,10,100", "2002,Flood,Peru,1,1,1"]);
        let second = loader.load().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.row_count(), 1);
    }

    #[test]
    fn decodes_latin1_text() {
        let dir = TempDir::new().unwrap();
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"2001,Flood,C\xF4te d'Ivoire,3,10,100\n");
        fs::write(dir.path().join("natural_disasters.csv"), bytes).unwrap();

        let mut loader = DataLoader::new(config_for(&dir));
        let dataset = loader.load().unwrap();

        let country = dataset.df.column("Country").unwrap().str().unwrap().get(0);
        assert_eq!(country, Some("Côte d'Ivoire"));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let mut bytes = HEADER.as_bytes().to_vec();
        bytes.extend_from_slice(b"2001,Flood,C\xF4te d'Ivoire,3,10,100\n");
        fs::write(dir.path().join("natural_disasters.csv"), bytes).unwrap();

        let config = DataSourceConfig {
            encoding: TextEncoding::Utf8,
            ..config_for(&dir)
        };
        let err = DataLoader::new(config).load().unwrap_err();
        assert!(matches!(err, LoaderError::ParseError { .. }));
    }

    #[test]
    fn missing_column_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("natural_disasters.csv"),
            "Year,Disaster Type,Total Deaths\n2001,Flood,3\n",
        )
        .unwrap();

        let err = DataLoader::new(config_for(&dir)).load().unwrap_err();
        match err {
            LoaderError::ParseError { reason, .. } => assert!(reason.contains("Total Affected")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_rows_are_a_parse_error() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "natural_disasters.csv",
            &["2001,Flood,India,3,10,100", "2000,Flood,Peru,1,1,100,EXTRA,MORE"],
        );

        let err = DataLoader::new(config_for(&dir)).load().unwrap_err();
        assert!(matches!(err, LoaderError::ParseError { .. }));
    }

    #[test]
    fn late_fractional_values_are_kept() {
        let dir = TempDir::new().unwrap();
        let mut rows: Vec<String> = (0..10_000)
            .map(|i| format!("{},Flood,India,1,10,100", 1950 + i % 70))
            .collect();
        rows.push("2019,Storm,Cuba,2.5,10,2500.5".to_string());
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        write_csv(&dir, "natural_disasters.csv", &rows);

        let dataset = DataLoader::new(config_for(&dir)).load().unwrap();
        let subset = DataProcessor::restrict_and_clean(&dataset).unwrap();

        let last = subset.records().last().unwrap();
        assert_eq!(subset.len(), 10_001);
        assert_eq!(last.total_deaths, 2.5);
        assert_eq!(last.total_damages, 2500.5);
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let decoded = TextEncoding::Utf8.decode(b"\xEF\xBB\xBFYear").unwrap();
        assert_eq!(decoded, "Year");
    }
}

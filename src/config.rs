//! Dataset location configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::types::City;

/// Environment variable overriding the directory that holds the city trip logs.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Maps each [`City`] to its trip-log file.
///
/// Relative file names are resolved against `data_dir`; absolute ones are used as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    data_dir: PathBuf,
    files: BTreeMap<City, PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl DatasetConfig {
    /// Default file names (`chicago.csv`, ...) under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let files = City::ALL
            .into_iter()
            .map(|city| (city, PathBuf::from(city.file_name())))
            .collect();
        Self {
            data_dir: data_dir.into(),
            files,
        }
    }

    /// Like [`Default`], but honors [`DATA_DIR_ENV`] when it is set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(DATA_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Point one city at a different file.
    pub fn with_file(mut self, city: City, file: impl Into<PathBuf>) -> Self {
        self.files.insert(city, file.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Resolved path of the city's trip log.
    pub fn path_for(&self, city: City) -> PathBuf {
        match self.files.get(&city) {
            Some(file) => self.data_dir.join(file),
            None => self.data_dir.join(city.file_name()),
        }
    }
}

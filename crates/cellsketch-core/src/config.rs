//! Grid configuration loaded at startup.

use crate::grid::{Grid, GridError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid configuration: {0}")]
    Parse(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Grid dimensions as read from a JSON config file.
///
/// Missing fields fall back to the defaults (20 x 15 cells of 40px).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 15,
            cell_size: 40,
        }
    }
}

impl GridConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read a config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded grid config from {:?}: {}x{} cells of {}px",
            path,
            config.cols,
            config.rows,
            config.cell_size
        );
        Ok(config)
    }

    /// Build the validated grid.
    pub fn build_grid(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::new(self.cols, self.rows, self.cell_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_grid() {
        let grid = GridConfig::default().build_grid().unwrap();
        assert_eq!(grid.cols(), 20);
        assert_eq!(grid.rows(), 15);
        assert_eq!(grid.pixel_height(), 600);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GridConfig::from_json(r#"{ "cols": 8 }"#).unwrap();
        assert_eq!(
            config,
            GridConfig {
                cols: 8,
                rows: 15,
                cell_size: 40,
            }
        );
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            GridConfig::from_json("{ cols: 8"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GridConfig::from_json(r#"{ "cols": -1 }"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_cell_size_fails_validation() {
        let config = GridConfig::from_json(r#"{ "cell_size": 0 }"#).unwrap();
        assert!(matches!(
            config.build_grid(),
            Err(ConfigError::Grid(GridError::ZeroDimension("cell_size")))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.json");
        std::fs::write(&path, r#"{ "cols": 4, "rows": 3, "cell_size": 25 }"#).unwrap();

        let grid = GridConfig::load(&path).unwrap().build_grid().unwrap();
        assert_eq!(grid.pixel_width(), 100);
        assert_eq!(grid.pixel_height(), 75);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = GridConfig::load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

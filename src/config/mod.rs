//! JSON configuration of the retrieval pass and of the demo tool.

pub mod clustering;
pub mod sheet;

pub use clustering::{ClusteringParams, SamplingConfig};
pub use sheet::{CombInput, FilamentInput, SheetInput};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of the configuration and I/O layer. The clustering core itself
/// has no failure mode.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("filament reference {id} out of range ({count} filaments)")]
    InvalidReference { id: u32, count: usize },
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    pub json_out: Option<PathBuf>,
}

/// Configuration of the `cluster_demo` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: ClusteringParams,
    #[serde(default)]
    pub sampling: Option<SamplingConfig>,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    load_json(path)
}

pub fn load_sheet(path: &Path) -> Result<SheetInput, ConfigError> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filaments::FilamentId;

    #[test]
    fn runtime_config_fills_defaults() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{ "input_path": "sheet.json" }"#).expect("valid config");
        assert_eq!(config.params.line_count, 5);
        assert_eq!(config.params.min_lines, 5);
        assert!(config.output.json_out.is_none());
        assert!(config.sampling.is_none());
    }

    #[test]
    fn sheet_input_builds_store_with_combs_and_parents() {
        let json = r#"{
            "scale": { "interline": 20, "max_fore": 4.0 },
            "filaments": [
                { "sections": [ { "first_y": 10, "runs": [ { "start": 0, "length": 50 } ] } ] },
                { "sections": [ { "first_y": 30, "runs": [ { "start": 0, "length": 50 } ] } ] },
                { "points": [[60.0, 30.0], [90.0, 30.0]], "parent": 1, "vip": true }
            ],
            "combs": [ { "x": 20, "filaments": [0, 1] } ]
        }"#;
        let sheet: SheetInput = serde_json::from_str(json).expect("valid sheet");
        assert_eq!(sheet.scale.interline, 20);
        let store = sheet.into_store().expect("valid references");
        assert_eq!(store.len(), 3);
        assert_eq!(store.ancestor(FilamentId(2)), FilamentId(1));
        assert!(store.filament(FilamentId(2)).is_vip());
        assert_eq!(store.filament(FilamentId(0)).combs().len(), 1);
    }

    #[test]
    fn sheet_input_rejects_dangling_comb_slot() {
        let json = r#"{
            "scale": { "interline": 20, "max_fore": 4.0 },
            "filaments": [ { "points": [[0.0, 0.0], [10.0, 0.0]] } ],
            "combs": [ { "x": 5, "filaments": [0, 3] } ]
        }"#;
        let sheet: SheetInput = serde_json::from_str(json).expect("valid sheet");
        match sheet.into_store() {
            Err(ConfigError::InvalidReference { id, count }) => {
                assert_eq!((id, count), (3, 1));
            }
            other => panic!("expected invalid reference, got {other:?}"),
        }
    }
}

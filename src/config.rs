use crate::constants::{DEFAULT_BASE_FILE_NAME, DEFAULT_CHUNK_SIZE, DEFAULT_OUTPUT_DIR};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolved transform settings with all values filled in (no Options).
///
/// This struct represents the transform defaults and can be deserialized by
/// the TOML loader.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Directory receiving the generated XML files
    pub output_dir: PathBuf,
    /// File name prefix; the 1-based chunk index and `.xml` are appended
    pub base_file_name: String,
    /// Maximum number of records per output file
    pub chunk_size: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            base_file_name: DEFAULT_BASE_FILE_NAME.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Transform run loaded from a TOML file.
///
/// Requires the `input` records file; every other key falls back to
/// [`ResolvedConfig::default`]. Unknown keys are rejected to catch typos.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    /// JSON file holding the records to transform
    pub input: PathBuf,
    /// Flattened resolved configuration with transform defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read, and `InvalidInput` if the
    /// TOML is malformed, `input` is missing, unknown keys are present, or
    /// `chunk_size` is not positive.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if config.resolved.chunk_size == 0 {
            return Err(AppError::InvalidInput(
                "Chunk size must be greater than 0".into(),
            ));
        }

        Ok(config)
    }
}

use crate::error::{FiledictError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_FILE_EXT: &str = ".jsonl";
pub const TEMP_FILE_EXT: &str = ".tmp";

/// Collection settings, stored next to the dictionaries in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiledictConfig {
    /// Extension of dictionary files (e.g. ".jsonl", ".ndjson")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Write through a temp file and rename it over the target
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_atomic_writes() -> bool {
    true
}

impl Default for FiledictConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            atomic_writes: default_atomic_writes(),
        }
    }
}

impl FiledictConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FiledictError::Io)?;
        let mut config: FiledictConfig =
            serde_json::from_str(&content).map_err(FiledictError::Serialization)?;
        let ext = config.file_ext.clone();
        config.set_file_ext(&ext);
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FiledictError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(FiledictError::Serialization)?;
        fs::write(config_path, content).map_err(FiledictError::Io)?;
        Ok(())
    }

    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Returns the display value for a config key (`file-ext`, `atomic-writes`)
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "file-ext" => Some(self.file_ext.clone()),
            "atomic-writes" => Some(self.atomic_writes.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "file-ext" => {
                let stem = value.trim().trim_start_matches('.');
                if stem.is_empty() || stem.contains(['/', '\\']) {
                    return Err(format!("Invalid file-ext: {:?}", value));
                }
                let ext = format!(".{}", stem);
                // config.json and atomic-write temp files share the directory with the stores
                if CONFIG_FILENAME.ends_with(&ext) || ext == TEMP_FILE_EXT {
                    return Err(format!("file-ext {} is reserved", ext));
                }
                self.set_file_ext(value);
                Ok(())
            }
            "atomic-writes" => match value.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => {
                    self.atomic_writes = true;
                    Ok(())
                }
                "false" | "no" | "off" | "0" => {
                    self.atomic_writes = false;
                    Ok(())
                }
                other => Err(format!("Invalid value for atomic-writes: {}", other)),
            },
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        let ext = ext.trim();
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FiledictConfig::default();
        assert_eq!(config.file_ext, ".jsonl");
        assert!(config.atomic_writes);
    }

    #[test]
    fn test_set_file_ext_without_dot() {
        let mut config = FiledictConfig::default();
        config.set_file_ext("ndjson");
        assert_eq!(config.get_file_ext(), ".ndjson");
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = FiledictConfig::default();
        config.set("atomic-writes", "off").unwrap();
        config.set("file-ext", "ndjson").unwrap();

        assert_eq!(config.get("atomic-writes").as_deref(), Some("false"));
        assert_eq!(config.get("file-ext").as_deref(), Some(".ndjson"));
        assert!(config.set("file-ext", ".").is_err());
        assert!(config.set("file-ext", "json").is_err());
        assert!(config.set("file-ext", ".tmp").is_err());
        assert_eq!(config.get("file-ext").as_deref(), Some(".ndjson"));
        assert!(config.set("atomic-writes", "maybe").is_err());
        assert!(config.set("color", "red").is_err());
        assert_eq!(config.get("color"), None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = FiledictConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, FiledictConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = FiledictConfig::default();
        config.set_file_ext(".ndjson");
        config.atomic_writes = false;
        config.save(dir.path()).unwrap();

        let loaded = FiledictConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"file_ext": "log"}"#).unwrap();

        let loaded = FiledictConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".log");
        assert!(loaded.atomic_writes);
    }
}

//! # Locating the Collection
//!
//! The collection directory is resolved once per run, first match wins:
//!
//! 1. `--dir <path>` on the command line
//! 2. the `FILEDICT_HOME` environment variable
//! 3. the OS data directory (via the `directories` crate), e.g.
//!    `~/.local/share/filedict` on Linux
//!
//! [`initialize`] then loads `config.json` from that directory, scans it and hands back
//! a ready [`FiledictApi`].

use crate::api::FiledictApi;
use crate::collection::DictionaryCollection;
use crate::config::FiledictConfig;
use crate::error::{FiledictError, Result};
use directories::ProjectDirs;
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "FILEDICT_HOME";

pub struct FiledictContext {
    pub api: FiledictApi<Value>,
    pub config: FiledictConfig,
}

pub fn resolve_data_dir(dir_override: Option<&Path>) -> Result<PathBuf> {
    resolve_data_dir_from(dir_override, std::env::var_os(HOME_ENV))
}

fn resolve_data_dir_from(dir_override: Option<&Path>, env_home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = dir_override {
        return Ok(dir.to_path_buf());
    }
    if let Some(home) = env_home.filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "filedict", "filedict")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FiledictError::Api("Could not determine a data directory".to_string()))
}

pub fn initialize(dir_override: Option<&Path>) -> Result<FiledictContext> {
    let data_dir = resolve_data_dir(dir_override)?;
    let config = FiledictConfig::load(&data_dir)?;
    tracing::debug!(
        dir = %data_dir.display(),
        file_ext = %config.file_ext,
        atomic_writes = config.atomic_writes,
        "initializing collection"
    );

    let mut collection = DictionaryCollection::with_config(&data_dir, &config);
    collection.init()?;

    Ok(FiledictContext {
        api: FiledictApi::new(collection),
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn override_wins_over_env() {
        let dir = resolve_data_dir_from(
            Some(Path::new("/tmp/explicit")),
            Some(OsString::from("/tmp/from-env")),
        )
        .unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/explicit"));
    }

    #[test]
    fn env_used_when_no_override() {
        let dir = resolve_data_dir_from(None, Some(OsString::from("/tmp/from-env"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/from-env"));
    }

    #[test]
    fn empty_env_is_ignored() {
        let dir = resolve_data_dir_from(None, Some(OsString::new()));
        if let Ok(dir) = dir {
            assert_ne!(dir, PathBuf::new());
        }
    }

    #[test]
    fn initialize_applies_config_and_scans() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), r#"{"file_ext": ".ndjson"}"#).unwrap();
        fs::write(temp.path().join("a.ndjson"), "[\"k\",1]").unwrap();
        fs::write(temp.path().join("b.jsonl"), "[\"k\",2]").unwrap();

        let ctx = initialize(Some(temp.path())).unwrap();
        assert_eq!(ctx.config.file_ext, ".ndjson");
        let listed = ctx.api.list_dictionaries().unwrap().dictionaries;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "a");
    }

    #[test]
    fn initialize_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("fresh");

        initialize(Some(&target)).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn json_extension_cannot_lock_out_the_cli() {
        use crate::commands::config::{run, ConfigAction};
        use crate::commands::MessageLevel;

        let temp = TempDir::new().unwrap();
        let set = run(
            temp.path(),
            ConfigAction::Set("file-ext".into(), "json".into()),
        )
        .unwrap();
        assert_eq!(set.messages[0].level, MessageLevel::Error);

        // a hand-edited config still leaves the collection usable
        fs::write(temp.path().join("config.json"), r#"{"file_ext": "json"}"#).unwrap();
        let ctx = initialize(Some(temp.path())).unwrap();
        assert_eq!(ctx.config.file_ext, ".json");
        assert!(ctx.api.list_dictionaries().unwrap().dictionaries.is_empty());
    }
}

//! # Store Collection
//!
//! A [`DictionaryCollection`] maps one directory to a set of named dictionaries.
//!
//! ```text
//! <dir>/
//! ├── config.json        # optional collection settings
//! ├── users.jsonl        # dictionary "users"
//! └── sessions.jsonl     # dictionary "sessions"
//! ```
//!
//! Every regular file directly inside the directory whose name ends in the store
//! extension is one dictionary, named by the file name minus the extension. The
//! config file and in-flight `.tmp` files are never stores, and nothing else in the
//! directory is read or touched.
//!
//! The collection only refuses names whose file would be the config file. Callers
//! run [`validate_name`] first (the API and the interactive picker both do).

use crate::config::{FiledictConfig, CONFIG_FILENAME, TEMP_FILE_EXT};
use crate::dictionary::Dictionary;
use crate::error::{FiledictError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Checks that `name` can be used as a file stem inside the collection directory.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.starts_with('.')
        || name.contains('\0');
    if invalid {
        return Err(FiledictError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub struct DictionaryCollection<T> {
    path: PathBuf,
    file_ext: String,
    atomic_writes: bool,
    dictionaries: BTreeMap<String, Dictionary<T>>,
}

impl<T> DictionaryCollection<T> {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, &FiledictConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(path: P, config: &FiledictConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file_ext: config.get_file_ext().to_string(),
            atomic_writes: config.atomic_writes,
            dictionaries: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }

    pub fn get_dictionary(&self, name: &str) -> Option<&Dictionary<T>> {
        self.dictionaries.get(name)
    }

    pub fn get_dictionary_mut(&mut self, name: &str) -> Option<&mut Dictionary<T>> {
        self.dictionaries.get_mut(name)
    }

    /// A new name -> dictionary map; changing it does not change the registry.
    pub fn all_dictionaries(&self) -> BTreeMap<&str, &Dictionary<T>> {
        self.dictionaries
            .iter()
            .map(|(name, dict)| (name.as_str(), dict))
            .collect()
    }

    /// Registered names with their backing file mtime, oldest first.
    ///
    /// Ties (and stores whose file vanished) are ordered by name.
    pub fn names_by_recency(&self) -> Result<Vec<(String, Option<DateTime<Utc>>)>> {
        let mut entries = self
            .dictionaries
            .iter()
            .map(|(name, dict)| -> Result<_> { Ok((name.clone(), dict.modified()?)) })
            .collect::<Result<Vec<_>>>()?;
        // BTreeMap iteration is already name ordered and sort_by is stable
        entries.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(entries)
    }

    /// Deletes the backing file and unregisters `name`. Returns false if it was not registered.
    pub fn delete_dictionary(&mut self, name: &str) -> Result<bool> {
        let Some(dict) = self.dictionaries.get(name) else {
            return Ok(false);
        };
        match fs::remove_file(dict.path()) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(name, "backing file already gone");
            }
            Err(e) => return Err(FiledictError::Io(e)),
        }
        self.dictionaries.remove(name);
        tracing::info!(name, "deleted dictionary");
        Ok(true)
    }

    /// Store name of a directory entry, or `None` if the file is not a store.
    fn store_name<'n>(&self, file_name: &'n str) -> Option<&'n str> {
        let temp_file = file_name.starts_with('.') && file_name.ends_with(TEMP_FILE_EXT);
        if file_name == CONFIG_FILENAME || temp_file {
            return None;
        }
        file_name
            .strip_suffix(self.file_ext.as_str())
            .filter(|name| !name.is_empty())
    }

    fn make_dictionary(&self, name: &str) -> Dictionary<T> {
        Dictionary::with_ext(&self.path, name, &self.file_ext).with_atomic_writes(self.atomic_writes)
    }
}

impl<T> DictionaryCollection<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Scans the directory and loads every dictionary in it, creating the directory if absent.
    pub fn init(&mut self) -> Result<()> {
        self.dictionaries.clear();

        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&self.path).map_err(FiledictError::Io)?;
                tracing::debug!(path = %self.path.display(), "created collection directory");
                return Ok(());
            }
            Err(e) => return Err(FiledictError::Io(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(FiledictError::Io)?;
            if !entry.file_type().map_err(FiledictError::Io)?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = self.store_name(file_name) {
                names.push(name.to_string());
            }
        }
        names.sort();

        for name in names {
            let mut dict = self.make_dictionary(&name);
            dict.init()?;
            self.dictionaries.insert(name, dict);
        }

        tracing::debug!(
            path = %self.path.display(),
            dictionaries = self.dictionaries.len(),
            "scanned collection"
        );
        Ok(())
    }

    /// Registers a new, empty dictionary. Fails with `DuplicateName` if `name` is taken.
    ///
    /// The backing file is written right away so the store has an mtime and is
    /// picked up by later scans even before its first record.
    pub fn create_dictionary(&mut self, name: &str) -> Result<&mut Dictionary<T>> {
        if self.store_name(&format!("{}{}", name, self.file_ext)) != Some(name) {
            return Err(FiledictError::InvalidName(name.to_string()));
        }
        if self.dictionaries.contains_key(name) {
            return Err(FiledictError::DuplicateName(name.to_string()));
        }
        let mut dict = self.make_dictionary(name);
        dict.init()?;
        dict.save()?;
        tracing::info!(name, path = %dict.path().display(), "created dictionary");
        Ok(self.dictionaries.entry(name.to_string()).or_insert(dict))
    }

    pub fn add_dictionary(&mut self, name: &str) -> Result<&mut Dictionary<T>> {
        self.create_dictionary(name)
    }
}

//! # Record Store
//!
//! A [`Dictionary`] is a string-keyed map of values mirrored to a single JSONL file.
//!
//! ## File Format
//!
//! One record per line, each line a two element JSON array:
//!
//! ```text
//! ["alice",{"name":"Alice","age":30}]
//! ["bob",{"name":"Bob","age":25}]
//! ```
//!
//! Lines are joined with `\n` and the file has no trailing newline. Blank lines are
//! skipped on load; any other line that fails to parse aborts the load with
//! [`FiledictError::MalformedLine`], since dropping it would silently lose a record.
//!
//! ## Persistence
//!
//! Memory is authoritative once loaded. Every successful mutation rewrites the whole
//! file from the in-memory state, so the file on disk is always a complete snapshot.
//! With atomic writes enabled the snapshot goes to a hidden temp file first and is
//! renamed over the target, which keeps a crash mid-write from truncating the store.
//!
//! Records keep insertion order (first-seen order on load), so loading a file and
//! saving it again reproduces it byte for byte.

use crate::config::{DEFAULT_FILE_EXT, TEMP_FILE_EXT};
use crate::error::{FiledictError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug)]
pub struct Dictionary<T> {
    name: String,
    path: PathBuf,
    atomic_writes: bool,
    entries: Vec<(String, T)>,
    positions: HashMap<String, usize>,
}

impl<T> Dictionary<T> {
    /// Creates a dictionary backed by `<parent>/<name>.jsonl`. Nothing is read until [`Dictionary::init`].
    pub fn new<P: AsRef<Path>>(parent: P, name: &str) -> Self {
        Self::with_ext(parent, name, DEFAULT_FILE_EXT)
    }

    pub fn with_ext<P: AsRef<Path>>(parent: P, name: &str, file_ext: &str) -> Self {
        Self {
            name: name.to_string(),
            path: parent.as_ref().join(format!("{}{}", name, file_ext)),
            atomic_writes: true,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the current value for `key`. Served from memory.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    /// Last modification time of the backing file, `None` if it was never written.
    pub fn modified(&self) -> Result<Option<DateTime<Utc>>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(meta.modified().map_err(FiledictError::Io)?.into())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FiledictError::Io(e)),
        }
    }

    fn insert_entry(&mut self, key: String, value: T) {
        match self.positions.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    fn reindex(&mut self) {
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (k, _))| (k.clone(), i))
            .collect();
    }
}

impl<T> Dictionary<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Loads records from the backing file. A missing file is an empty dictionary.
    pub fn init(&mut self) -> Result<()> {
        self.entries.clear();
        self.positions.clear();
        self.load()
    }

    fn load(&mut self) -> Result<()> {
        let Some(content) = read_file_or_none(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "no backing file, starting empty");
            return Ok(());
        };

        for (i, line) in content.split('\n').enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, value): (String, T) =
                serde_json::from_str(line).map_err(|source| FiledictError::MalformedLine {
                    path: self.path.clone(),
                    line: i + 1,
                    source,
                })?;
            self.insert_entry(key, value);
        }

        tracing::debug!(
            path = %self.path.display(),
            records = self.entries.len(),
            "loaded dictionary"
        );
        Ok(())
    }

    pub(crate) fn save(&self) -> Result<()> {
        let lines = self
            .entries
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(FiledictError::Serialization)?;
        let content = lines.join("\n");

        if self.atomic_writes {
            let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
            let tmp_path = parent.join(format!(".{}-{}{}", self.name, Uuid::new_v4(), TEMP_FILE_EXT));
            fs::write(&tmp_path, &content).map_err(FiledictError::Io)?;
            if let Err(e) = fs::rename(&tmp_path, &self.path) {
                let _ = fs::remove_file(&tmp_path);
                return Err(FiledictError::Io(e));
            }
        } else {
            fs::write(&self.path, &content).map_err(FiledictError::Io)?;
        }

        tracing::debug!(
            path = %self.path.display(),
            records = self.entries.len(),
            "saved dictionary"
        );
        Ok(())
    }

    /// Inserts a new record. Fails with `DuplicateKey` if `key` is taken.
    pub fn add(&mut self, key: &str, value: T) -> Result<()> {
        if key.is_empty() {
            return Err(FiledictError::EmptyKey);
        }
        if self.contains_key(key) {
            return Err(FiledictError::DuplicateKey(key.to_string()));
        }
        self.insert_entry(key.to_string(), value);
        self.save()
    }

    /// Replaces an existing record. Fails with `KeyNotFound` if `key` is absent.
    pub fn update(&mut self, key: &str, value: T) -> Result<()> {
        let Some(&i) = self.positions.get(key) else {
            return Err(FiledictError::KeyNotFound(key.to_string()));
        };
        self.entries[i].1 = value;
        self.save()
    }

    /// Removes `key`, returning whether it existed. Only writes when something was removed.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let Some(i) = self.positions.remove(key) else {
            return Ok(false);
        };
        self.entries.remove(i);
        self.reindex();
        self.save()?;
        Ok(true)
    }

    /// Owned copy of every record in insertion order.
    pub fn get_all(&self) -> Vec<(String, T)> {
        self.entries.clone()
    }
}

pub(crate) fn read_file_or_none(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FiledictError::Io(e)),
    }
}

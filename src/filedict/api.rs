//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for UI clients.
//! It dispatches to `commands/*`, returns structured [`CmdResult`]s and never prints.
//!
//! `FiledictApi<T>` owns the [`DictionaryCollection`] for the lifetime of the client.
//! The binary uses `FiledictApi<serde_json::Value>`; library users pick their own
//! value type.

use crate::collection::DictionaryCollection;
use crate::commands;
use crate::error::Result;
use crate::interactive::{DictionaryCli, Prompter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub struct FiledictApi<T> {
    collection: DictionaryCollection<T>,
}

impl<T> FiledictApi<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn new(collection: DictionaryCollection<T>) -> Self {
        Self { collection }
    }

    pub fn dir(&self) -> &Path {
        self.collection.path()
    }

    pub fn collection(&self) -> &DictionaryCollection<T> {
        &self.collection
    }

    pub fn create_dictionary(&mut self, name: &str) -> Result<CmdResult> {
        commands::create::run(&mut self.collection, name)
    }

    pub fn list_dictionaries(&self) -> Result<CmdResult> {
        commands::list::run(&self.collection)
    }

    pub fn delete_dictionary(&mut self, name: &str, confirmed: bool) -> Result<CmdResult> {
        commands::delete::run(&mut self.collection, name, confirmed)
    }

    pub fn show(&self, name: &str) -> Result<CmdResult> {
        commands::records::show(&self.collection, name)
    }

    pub fn get_record(&self, name: &str, key: &str) -> Result<CmdResult> {
        commands::records::get(&self.collection, name, key)
    }

    pub fn add_record(&mut self, name: &str, key: &str, raw_value: &str) -> Result<CmdResult> {
        commands::records::add(&mut self.collection, name, key, raw_value)
    }

    pub fn update_record(&mut self, name: &str, key: &str, raw_value: &str) -> Result<CmdResult> {
        commands::records::update(&mut self.collection, name, key, raw_value)
    }

    pub fn remove_record(&mut self, name: &str, key: &str) -> Result<CmdResult> {
        commands::records::remove(&mut self.collection, name, key)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(self.collection.path(), action)
    }

    /// Interactive picker borrowing this API's collection
    pub fn picker<P: Prompter>(&mut self, prompter: P) -> DictionaryCli<'_, T, P> {
        DictionaryCli::new(&mut self.collection, prompter)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, DictionarySummary, MessageLevel};

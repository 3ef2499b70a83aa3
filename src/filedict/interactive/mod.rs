//! # Interactive Picker
//!
//! [`DictionaryCli`] is the menu driven front end over one
//! [`DictionaryCollection`]: create, select, delete and list dictionaries by
//! answering prompts.
//!
//! All terminal traffic goes through a [`Prompter`], so the same flows run against
//! stdin/stdout in the binary and against scripted input in tests.
//!
//! ## Session
//!
//! ```text
//!        ┌──────── create | select | delete | list ────────┐
//!        ▼                                                 │
//!      Idle ───────────────────────────────────────────────┘
//!        │
//!        └── exit / input closed ──> done
//! ```
//!
//! User mistakes (empty names, duplicate names, declined confirmations) are reported
//! through the prompter and never abort the session. Storage errors propagate.

use crate::collection::{validate_name, DictionaryCollection};
use crate::commands::CmdMessage;
use crate::dictionary::Dictionary;
use crate::error::{FiledictError, Result};
use chrono::{DateTime, Local, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod prompt;

pub use prompt::{Choice, Prompter, TerminalPrompter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Create,
    Select,
    Delete,
    List,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 5] = [
        MenuAction::Create,
        MenuAction::Select,
        MenuAction::Delete,
        MenuAction::List,
        MenuAction::Exit,
    ];

    fn choice(self) -> Choice {
        match self {
            MenuAction::Create => Choice::new("Create a new dictionary", "create"),
            MenuAction::Select => Choice::new("Select a dictionary", "select"),
            MenuAction::Delete => Choice::new("Delete a dictionary", "delete"),
            MenuAction::List => Choice::new("List dictionaries", "list"),
            MenuAction::Exit => Choice::new("Exit", "exit"),
        }
    }
}

fn format_modified(modified: Option<DateTime<Utc>>) -> String {
    match modified {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "never".to_string(),
    }
}

pub struct DictionaryCli<'a, T, P> {
    collection: &'a mut DictionaryCollection<T>,
    prompter: P,
}

impl<'a, T, P> DictionaryCli<'a, T, P>
where
    T: Serialize + DeserializeOwned + Clone,
    P: Prompter,
{
    pub fn new(collection: &'a mut DictionaryCollection<T>, prompter: P) -> Self {
        Self {
            collection,
            prompter,
        }
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Asks for a name and creates the dictionary.
    ///
    /// Returns `None` when the name is already taken; that is reported, not raised.
    pub fn add_dictionary(&mut self) -> Result<Option<&Dictionary<T>>> {
        let name = loop {
            let answer = self.prompter.input("Enter the name for the new dictionary:")?;
            let name = answer.trim().to_string();
            match validate_name(&name) {
                Ok(()) => break name,
                Err(_) if name.is_empty() => {
                    self.prompter
                        .notify(&CmdMessage::error("Name cannot be empty"))?;
                }
                Err(e) => self.prompter.notify(&CmdMessage::error(e.to_string()))?,
            }
        };

        let created = self.collection.create_dictionary(&name).map(|_| ());
        match created {
            Ok(()) => {
                self.prompter.notify(&CmdMessage::success(format!(
                    "Dictionary '{}' created.",
                    name
                )))?;
                Ok(self.collection.get_dictionary(&name))
            }
            Err(e @ FiledictError::DuplicateName(_)) => {
                self.prompter.notify(&CmdMessage::error(e.to_string()))?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Offers every dictionary, least recently modified first, and returns the chosen name.
    pub fn user_pick_key(&mut self) -> Result<Option<String>> {
        let entries = self.collection.names_by_recency()?;
        if entries.is_empty() {
            self.prompter
                .notify(&CmdMessage::warning("No dictionaries available."))?;
            return Ok(None);
        }

        let choices: Vec<Choice> = entries
            .iter()
            .map(|(name, modified)| {
                Choice::new(
                    format!("{} (Last modified: {})", name, format_modified(*modified)),
                    name.clone(),
                )
            })
            .collect();

        match self.prompter.select("Select a dictionary:", &choices) {
            Ok(picked) => Ok(picked.map(|i| entries[i].0.clone())),
            Err(FiledictError::InputClosed) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn user_pick(&mut self) -> Result<Option<&Dictionary<T>>> {
        match self.user_pick_key()? {
            Some(key) => Ok(self.collection.get_dictionary(&key)),
            None => Ok(None),
        }
    }

    pub fn user_pick_mut(&mut self) -> Result<Option<&mut Dictionary<T>>> {
        match self.user_pick_key()? {
            Some(key) => Ok(self.collection.get_dictionary_mut(&key)),
            None => Ok(None),
        }
    }

    /// Picks a dictionary and deletes it after confirmation. Returns whether one was deleted.
    pub fn delete_dictionary(&mut self) -> Result<bool> {
        let Some(key) = self.user_pick_key()? else {
            return Ok(false);
        };

        let question = format!("Are you sure you want to delete the dictionary '{}'?", key);
        if !self.prompter.confirm(&question, false)? {
            self.prompter
                .notify(&CmdMessage::info("Operation cancelled."))?;
            return Ok(false);
        }

        let deleted = self.collection.delete_dictionary(&key)?;
        let message = if deleted {
            CmdMessage::success(format!("Dictionary '{}' deleted successfully.", key))
        } else {
            CmdMessage::error(format!("Failed to delete dictionary '{}'.", key))
        };
        self.prompter.notify(&message)?;
        Ok(deleted)
    }

    fn list(&mut self) -> Result<()> {
        let entries = self.collection.names_by_recency()?;
        if entries.is_empty() {
            return self
                .prompter
                .notify(&CmdMessage::warning("No dictionaries available."));
        }
        for (name, modified) in entries {
            let records = self
                .collection
                .get_dictionary(&name)
                .map(|d| d.len())
                .unwrap_or_default();
            self.prompter.notify(&CmdMessage::info(format!(
                "{} ({} records, last modified: {})",
                name,
                records,
                format_modified(modified)
            )))?;
        }
        Ok(())
    }

    /// Runs the menu loop until the user exits or input is closed.
    pub fn run_menu(&mut self) -> Result<()> {
        let choices: Vec<Choice> = MenuAction::ALL.iter().map(|a| a.choice()).collect();

        loop {
            let i = match self.prompter.select("What would you like to do?", &choices) {
                Ok(Some(i)) => i,
                Ok(None) => {
                    self.prompter
                        .notify(&CmdMessage::warning("No action chosen, try again."))?;
                    continue;
                }
                Err(FiledictError::InputClosed) => break,
                Err(e) => return Err(e),
            };

            let step = match MenuAction::ALL[i] {
                MenuAction::Create => self.add_dictionary().map(|_| ()),
                MenuAction::Select => self.select_step(),
                MenuAction::Delete => self.delete_dictionary().map(|_| ()),
                MenuAction::List => self.list(),
                MenuAction::Exit => break,
            };

            match step {
                Ok(()) => {}
                Err(FiledictError::InputClosed) => break,
                Err(e) => return Err(e),
            }
        }

        tracing::debug!("menu session ended");
        Ok(())
    }

    fn select_step(&mut self) -> Result<()> {
        let Some(dict) = self.user_pick()? else {
            return Ok(());
        };
        let message = CmdMessage::success(format!(
            "Selected dictionary: {} ({} records)",
            dict.name(),
            dict.len()
        ));
        self.prompter.notify(&message)
    }
}

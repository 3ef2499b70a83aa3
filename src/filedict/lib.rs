//! # Filedict Architecture
//!
//! Filedict keeps named key-value dictionaries as JSONL files in one directory, with a
//! small interactive picker on top. Like any library that happens to ship a CLI, the
//! core knows nothing about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)               Interactive (interactive/)│
//! │  - Thin facade over commands      - Menu and pickers over a │
//! │                                     Prompter                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and messages, returns CmdResult               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (collection.rs, dictionary.rs)                     │
//! │  - DictionaryCollection: one directory of stores            │
//! │  - Dictionary: one JSONL file, rewritten on every mutation  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use filedict::collection::DictionaryCollection;
//! use serde_json::json;
//!
//! # fn main() -> filedict::error::Result<()> {
//! let mut users = DictionaryCollection::new("/tmp/stores");
//! users.init()?;
//! users
//!     .create_dictionary("users")?
//!     .add("alice", json!({"name": "Alice", "age": 30}))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Everything is synchronous and single threaded. Mutations take `&mut self`, so a
//! dictionary never has two rewrites in flight within a process. Nothing coordinates
//! separate processes: two writers on the same file means the last one wins.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`collection`]: Directory of dictionaries
//! - [`dictionary`]: Single file record store
//! - [`interactive`]: Prompt driven picker and menu
//! - [`config`]: Collection configuration
//! - [`init`]: Data directory resolution
//! - [`error`]: Error types

pub mod api;
pub mod collection;
pub mod commands;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod init;
pub mod interactive;

//! Record level commands on a single dictionary.
//!
//! Values arrive as JSON text and are parsed into the dictionary's value type, so a
//! typed collection rejects values of the wrong shape before anything is written.

use crate::collection::DictionaryCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::dictionary::Dictionary;
use crate::error::{FiledictError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

fn lookup<'a, T>(collection: &'a DictionaryCollection<T>, name: &str) -> Result<&'a Dictionary<T>> {
    collection
        .get_dictionary(name)
        .ok_or_else(|| FiledictError::DictionaryNotFound(name.to_string()))
}

fn lookup_mut<'a, T>(
    collection: &'a mut DictionaryCollection<T>,
    name: &str,
) -> Result<&'a mut Dictionary<T>> {
    collection
        .get_dictionary_mut(name)
        .ok_or_else(|| FiledictError::DictionaryNotFound(name.to_string()))
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(FiledictError::EmptyKey);
    }
    Ok(())
}

fn parse_value<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| FiledictError::Api(format!("Invalid value {}: {}", raw, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(FiledictError::Serialization)
}

pub fn show<T>(collection: &DictionaryCollection<T>, name: &str) -> Result<CmdResult>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let dict = lookup(collection, name)?;
    let records = dict
        .get_all()
        .into_iter()
        .map(|(k, v)| -> Result<_> { Ok((k, to_json(&v)?)) })
        .collect::<Result<Vec<_>>>()?;

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info(format!("Dictionary '{}' is empty.", name)));
    }
    Ok(result.with_records(records))
}

pub fn get<T>(collection: &DictionaryCollection<T>, name: &str, key: &str) -> Result<CmdResult>
where
    T: Serialize,
{
    let dict = lookup(collection, name)?;
    match dict.get(key) {
        Some(value) => Ok(CmdResult::default().with_records(vec![(key.to_string(), to_json(value)?)])),
        None => Ok(CmdResult::default().with_message(CmdMessage::warning(format!(
            "Key '{}' not found in '{}'.",
            key, name
        )))),
    }
}

pub fn add<T>(
    collection: &mut DictionaryCollection<T>,
    name: &str,
    key: &str,
    raw_value: &str,
) -> Result<CmdResult>
where
    T: Serialize + DeserializeOwned + Clone,
{
    check_key(key)?;
    let value: T = parse_value(raw_value)?;
    lookup_mut(collection, name)?.add(key, value)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Added '{}' to '{}'.",
        key, name
    ))))
}

pub fn update<T>(
    collection: &mut DictionaryCollection<T>,
    name: &str,
    key: &str,
    raw_value: &str,
) -> Result<CmdResult>
where
    T: Serialize + DeserializeOwned + Clone,
{
    check_key(key)?;
    let value: T = parse_value(raw_value)?;
    lookup_mut(collection, name)?.update(key, value)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Updated '{}' in '{}'.",
        key, name
    ))))
}

pub fn remove<T>(collection: &mut DictionaryCollection<T>, name: &str, key: &str) -> Result<CmdResult>
where
    T: Serialize + DeserializeOwned + Clone,
{
    let message = if lookup_mut(collection, name)?.delete(key)? {
        CmdMessage::success(format!("Removed '{}' from '{}'.", key, name))
    } else {
        CmdMessage::warning(format!("Key '{}' not found in '{}'.", key, name))
    };
    Ok(CmdResult::default().with_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, MessageLevel};
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DictionaryCollection<Value>) {
        let dir = TempDir::new().unwrap();
        let mut collection = DictionaryCollection::new(dir.path());
        collection.init().unwrap();
        create::run(&mut collection, "users").unwrap();
        (dir, collection)
    }

    #[test]
    fn add_then_get_returns_parsed_json() {
        let (_dir, mut collection) = setup();
        add(&mut collection, "users", "alice", r#"{"name":"Alice","age":30}"#).unwrap();

        let result = get(&collection, "users", "alice").unwrap();
        assert_eq!(
            result.records,
            vec![("alice".to_string(), json!({"name": "Alice", "age": 30}))]
        );
    }

    #[test]
    fn get_missing_key_warns() {
        let (_dir, collection) = setup();
        let result = get(&collection, "users", "ghost").unwrap();

        assert!(result.records.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn add_duplicate_and_update_missing_surface_store_errors() {
        let (_dir, mut collection) = setup();
        add(&mut collection, "users", "alice", "1").unwrap();

        assert!(matches!(
            add(&mut collection, "users", "alice", "2"),
            Err(FiledictError::DuplicateKey(_))
        ));
        assert!(matches!(
            update(&mut collection, "users", "bob", "2"),
            Err(FiledictError::KeyNotFound(_))
        ));
    }

    #[test]
    fn invalid_json_and_empty_key_are_rejected() {
        let (_dir, mut collection) = setup();

        assert!(matches!(
            add(&mut collection, "users", "alice", "{oops"),
            Err(FiledictError::Api(_))
        ));
        assert!(matches!(
            add(&mut collection, "users", "", "1"),
            Err(FiledictError::EmptyKey)
        ));
        assert!(collection.get_dictionary("users").unwrap().is_empty());
    }

    #[test]
    fn unknown_dictionary_is_an_error() {
        let (_dir, mut collection) = setup();
        assert!(matches!(
            remove(&mut collection, "nope", "k"),
            Err(FiledictError::DictionaryNotFound(_))
        ));
        assert!(matches!(
            show(&collection, "nope"),
            Err(FiledictError::DictionaryNotFound(_))
        ));
    }

    #[test]
    fn show_lists_records_in_insertion_order() {
        let (_dir, mut collection) = setup();
        add(&mut collection, "users", "b", "2").unwrap();
        add(&mut collection, "users", "a", "1").unwrap();
        update(&mut collection, "users", "b", "\"two\"").unwrap();

        let result = show(&collection, "users").unwrap();
        assert_eq!(
            result.records,
            vec![("b".to_string(), json!("two")), ("a".to_string(), json!(1))]
        );
    }

    #[test]
    fn remove_reports_whether_key_existed() {
        let (_dir, mut collection) = setup();
        add(&mut collection, "users", "a", "1").unwrap();

        let first = remove(&mut collection, "users", "a").unwrap();
        let second = remove(&mut collection, "users", "a").unwrap();
        assert_eq!(first.messages[0].level, MessageLevel::Success);
        assert_eq!(second.messages[0].level, MessageLevel::Warning);
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Counter {
        hits: u64,
    }

    #[test]
    fn typed_collection_rejects_wrong_shape() {
        let dir = TempDir::new().unwrap();
        let mut collection: DictionaryCollection<Counter> = DictionaryCollection::new(dir.path());
        collection.init().unwrap();
        create::run(&mut collection, "counters").unwrap();

        add(&mut collection, "counters", "home", r#"{"hits": 3}"#).unwrap();
        assert!(add(&mut collection, "counters", "about", r#""three""#).is_err());

        let shown = show(&collection, "counters").unwrap();
        assert_eq!(shown.records, vec![("home".to_string(), json!({"hits": 3}))]);
    }
}
